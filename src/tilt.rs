use crate::config::SiteConfig;
use crate::render::{NodeId, RenderOp, ScheduledTask, Target};

const RESET_EASING: &str = "ease-out";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x_deg: f64,
    pub y_deg: f64,
}

/// Rotation for a cursor at (`client_x`, `client_y`) over `rect`. Moving
/// right turns around Y, moving down tips back around X.
pub fn rotation_for(rect: Rect, client_x: f64, client_y: f64, multiplier: f64) -> Rotation {
    let x = client_x - rect.left - rect.width / 2.0;
    let y = client_y - rect.top - rect.height / 2.0;
    Rotation {
        // + 0.0 folds -0.0 so the css never reads "-0deg"
        x_deg: -y * multiplier + 0.0,
        y_deg: x * multiplier + 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TiltEffect {
    multiplier: f64,
    perspective_px: u32,
    hover_scale: f64,
    reset_ms: u32,
}

impl TiltEffect {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            multiplier: config.tilt_multiplier,
            perspective_px: config.tilt_perspective_px,
            hover_scale: config.tilt_hover_scale,
            reset_ms: config.tilt_reset_ms,
        }
    }

    pub fn transform(&self, rotation: Rotation) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.perspective_px,
            rotation.x_deg,
            rotation.y_deg,
            s = self.hover_scale
        )
    }

    pub fn neutral_transform(&self) -> String {
        format!(
            "perspective({}px) rotateX(0) rotateY(0) scale3d(1, 1, 1)",
            self.perspective_px
        )
    }

    pub fn reset_transition(&self) -> String {
        format!(
            "transform {}s {}",
            f64::from(self.reset_ms) / 1000.0,
            RESET_EASING
        )
    }

    pub fn on_move(&self, node: NodeId, rect: Rect, client_x: f64, client_y: f64) -> RenderOp {
        let rotation = rotation_for(rect, client_x, client_y, self.multiplier);
        RenderOp::SetStyle {
            target: Target::Node(node),
            property: "transform",
            value: self.transform(rotation),
        }
    }

    /// Eases back to neutral and drops the transition once it has run, so
    /// later moves track the cursor directly.
    pub fn on_leave(&self, node: NodeId) -> Vec<RenderOp> {
        vec![
            RenderOp::SetStyle {
                target: Target::Node(node),
                property: "transition",
                value: self.reset_transition(),
            },
            RenderOp::SetStyle {
                target: Target::Node(node),
                property: "transform",
                value: self.neutral_transform(),
            },
            RenderOp::Schedule {
                delay_ms: self.reset_ms,
                task: ScheduledTask::ClearTiltTransition(node),
            },
        ]
    }

    pub fn on_reset_elapsed(&self, node: NodeId) -> RenderOp {
        RenderOp::RemoveStyle {
            target: Target::Node(node),
            property: "transition",
        }
    }
}
