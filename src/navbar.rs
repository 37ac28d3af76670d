use crate::render::{RenderOp, Target};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarState {
    threshold: f64,
    scrolled: bool,
}

impl NavbarState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Samples the scroll offset. The class op is emitted on every event so
    /// the page never drifts from the sampled state.
    pub fn on_scroll(&mut self, scroll_y: f64) -> RenderOp {
        self.scrolled = scroll_y > self.threshold;
        RenderOp::class(Target::Navbar, "scrolled", self.scrolled)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> Vec<RenderOp> {
        self.open = !self.open;
        self.ops()
    }

    /// A nav link was followed.
    pub fn close(&mut self) -> Vec<RenderOp> {
        self.open = false;
        self.ops()
    }

    fn ops(&self) -> Vec<RenderOp> {
        vec![
            RenderOp::class(Target::NavLinks, "active", self.open),
            RenderOp::class(Target::MobileToggle, "active", self.open),
        ]
    }
}
