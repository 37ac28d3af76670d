//! Render instructions and the boundary that applies them.
//!
//! Components never touch the document. They return `RenderOp`s, and a
//! `Surface` (the browser DOM or the in-memory `MemoryPage`) carries them out.

use crate::lang::{Language, TextDirection};
use crate::menu::ElementSpec;

/// Handle for an element the surface registered on behalf of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Navbar,
    NavLinks,
    MobileToggle,
    LangEnButton,
    LangArButton,
    HeroVideo,
    Node(NodeId),
}

/// Identity of a delayed task. Scheduling a task replaces a pending one with
/// the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    SwapVideo,
    ClearTiltTransition(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    SetClass {
        target: Target,
        class: &'static str,
        enabled: bool,
    },
    SetStyle {
        target: Target,
        property: &'static str,
        value: String,
    },
    RemoveStyle {
        target: Target,
        property: &'static str,
    },
    SetDocumentLanguage {
        lang: Language,
        dir: TextDirection,
    },
    /// Rewrite every translatable node to its string for this language.
    Translate(Language),
    SetVideoSource(String),
    /// Start playback; the surface reports the outcome as `SiteEvent::VideoPlaySettled`.
    PlayVideo,
    Observe(NodeId),
    Unobserve(NodeId),
    Schedule {
        delay_ms: u32,
        task: ScheduledTask,
    },
}

impl RenderOp {
    pub fn class(target: Target, class: &'static str, enabled: bool) -> Self {
        RenderOp::SetClass {
            target,
            class,
            enabled,
        }
    }
}

pub trait Surface {
    fn apply(&mut self, op: &RenderOp);

    fn apply_all(&mut self, ops: &[RenderOp]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Whether the page has the designated menu container.
    fn has_menu_grid(&self) -> bool;

    /// Appends the rendered categories to the menu container and returns the
    /// ids assigned to every element flagged for reveal, in document order.
    fn mount_menu(&mut self, categories: &[ElementSpec]) -> Vec<NodeId>;
}
