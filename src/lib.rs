//! Client-side behavior for the café site: navbar, mobile menu, scroll
//! reveal, photo tilt, hero video loop, English/Arabic switch and the menu
//! rendered from `menuData`.
//!
//! Everything outside `web` is plain Rust and runs headless; `web` is the
//! wasm32 adapter over the browser DOM.

pub mod carousel;
pub mod config;
pub mod error;
pub mod lang;
pub mod menu;
pub mod navbar;
pub mod page;
pub mod render;
pub mod reveal;
pub mod scheduler;
pub mod site;
pub mod tilt;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use lang::{Language, LanguageSwitcher, MemoryStore, PreferenceStore};
pub use menu::MenuData;
pub use page::MemoryPage;
pub use render::{NodeId, RenderOp, Surface, Target};
pub use site::{Site, SiteEvent};
