//! Browser entry point.
//!
//! Binds the page, restores the language, renders the menu and wires the
//! listeners. All state sits in one `App` behind `Rc<RefCell<_>>`; listeners,
//! timers and promise callbacks hold a `Weak` to it.

mod dom;
mod listeners;
mod storage;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::menu::MenuData;
use crate::render::Surface;
use crate::site::{ReadyState, Site, SiteEvent};

use dom::{DomSurface, Elements};
pub use storage::{BrowserStore, LocalStore};

pub struct App {
    site: Site<BrowserStore>,
    surface: DomSurface,
}

impl App {
    fn dispatch(&mut self, event: SiteEvent) {
        let App { site, surface } = self;
        site.dispatch(surface, event);
    }
}

pub(crate) fn dispatch(app: &Weak<RefCell<App>>, event: SiteEvent) {
    let Some(app) = app.upgrade() else {
        return;
    };
    match app.try_borrow_mut() {
        Ok(mut app) => app.dispatch(event),
        Err(_) => log::warn!("Dropped re-entrant event {:?}", event),
    };
}

/// Reads a page global (`window.x` or a top-level `const x`) as JSON.
fn page_global(window: &Window, name: &str) -> Option<String> {
    let value = match js_sys::Reflect::get(window, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => js_sys::eval(&format!("typeof {0} === 'undefined' ? undefined : {0}", name)).ok()?,
    };
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

fn load_config(window: &Window) -> SiteConfig {
    let config = SiteConfig::from_json_or_default(page_global(window, "siteConfig").as_deref());
    log::set_max_level(config.log_level().to_level_filter());
    config
}

fn load_menu(window: &Window) -> Option<MenuData> {
    let json = page_global(window, "menuData")?;
    MenuData::from_json(&json)
        .map_err(|e| log::error!("Ignoring menuData: {}", e))
        .ok()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Narrowed to the configured level once siteConfig is read.
    let _ = console_log::init_with_level(log::Level::Trace);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if ReadyState::from_document(&document.ready_state()).has_structure() {
        return boot(window, document);
    }
    log::debug!("Document still loading, waiting for DOMContentLoaded");
    let target = document.clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = boot(window, document) {
            log::error!("Startup failed: {:?}", e);
        }
    });
    target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn boot(window: Window, document: Document) -> Result<(), JsValue> {
    let config = load_config(&window);
    let site = Site::new(config, BrowserStore::open(&window));
    let reveal_options = site.reveal().options().clone();
    let elements = Elements::bind(&document);

    let app = Rc::new_cyclic(|weak| {
        RefCell::new(App {
            site,
            surface: DomSurface::new(document, elements, &reveal_options, weak.clone()),
        })
    });

    {
        let mut app = app.borrow_mut();
        let App { site, surface } = &mut *app;

        let ops = site.start(window.scroll_y().unwrap_or(0.0));
        surface.apply_all(&ops);

        let authored = surface
            .register_all(dom::REVEAL_SELECTOR, dom::REVEAL_ATTR)
            .into_iter()
            .map(|(id, _)| id);
        let ops = site.observe(authored);
        surface.apply_all(&ops);

        site.render_menu(surface, load_menu(&window).as_ref());
    }

    listeners::attach(&window, &app);
    Ok(())
}
