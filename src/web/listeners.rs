use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, Window};

use super::dom::{TILT_ATTR, TILT_SELECTOR};
use super::{dispatch, App};
use crate::site::SiteEvent;
use crate::tilt::Rect;

/// Adds a listener for the lifetime of the page.
fn on<T, F>(target: &T, kind: &str, handler: F)
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target
        .as_ref()
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
    {
        log::error!("Failed to listen for {}: {:?}", kind, e);
    }
    callback.forget();
}

pub fn attach(window: &Window, app: &Rc<RefCell<App>>) {
    let weak = Rc::downgrade(app);

    let (mobile_toggle, links, lang_toggle, hero_video, tilts) = {
        let mut app = app.borrow_mut();
        let tilts = app.surface.register_all(TILT_SELECTOR, TILT_ATTR);
        let elements = app.surface.elements();
        (
            elements.mobile_toggle.clone(),
            elements.links.clone(),
            elements.lang_toggle.clone(),
            elements.hero_video.clone(),
            tilts,
        )
    };

    on(window, "scroll", {
        let weak = weak.clone();
        let window = window.clone();
        move |_| {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            dispatch(&weak, SiteEvent::Scrolled { scroll_y });
        }
    });

    if let Some(toggle) = &mobile_toggle {
        let weak = weak.clone();
        on(toggle, "click", move |_| {
            dispatch(&weak, SiteEvent::MobileToggleClicked)
        });
    }

    for link in &links {
        let weak = weak.clone();
        on(link, "click", move |_| dispatch(&weak, SiteEvent::NavLinkClicked));
    }

    if let Some(toggle) = &lang_toggle {
        let weak = weak.clone();
        on(toggle, "click", move |_| {
            dispatch(&weak, SiteEvent::LanguageToggleClicked)
        });
    }

    if let Some(video) = &hero_video {
        let weak = weak.clone();
        on(video, "ended", move |_| dispatch(&weak, SiteEvent::VideoEnded));
    }

    for (node, element) in tilts {
        on(&element, "mousemove", {
            let weak = weak.clone();
            let element = element.clone();
            move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let bounds = element.get_bounding_client_rect();
                dispatch(
                    &weak,
                    SiteEvent::PointerMoved {
                        node,
                        rect: Rect {
                            left: bounds.left(),
                            top: bounds.top(),
                            width: bounds.width(),
                            height: bounds.height(),
                        },
                        client_x: f64::from(event.client_x()),
                        client_y: f64::from(event.client_y()),
                    },
                );
            }
        });
        on(&element, "mouseleave", {
            let weak = weak.clone();
            move |_| dispatch(&weak, SiteEvent::PointerLeft(node))
        });
    }

    log::debug!("Listeners attached");
}
