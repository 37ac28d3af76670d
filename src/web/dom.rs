use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, HtmlElement, HtmlVideoElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

use super::{dispatch, App};
use crate::lang::{translate_all, Language, Translatable};
use crate::menu::ElementSpec;
use crate::render::{NodeId, RenderOp, ScheduledTask, Surface, Target};
use crate::reveal::{IntersectionSample, RevealOptions};
use crate::site::SiteEvent;

pub const REVEAL_SELECTOR: &str = ".reveal-up, .reveal-left, .reveal-right";
pub const TILT_SELECTOR: &str = ".tilt-effect";
pub const REVEAL_ATTR: &str = "data-reveal-id";
pub const TILT_ATTR: &str = "data-tilt-id";
const RENDERED_ATTR: &str = "data-menu-rendered";

/// The fixed elements of the page. Any of them may be missing.
pub struct Elements {
    pub navbar: Option<Element>,
    pub nav_links: Option<Element>,
    pub mobile_toggle: Option<Element>,
    pub lang_toggle: Option<Element>,
    pub lang_en: Option<Element>,
    pub lang_ar: Option<Element>,
    pub hero_video: Option<HtmlVideoElement>,
    pub menu_grid: Option<Element>,
    pub links: Vec<Element>,
}

impl Elements {
    pub fn bind(document: &Document) -> Self {
        Self {
            navbar: by_id(document, "navbar"),
            nav_links: query(document, ".nav-links"),
            mobile_toggle: by_id(document, "mobile-toggle"),
            lang_toggle: by_id(document, "lang-toggle"),
            lang_en: query(document, ".lang-en"),
            lang_ar: query(document, ".lang-ar"),
            hero_video: by_id(document, "hero-video")
                .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok()),
            menu_grid: by_id(document, "menu-grid"),
            links: query_all(document, ".nav-link"),
        }
    }
}

fn by_id(document: &Document, id: &str) -> Option<Element> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        log::debug!("No #{} on this page", id);
    }
    element
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// A `.lang-aware` element; its translations live in `data-en`/`data-ar`.
struct DomText(Element);

impl Translatable for DomText {
    fn translation(&self, lang: Language) -> Option<String> {
        self.0.get_attribute(lang.attribute())
    }

    fn set_content(&mut self, html: &str) {
        // translations may carry inline markup like <br> or <em>
        self.0.set_inner_html(html);
    }
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

pub struct DomSurface {
    document: Document,
    elements: Elements,
    nodes: HashMap<NodeId, Element>,
    next_node: u32,
    observer: Option<IntersectionObserver>,
    _observer_callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    timers: HashMap<ScheduledTask, Timeout>,
    app: Weak<RefCell<App>>,
}

impl DomSurface {
    pub fn new(
        document: Document,
        elements: Elements,
        options: &RevealOptions,
        app: Weak<RefCell<App>>,
    ) -> Self {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new({
            let app = app.clone();
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let samples = entries
                    .iter()
                    .filter_map(|entry| {
                        let entry = entry.dyn_into::<IntersectionObserverEntry>().ok()?;
                        let id = entry.target().get_attribute(REVEAL_ATTR)?.parse().ok()?;
                        Some((
                            NodeId(id),
                            IntersectionSample::new(
                                entry.is_intersecting(),
                                entry.intersection_ratio(),
                            ),
                        ))
                    })
                    .collect();
                dispatch(&app, SiteEvent::Intersections(samples));
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => Some(observer),
                Err(e) => {
                    log::error!("Scroll reveal disabled: {}", describe(&e));
                    None
                }
            };

        Self {
            document,
            elements,
            nodes: HashMap::new(),
            next_node: 0,
            observer,
            _observer_callback: callback,
            timers: HashMap::new(),
            app,
        }
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    fn register(&mut self, element: Element, attr: &str) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        let _ = element.set_attribute(attr, &id.0.to_string());
        self.nodes.insert(id, element);
        id
    }

    /// Assigns ids to every element matching `selector`.
    pub fn register_all(&mut self, selector: &str, attr: &str) -> Vec<(NodeId, Element)> {
        query_all(&self.document, selector)
            .into_iter()
            .map(|element| (self.register(element.clone(), attr), element))
            .collect()
    }

    fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Navbar => self.elements.navbar.as_ref(),
            Target::NavLinks => self.elements.nav_links.as_ref(),
            Target::MobileToggle => self.elements.mobile_toggle.as_ref(),
            Target::LangEnButton => self.elements.lang_en.as_ref(),
            Target::LangArButton => self.elements.lang_ar.as_ref(),
            Target::HeroVideo => self
                .elements
                .hero_video
                .as_ref()
                .map(|video| AsRef::<Element>::as_ref(video)),
            Target::Node(id) => self.nodes.get(&id),
        }
    }

    fn html_element(&self, target: Target) -> Option<&HtmlElement> {
        self.element(target)
            .and_then(|element| element.dyn_ref::<HtmlElement>())
    }

    fn play_video(&self) {
        let Some(video) = self.elements.hero_video.clone() else {
            return;
        };
        let app = self.app.clone();
        spawn_local(async move {
            let outcome = match video.play() {
                Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
                Err(e) => Err(e),
            };
            dispatch(
                &app,
                SiteEvent::VideoPlaySettled(outcome.map_err(|e| describe(&e))),
            );
        });
    }

    fn schedule(&mut self, delay_ms: u32, task: ScheduledTask) {
        let app = self.app.clone();
        let timeout = Timeout::new(delay_ms, move || dispatch(&app, SiteEvent::TaskDue(task)));
        // dropping the previous timeout cancels it
        self.timers.insert(task, timeout);
    }

    fn build(&mut self, spec: &ElementSpec, reveal_ids: &mut Vec<NodeId>) -> Result<Element, JsValue> {
        let element = self.document.create_element(spec.tag)?;
        if let Some(id) = &spec.id {
            element.set_id(id);
        }
        if !spec.classes.is_empty() {
            element.set_class_name(&spec.classes.join(" "));
        }
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            for (property, value) in &spec.styles {
                html.style().set_property(property, value)?;
            }
        }
        if let Some(translations) = &spec.translations {
            element.set_attribute(Language::En.attribute(), &translations.en)?;
            element.set_attribute(Language::Ar.attribute(), &translations.ar)?;
        }
        if !spec.content.is_empty() {
            element.set_inner_html(&spec.content);
        }
        if spec.reveal {
            reveal_ids.push(self.register(element.clone(), REVEAL_ATTR));
        }
        for child in &spec.children {
            let child = self.build(child, reveal_ids)?;
            element.append_child(&child)?;
        }
        Ok(element)
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, op: &RenderOp) {
        match op {
            RenderOp::SetClass {
                target,
                class,
                enabled,
            } => {
                if let Some(element) = self.element(*target) {
                    let classes = element.class_list();
                    let _ = if *enabled {
                        classes.add_1(class)
                    } else {
                        classes.remove_1(class)
                    };
                }
            }
            RenderOp::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(element) = self.html_element(*target) {
                    let _ = element.style().set_property(property, value);
                }
            }
            RenderOp::RemoveStyle { target, property } => {
                if let Some(element) = self.html_element(*target) {
                    let _ = element.style().remove_property(property);
                }
            }
            RenderOp::SetDocumentLanguage { lang, dir } => {
                if let Some(root) = self.document.document_element() {
                    let _ = root.set_attribute("lang", lang.code());
                    let _ = root.set_attribute("dir", dir.as_str());
                }
            }
            RenderOp::Translate(lang) => {
                let mut nodes: Vec<DomText> = query_all(&self.document, ".lang-aware")
                    .into_iter()
                    .map(DomText)
                    .collect();
                let rewritten = translate_all(*lang, nodes.iter_mut());
                log::debug!("Translated {} of {} nodes to {}", rewritten, nodes.len(), lang);
            }
            RenderOp::SetVideoSource(src) => {
                if let Some(video) = &self.elements.hero_video {
                    video.set_src(src);
                }
            }
            RenderOp::PlayVideo => self.play_video(),
            RenderOp::Observe(id) => {
                if let (Some(observer), Some(element)) = (&self.observer, self.nodes.get(id)) {
                    observer.observe(element);
                }
            }
            RenderOp::Unobserve(id) => {
                if let (Some(observer), Some(element)) = (&self.observer, self.nodes.get(id)) {
                    observer.unobserve(element);
                }
            }
            RenderOp::Schedule { delay_ms, task } => self.schedule(*delay_ms, *task),
        }
    }

    fn has_menu_grid(&self) -> bool {
        self.elements
            .menu_grid
            .as_ref()
            .map_or(false, |grid| !grid.has_attribute(RENDERED_ATTR))
    }

    fn mount_menu(&mut self, categories: &[ElementSpec]) -> Vec<NodeId> {
        let Some(grid) = self.elements.menu_grid.clone() else {
            return Vec::new();
        };
        let mut reveal_ids = Vec::new();
        for category in categories {
            let mounted = self
                .build(category, &mut reveal_ids)
                .and_then(|element| grid.append_child(&element).map(|_| ()));
            if let Err(e) = mounted {
                log::error!("Failed to mount menu category: {}", describe(&e));
            }
        }
        let _ = grid.set_attribute(RENDERED_ATTR, "true");
        reveal_ids
    }
}
