//! Headless page.
//!
//! `MemoryPage` keeps the parts of the document the site touches (classes,
//! inline styles, document language, translatable text, the menu container,
//! the hero video) and runs timers on a `VirtualScheduler`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::lang::{translate_all, Language, TextDirection, Translatable};
use crate::menu::ElementSpec;
use crate::render::{NodeId, RenderOp, ScheduledTask, Surface, Target};
use crate::scheduler::VirtualScheduler;
use crate::site::SiteEvent;

/// A statically authored translatable element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub en: Option<String>,
    pub ar: Option<String>,
    pub content: String,
}

impl TextNode {
    /// Authored markup shows the English text.
    pub fn new(en: &str, ar: Option<&str>) -> Self {
        Self {
            en: Some(en.to_string()),
            ar: ar.map(str::to_string),
            content: en.to_string(),
        }
    }
}

impl Translatable for TextNode {
    fn translation(&self, lang: Language) -> Option<String> {
        match lang {
            Language::En => self.en.clone(),
            Language::Ar => self.ar.clone(),
        }
    }

    fn set_content(&mut self, html: &str) {
        self.content = html.to_string();
    }
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    classes: HashMap<Target, BTreeSet<&'static str>>,
    styles: HashMap<(Target, &'static str), String>,
    document_lang: Option<Language>,
    document_dir: Option<TextDirection>,
    texts: Vec<TextNode>,
    menu_grid: Option<Vec<ElementSpec>>,
    nodes: BTreeMap<NodeId, Vec<&'static str>>,
    next_node: u32,
    observing: BTreeSet<NodeId>,
    video_src: Option<String>,
    play_requests: usize,
    timers: VirtualScheduler<ScheduledTask>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu_grid(mut self) -> Self {
        self.menu_grid = Some(Vec::new());
        self
    }

    pub fn add_text(&mut self, en: &str, ar: Option<&str>) -> usize {
        self.texts.push(TextNode::new(en, ar));
        self.texts.len() - 1
    }

    /// Registers a statically authored element (a reveal target or a tilt
    /// photo) and returns its id.
    pub fn add_node(&mut self, classes: &[&'static str]) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, classes.to_vec());
        id
    }

    pub fn text(&self, index: usize) -> &TextNode {
        &self.texts[index]
    }

    pub fn menu(&self) -> &[ElementSpec] {
        self.menu_grid.as_deref().unwrap_or(&[])
    }

    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, classes)| classes.iter().any(|c| *c == class))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes
            .get(&target)
            .map_or(false, |classes| classes.contains(class))
    }

    pub fn style(&self, target: Target, property: &'static str) -> Option<&str> {
        self.styles.get(&(target, property)).map(String::as_str)
    }

    pub fn document_lang(&self) -> Option<Language> {
        self.document_lang
    }

    pub fn document_dir(&self) -> Option<TextDirection> {
        self.document_dir
    }

    pub fn is_observing(&self, id: NodeId) -> bool {
        self.observing.contains(&id)
    }

    pub fn video_src(&self) -> Option<&str> {
        self.video_src.as_deref()
    }

    pub fn play_requests(&self) -> usize {
        self.play_requests
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Moves the page clock forward and returns the timer events that fired.
    pub fn advance(&mut self, ms: u64) -> Vec<SiteEvent> {
        self.timers
            .advance(ms)
            .into_iter()
            .map(SiteEvent::TaskDue)
            .collect()
    }

    /// True when every translatable node, static or rendered, shows its
    /// string for `lang` (nodes lacking one are skipped).
    pub fn shows_language(&self, lang: Language) -> bool {
        let static_ok = self.texts.iter().all(|node| match node.translation(lang) {
            Some(text) if !text.is_empty() => node.content == text,
            _ => true,
        });
        let mut rendered_ok = true;
        for category in self.menu() {
            category.walk(&mut |node| {
                if let Some(t) = &node.translations {
                    let expected = t.get(lang);
                    if !expected.is_empty() && node.content != expected {
                        rendered_ok = false;
                    }
                }
            });
        }
        static_ok && rendered_ok
    }

    fn set_class(&mut self, target: Target, class: &'static str, enabled: bool) {
        let classes = self.classes.entry(target).or_default();
        if enabled {
            classes.insert(class);
        } else {
            classes.remove(class);
        }
    }

    fn translate(&mut self, lang: Language) {
        translate_all(lang, self.texts.iter_mut());
        if let Some(grid) = self.menu_grid.as_mut() {
            for category in grid.iter_mut() {
                category.walk_mut(&mut |node| {
                    translate_all(lang, std::iter::once(node));
                });
            }
        }
    }
}

impl Surface for MemoryPage {
    fn apply(&mut self, op: &RenderOp) {
        match op {
            RenderOp::SetClass {
                target,
                class,
                enabled,
            } => self.set_class(*target, *class, *enabled),
            RenderOp::SetStyle {
                target,
                property,
                value,
            } => {
                self.styles.insert((*target, *property), value.clone());
            }
            RenderOp::RemoveStyle { target, property } => {
                self.styles.remove(&(*target, *property));
            }
            RenderOp::SetDocumentLanguage { lang, dir } => {
                self.document_lang = Some(*lang);
                self.document_dir = Some(*dir);
            }
            RenderOp::Translate(lang) => self.translate(*lang),
            RenderOp::SetVideoSource(src) => self.video_src = Some(src.clone()),
            RenderOp::PlayVideo => self.play_requests += 1,
            RenderOp::Observe(id) => {
                self.observing.insert(*id);
            }
            RenderOp::Unobserve(id) => {
                self.observing.remove(id);
            }
            RenderOp::Schedule { delay_ms, task } => {
                self.timers.replace(*delay_ms, *task);
            }
        }
    }

    fn has_menu_grid(&self) -> bool {
        self.menu_grid.as_ref().map_or(false, Vec::is_empty)
    }

    fn mount_menu(&mut self, categories: &[ElementSpec]) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for category in categories {
            category.walk(&mut |node| {
                if node.reveal {
                    ids.push(node.classes.clone());
                }
            });
        }
        let ids = ids
            .into_iter()
            .map(|classes| self.add_node(&classes))
            .collect();
        if let Some(grid) = self.menu_grid.as_mut() {
            grid.extend_from_slice(categories);
        }
        ids
    }
}
