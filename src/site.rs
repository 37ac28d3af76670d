use crate::carousel::{Playlist, VideoCarousel};
use crate::config::SiteConfig;
use crate::lang::{Language, LanguageSwitcher, PreferenceStore};
use crate::menu::{self, MenuData};
use crate::navbar::{MobileMenu, NavbarState};
use crate::render::{NodeId, RenderOp, ScheduledTask, Surface, Target};
use crate::reveal::{IntersectionSample, RevealOptions, RevealRegistry};
use crate::tilt::{Rect, TiltEffect};

#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    Scrolled {
        scroll_y: f64,
    },
    MobileToggleClicked,
    NavLinkClicked,
    LanguageToggleClicked,
    Intersections(Vec<(NodeId, IntersectionSample)>),
    PointerMoved {
        node: NodeId,
        rect: Rect,
        client_x: f64,
        client_y: f64,
    },
    PointerLeft(NodeId),
    VideoEnded,
    VideoPlaySettled(Result<(), String>),
    TaskDue(ScheduledTask),
}

/// `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Unknown states are treated as complete.
    pub fn from_document(state: &str) -> Self {
        match state {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    /// True once the markup has been parsed and elements can be bound.
    pub fn has_structure(self) -> bool {
        self != ReadyState::Loading
    }
}

/// Page controller. Owns every component's state and turns events into
/// render ops for a `Surface`.
pub struct Site<S> {
    config: SiteConfig,
    navbar: NavbarState,
    mobile: MobileMenu,
    switcher: LanguageSwitcher<S>,
    reveal: RevealRegistry<NodeId>,
    tilt: TiltEffect,
    carousel: Option<VideoCarousel>,
    menu_rendered: bool,
}

impl<S: PreferenceStore> Site<S> {
    pub fn new(config: SiteConfig, store: S) -> Self {
        let carousel = match Playlist::new(config.video_sources.clone()) {
            Ok(playlist) => Some(VideoCarousel::new(playlist, config.video_fade_ms)),
            Err(e) => {
                log::error!("Video carousel disabled: {}", e);
                None
            }
        };
        Self {
            navbar: NavbarState::new(config.scroll_threshold),
            mobile: MobileMenu::default(),
            switcher: LanguageSwitcher::new(store, config.storage_key.clone()),
            reveal: RevealRegistry::new(RevealOptions::from_config(&config)),
            tilt: TiltEffect::from_config(&config),
            carousel,
            menu_rendered: false,
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.switcher.current()
    }

    pub fn switcher(&self) -> &LanguageSwitcher<S> {
        &self.switcher
    }

    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    pub fn mobile_menu(&self) -> &MobileMenu {
        &self.mobile
    }

    pub fn reveal(&self) -> &RevealRegistry<NodeId> {
        &self.reveal
    }

    pub fn carousel(&self) -> Option<&VideoCarousel> {
        self.carousel.as_ref()
    }

    /// Page-ready work: apply the stored language and sample the scroll
    /// position once.
    pub fn start(&mut self, scroll_y: f64) -> Vec<RenderOp> {
        let mut ops = self.switcher.restore();
        ops.push(self.navbar.on_scroll(scroll_y));
        log::info!("Site started in {}", self.switcher.current());
        ops
    }

    pub fn observe<I>(&mut self, nodes: I) -> Vec<RenderOp>
    where
        I: IntoIterator<Item = NodeId>,
    {
        nodes
            .into_iter()
            .filter(|node| self.reveal.observe(*node))
            .map(RenderOp::Observe)
            .collect()
    }

    pub fn set_language(&mut self, lang: Language) -> Vec<RenderOp> {
        self.switcher.set_language(lang)
    }

    pub fn handle(&mut self, event: SiteEvent) -> Vec<RenderOp> {
        match event {
            SiteEvent::Scrolled { scroll_y } => vec![self.navbar.on_scroll(scroll_y)],
            SiteEvent::MobileToggleClicked => self.mobile.toggle(),
            SiteEvent::NavLinkClicked => self.mobile.close(),
            SiteEvent::LanguageToggleClicked => self.switcher.toggle(),
            SiteEvent::Intersections(entries) => self
                .reveal
                .on_intersection(entries)
                .into_iter()
                .flat_map(|node| {
                    [
                        RenderOp::class(Target::Node(node), "active", true),
                        RenderOp::Unobserve(node),
                    ]
                })
                .collect(),
            SiteEvent::PointerMoved {
                node,
                rect,
                client_x,
                client_y,
            } => vec![self.tilt.on_move(node, rect, client_x, client_y)],
            SiteEvent::PointerLeft(node) => self.tilt.on_leave(node),
            SiteEvent::VideoEnded => self
                .carousel
                .as_mut()
                .map(VideoCarousel::on_ended)
                .unwrap_or_default(),
            SiteEvent::VideoPlaySettled(outcome) => self
                .carousel
                .as_mut()
                .map(|carousel| carousel.on_play_settled(outcome))
                .unwrap_or_default(),
            SiteEvent::TaskDue(ScheduledTask::SwapVideo) => self
                .carousel
                .as_mut()
                .map(VideoCarousel::on_fade_elapsed)
                .unwrap_or_default(),
            SiteEvent::TaskDue(ScheduledTask::ClearTiltTransition(node)) => {
                vec![self.tilt.on_reset_elapsed(node)]
            }
        }
    }

    pub fn dispatch(&mut self, surface: &mut impl Surface, event: SiteEvent) {
        let ops = self.handle(event);
        surface.apply_all(&ops);
    }

    /// Mounts the menu into the page in the current language, then registers
    /// the new nodes for reveal. Runs at most once; a missing container or
    /// table is not an error. Returns the number of categories mounted.
    pub fn render_menu(&mut self, surface: &mut impl Surface, data: Option<&MenuData>) -> usize {
        if self.menu_rendered {
            log::debug!("Menu already rendered");
            return 0;
        }
        let Some(data) = data.filter(|data| !data.is_empty()) else {
            log::debug!("No menu data on this page");
            return 0;
        };
        if !surface.has_menu_grid() {
            log::debug!("No menu container on this page");
            return 0;
        }

        let categories = menu::render_menu(data, self.switcher.current(), self.config.stagger_step_ms);
        let mounted = surface.mount_menu(&categories);
        self.menu_rendered = true;

        let ops = self.observe(mounted);
        surface.apply_all(&ops);
        log::info!(
            "Rendered {} menu categories ({} reveal targets)",
            categories.len(),
            ops.len()
        );
        categories.len()
    }
}
