use crate::error::{Result, SiteError};
use crate::render::{RenderOp, ScheduledTask, Target};

const FADING: &str = "fading";

/// Fixed clip list with a cursor that wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    sources: Vec<String>,
    cursor: usize,
}

impl Playlist {
    pub fn new(sources: Vec<String>) -> Result<Self> {
        if sources.is_empty() {
            return Err(SiteError::EmptyPlaylist);
        }
        Ok(Self { sources, cursor: 0 })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &str {
        &self.sources[self.cursor]
    }

    pub fn advance(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.sources.len();
        self.current()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    Playing,
    FadingOut,
    Starting,
}

/// Cross-fading background video loop.
///
/// `ended` fades the clip out, the swap waits for the fade, and the fade is
/// lifted once `play()` settles either way.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCarousel {
    playlist: Playlist,
    phase: CarouselPhase,
    fade_ms: u32,
}

impl VideoCarousel {
    pub fn new(playlist: Playlist, fade_ms: u32) -> Self {
        Self {
            playlist,
            phase: CarouselPhase::Playing,
            fade_ms,
        }
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn on_ended(&mut self) -> Vec<RenderOp> {
        if self.phase != CarouselPhase::Playing {
            log::debug!("Ignoring video end during swap");
            return Vec::new();
        }
        self.phase = CarouselPhase::FadingOut;
        vec![
            RenderOp::class(Target::HeroVideo, FADING, true),
            RenderOp::Schedule {
                delay_ms: self.fade_ms,
                task: ScheduledTask::SwapVideo,
            },
        ]
    }

    pub fn on_fade_elapsed(&mut self) -> Vec<RenderOp> {
        if self.phase != CarouselPhase::FadingOut {
            return Vec::new();
        }
        self.phase = CarouselPhase::Starting;
        let next = self.playlist.advance().to_string();
        log::debug!("Swapping hero video to {}", next);
        vec![RenderOp::SetVideoSource(next), RenderOp::PlayVideo]
    }

    pub fn on_play_settled(&mut self, outcome: std::result::Result<(), String>) -> Vec<RenderOp> {
        if let Err(reason) = outcome {
            log::error!("{}", SiteError::Playback(reason));
        }
        self.phase = CarouselPhase::Playing;
        vec![RenderOp::class(Target::HeroVideo, FADING, false)]
    }
}
