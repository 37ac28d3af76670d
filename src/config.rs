use serde::Deserialize;

use crate::error::Result;

pub const STORAGE_KEY: &str = "siteLang";

/// Tunables for every component on the page.
///
/// The page may override any subset of these through a `siteConfig` global;
/// missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub storage_key: String,
    pub scroll_threshold: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub tilt_multiplier: f64,
    pub tilt_perspective_px: u32,
    pub tilt_hover_scale: f64,
    pub tilt_reset_ms: u32,
    pub video_fade_ms: u32,
    pub video_sources: Vec<String>,
    pub stagger_step_ms: u32,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            scroll_threshold: 50.0,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            tilt_multiplier: 0.05,
            tilt_perspective_px: 1000,
            tilt_hover_scale: 1.02,
            tilt_reset_ms: 400,
            video_fade_ms: 800,
            video_sources: vec![
                "dark-espresso-shot.mp4".to_string(),
                "hazelnut-brew-complete.mp4".to_string(),
                "vanilla-french-complete.mp4".to_string(),
            ],
            stagger_step_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses an optional override, falling back to defaults when it is
    /// missing or malformed.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::error!("Ignoring siteConfig: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
