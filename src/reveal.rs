//! One-shot scroll reveal.
//!
//! Elements are observed until they first intersect the viewport past the
//! threshold, then flagged `active` and dropped from observation for good.

use crate::config::SiteConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl RevealOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            root_margin: config.reveal_root_margin.clone(),
        }
    }
}

/// What the observer reported for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionSample {
    pub fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }
}

/// Keys only need equality so the browser side can key by DOM element.
#[derive(Debug, Clone)]
pub struct RevealRegistry<K> {
    options: RevealOptions,
    observed: Vec<K>,
    revealed: Vec<K>,
}

impl<K: PartialEq + Clone> RevealRegistry<K> {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
            revealed: Vec::new(),
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Returns false when the element is already observed or already revealed.
    pub fn observe(&mut self, key: K) -> bool {
        if self.observed.contains(&key) || self.revealed.contains(&key) {
            return false;
        }
        self.observed.push(key);
        true
    }

    pub fn is_observed(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Applies one observer callback and returns the keys revealed by it.
    /// Entries for elements no longer observed are ignored.
    pub fn on_intersection<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, IntersectionSample)>,
    {
        let mut newly = Vec::new();
        for (key, sample) in entries {
            // Visible share must reach the threshold; an element taller than
            // 1/threshold viewports never reveals.
            if !sample.is_intersecting || sample.ratio < self.options.threshold {
                continue;
            }
            if let Some(pos) = self.observed.iter().position(|k| *k == key) {
                self.observed.remove(pos);
                self.revealed.push(key.clone());
                newly.push(key);
            }
        }
        newly
    }
}
