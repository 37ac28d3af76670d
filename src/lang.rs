use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SiteError};
use crate::render::{RenderOp, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Name of the data attribute holding this language's markup.
    pub fn attribute(self) -> &'static str {
        match self {
            Language::En => "data-en",
            Language::Ar => "data-ar",
        }
    }

    pub fn dir(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::En => TextDirection::Ltr,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = SiteError;

    fn from_str(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(SiteError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Single-origin key/value storage for the language preference.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preference store kept in memory. Used headless, and in the browser when
/// localStorage is unavailable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// An element that holds one markup string per language and shows one.
pub trait Translatable {
    fn translation(&self, lang: Language) -> Option<String>;
    fn set_content(&mut self, html: &str);
}

/// Rewrites each node to its string for `lang`. Nodes with no (or an empty)
/// string for `lang` keep their content. Returns how many were rewritten.
pub fn translate_all<'a, T, I>(lang: Language, nodes: I) -> usize
where
    T: Translatable + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let mut rewritten = 0;
    for node in nodes {
        match node.translation(lang) {
            Some(text) if !text.is_empty() => {
                node.set_content(&text);
                rewritten += 1;
            }
            _ => {}
        }
    }
    rewritten
}

pub struct LanguageSwitcher<S> {
    store: S,
    key: String,
    current: Language,
}

impl<S: PreferenceStore> LanguageSwitcher<S> {
    /// Reads the persisted preference, defaulting to English when it is
    /// absent or unrecognized.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match store.load(&key) {
            Some(code) => code.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring stored language preference: {}", e);
                Language::default()
            }),
            None => Language::default(),
        };
        Self {
            store,
            key,
            current,
        }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Startup application of the stored preference. Nothing is written back.
    pub fn restore(&self) -> Vec<RenderOp> {
        Self::ops_for(self.current)
    }

    pub fn set_language(&mut self, lang: Language) -> Vec<RenderOp> {
        self.current = lang;
        if let Err(e) = self.store.save(&self.key, lang.code()) {
            log::warn!("Language preference not persisted: {}", e);
        }
        log::info!("Language set to {}", lang);
        Self::ops_for(lang)
    }

    pub fn toggle(&mut self) -> Vec<RenderOp> {
        self.set_language(self.current.toggled())
    }

    fn ops_for(lang: Language) -> Vec<RenderOp> {
        vec![
            RenderOp::SetDocumentLanguage {
                lang,
                dir: lang.dir(),
            },
            RenderOp::class(Target::LangEnButton, "active", lang == Language::En),
            RenderOp::class(Target::LangArButton, "active", lang == Language::Ar),
            RenderOp::Translate(lang),
        ]
    }
}
