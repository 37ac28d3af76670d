use web_sys::{Storage, Window};

use crate::error::{Result, SiteError};
use crate::lang::{MemoryStore, PreferenceStore};

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open(window: &Window) -> Result<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(SiteError::StorageUnavailable("no localStorage".to_string())),
            Err(e) => Err(SiteError::StorageUnavailable(format!("{:?}", e))),
        }
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| SiteError::StorageWrite(format!("{:?}", e)))
    }
}

/// localStorage when the browser allows it, otherwise a per-page store.
pub enum BrowserStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &Window) -> Self {
        match LocalStore::open(window) {
            Ok(store) => BrowserStore::Local(store),
            Err(e) => {
                log::warn!("{}; language preference will not persist", e);
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(store) => store.load(key),
            BrowserStore::Memory(store) => store.load(key),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(store) => store.save(key, value),
            BrowserStore::Memory(store) => store.save(key, value),
        }
    }
}
