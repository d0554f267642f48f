//! Browser LocalStorage backend (WASM only)

use std::path::Path;

use super::PersistenceBackend;
use crate::error::{RecordError, Result};

/// Stores each snapshot as a LocalStorage item keyed by its path
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| RecordError::Storage("LocalStorage unavailable".to_string()))
    }

    fn item_key(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}

impl PersistenceBackend for LocalStorageBackend {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        let storage = Self::storage()?;
        storage
            .get_item(&Self::item_key(path))
            .map(|item| item.map(String::into_bytes))
            .map_err(|e| RecordError::Storage(format!("{:?}", e)))
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        let storage = Self::storage()?;
        let value = std::str::from_utf8(bytes)
            .map_err(|e| RecordError::Storage(format!("snapshot is not UTF-8: {}", e)))?;
        storage
            .set_item(&Self::item_key(path), value)
            .map_err(|e| RecordError::Storage(format!("{:?}", e)))
    }
}
