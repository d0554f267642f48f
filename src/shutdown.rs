//! Save-on-exit guard
//!
//! Owns the store for the lifetime of the application and flushes it once
//! when dropped. A crash or forced kill skips the drop, losing unsaved
//! changes since the last explicit `save`.

use std::ops::{Deref, DerefMut};

use crate::persistence::PersistenceBackend;
use crate::record::RecordStore;

pub struct SaveOnExit<B: PersistenceBackend> {
    store: RecordStore<B>,
    skip_save: bool,
}

impl<B: PersistenceBackend> SaveOnExit<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self {
            store,
            skip_save: false,
        }
    }

    /// Drop without saving; unsaved changes are discarded
    pub fn disarm(&mut self) {
        self.skip_save = true;
    }
}

impl<B: PersistenceBackend> Deref for SaveOnExit<B> {
    type Target = RecordStore<B>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl<B: PersistenceBackend> DerefMut for SaveOnExit<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

impl<B: PersistenceBackend> Drop for SaveOnExit<B> {
    fn drop(&mut self) {
        if self.skip_save {
            log::debug!("Discarding unsaved records on exit");
            return;
        }
        log::debug!("Flushing records on exit");
        self.store.save();
    }
}
