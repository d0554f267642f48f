//! Snapshot persistence
//!
//! Features:
//! - Backend trait for "store this blob / give me that blob"
//! - JSON envelope around the encoded record text
//! - Whole-file replacement on every write (tmp → save)
//! - LocalStorage backend on the web

pub mod envelope;
pub mod file;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::path::Path;

use crate::error::Result;

pub use envelope::SnapshotEnvelope;
pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageBackend;

/// Reads and writes whole snapshot blobs at a path
pub trait PersistenceBackend {
    /// Fetch the blob stored at `path`, `Ok(None)` if nothing is stored there
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace whatever is stored at `path` with `bytes`
    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<()>;
}

impl<B: PersistenceBackend + ?Sized> PersistenceBackend for Box<B> {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        (**self).read(path)
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        (**self).write(path, bytes)
    }
}
