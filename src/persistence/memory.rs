//! In-process backend

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::PersistenceBackend;
use crate::error::{RecordError, Result};

/// Keeps snapshots in memory; counts writes and can be told to fail them
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blobs: HashMap<PathBuf, Vec<u8>>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a blob at `path`
    pub fn with_blob(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(path.into(), bytes.into());
        self
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every following write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn blob(&self, path: &Path) -> Option<&[u8]> {
        self.blobs.get(path).map(Vec::as_slice)
    }
}

impl PersistenceBackend for MemoryBackend {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(path).cloned())
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(RecordError::Storage(format!(
                "write to {} rejected",
                path.display()
            )));
        }
        self.blobs.insert(path.to_path_buf(), bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}
