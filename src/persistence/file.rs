//! File system backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::PersistenceBackend;
use crate::error::{RecordError, Result};

/// Stores each snapshot as one file, replaced wholesale on write
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBackend;

impl FileBackend {
    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl PersistenceBackend for FileBackend {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RecordError::io(path, e)),
        }
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| RecordError::io(parent, e))?;
            }
        }

        // Write beside the target, then swap it in
        let tmp = Self::tmp_path(path);
        fs::write(&tmp, bytes).map_err(|e| RecordError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| RecordError::io(path, e))
    }
}
