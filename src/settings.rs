//! Store configuration
//!
//! Where the record file lives. Loaded from JSON, every field optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{APP_NAME, RECORD_DIR, RECORD_FILE};
use crate::error::{RecordError, Result};

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Application directory name under the platform data dir
    pub app_name: String,
    /// Subdirectory holding the record file
    pub record_dir: String,
    /// Record file name
    pub file_name: String,
    /// Explicit persistent root, bypassing the platform data dir
    pub root: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            record_dir: RECORD_DIR.to_string(),
            file_name: RECORD_FILE.to_string(),
            root: None,
        }
    }
}

impl StoreConfig {
    /// Environment variable overriding the persistent root
    pub const ROOT_ENV: &'static str = "DATA_RECORD_ROOT";

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let config = Self::from_json_str(&json)?;
                log::info!("Loaded store config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No store config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(RecordError::io(path, e)),
        }
    }

    /// Apply `DATA_RECORD_ROOT` if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(root) = std::env::var_os(Self::ROOT_ENV).filter(|v| !v.is_empty()) {
            self.root = Some(PathBuf::from(root));
        }
        self
    }

    /// Record file location relative to a persistent root
    pub fn relative_file_path(&self) -> PathBuf {
        Path::new(&self.record_dir).join(&self.file_name)
    }
}
