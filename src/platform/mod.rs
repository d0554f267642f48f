//! Platform abstraction layer
//!
//! Handles native/browser differences for where persistent data lives:
//! - Native: the OS data directory (`~/.local/share/<app>` etc.)
//! - Web: a fixed root used only as a LocalStorage key prefix

use std::path::PathBuf;

use crate::settings::StoreConfig;

/// Supplies the application's persistent-data root
pub trait PathResolver {
    fn persistent_root(&self) -> PathBuf;
}

/// Always resolves to the given root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRootResolver(pub PathBuf);

impl PathResolver for FixedRootResolver {
    fn persistent_root(&self) -> PathBuf {
        self.0.clone()
    }
}

/// Platform data directory joined with the app name
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirResolver {
    app_name: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl DataDirResolver {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PathResolver for DataDirResolver {
    fn persistent_root(&self) -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.app_name)
    }
}

/// Resolver described by `config`: explicit root if set, else the platform default
pub fn resolver_for(config: &StoreConfig) -> Box<dyn PathResolver> {
    if let Some(root) = &config.root {
        return Box::new(FixedRootResolver(root.clone()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(DataDirResolver::new(config.app_name.clone()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(FixedRootResolver(PathBuf::from(&config.app_name)))
    }
}

/// Full record file path: `<root>/<record_dir>/<file_name>`
pub fn record_file_path(resolver: &dyn PathResolver, config: &StoreConfig) -> PathBuf {
    resolver
        .persistent_root()
        .join(config.relative_file_path())
}
