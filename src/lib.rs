//! Data Record - persistent typed key-value records for game save data
//!
//! Core modules:
//! - `record`: Cells, the `|key:value` encoding, and the dirty-tracking store
//! - `persistence`: Snapshot envelope and storage backends (file, memory, LocalStorage)
//! - `platform`: Native/browser persistent path resolution
//! - `settings`: Where the record file lives
//! - `shutdown`: Save-on-exit guard

pub mod error;
pub mod persistence;
pub mod platform;
pub mod record;
pub mod settings;
pub mod shutdown;

pub use error::{RecordError, Result};
pub use persistence::{FileBackend, MemoryBackend, PersistenceBackend};
pub use platform::{FixedRootResolver, PathResolver};
pub use record::{Cell, LoadOutcome, RecordStore, SaveOutcome};
pub use settings::StoreConfig;
pub use shutdown::SaveOnExit;

/// Storage location constants
pub mod consts {
    /// Default application directory under the platform data dir
    pub const APP_NAME: &str = "data-record";
    /// Subdirectory of the persistent root holding the record file
    pub const RECORD_DIR: &str = "Record/";
    /// Record file name
    pub const RECORD_FILE: &str = "dataRecord.bin";
}

/// Set up logging for the current platform
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("Logger already initialized");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if env_logger::try_init().is_err() {
            log::debug!("Logger already initialized");
        }
    }
}
