//! Data Record entry point
//!
//! Native: a small CLI over the file-backed store.
//! Web: opens the LocalStorage store, counts launches, saves on `pagehide`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use data_record::persistence::LocalStorageBackend;
    use data_record::platform::resolver_for;
    use data_record::{RecordStore, StoreConfig};

    pub fn run() {
        data_record::init_logging();
        log::info!("Data Record starting...");

        let config = StoreConfig::default();
        let resolver = resolver_for(&config);
        let store = Rc::new(RefCell::new(RecordStore::open(
            LocalStorageBackend::new(),
            resolver.as_ref(),
            &config,
        )));

        if let Err(e) = store.borrow_mut().add_int("launches", 1) {
            log::error!("Launch counter unreadable: {}", e);
        }

        let Some(window) = web_sys::window() else {
            log::error!("No window; records will not be saved on exit");
            return;
        };

        // Page teardown is the browser's shutdown signal
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            store.borrow_mut().save();
        });
        if let Err(e) =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to register pagehide save hook: {:?}", e);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    data_record::init_logging();

    let cli = cli::Cli::parse();
    cli::run(cli, &mut std::io::stdout().lock())
}
