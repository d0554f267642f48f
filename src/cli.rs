//! Command line front end over the file-backed store

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use data_record::platform::resolver_for;
use data_record::{FileBackend, RecordStore, SaveOnExit, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "data-record", version, about = "Inspect and edit persistent game records")]
pub struct Cli {
    /// Persistent root directory (overrides config and DATA_RECORD_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// JSON store config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print string value
    Get {
        key: String,
        #[arg(default_value = "")]
        default: String,
    },
    /// Print integer value
    GetInt {
        key: String,
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        default: i32,
    },
    /// Print float value
    GetFloat {
        key: String,
        #[arg(default_value_t = 0.0, allow_negative_numbers = true)]
        default: f32,
    },
    /// Store string value
    Set { key: String, value: String },
    /// Store integer value
    SetInt {
        key: String,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Store float value
    SetFloat {
        key: String,
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Add to integer value (absent counts as 0)
    Add {
        key: String,
        #[arg(allow_negative_numbers = true)]
        offset: i32,
    },
    /// Delete a record
    Remove { key: String },
    /// Delete every record
    Reset,
    /// Print the encoded snapshot
    Dump,
    /// Print the record file path
    Path,
}

impl Cli {
    /// Config file (or defaults), then env, then `--root`
    fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        }
        .with_env_overrides();
        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }
        Ok(config)
    }
}

/// Open the store, apply one command, save on return
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.store_config()?;
    let resolver = resolver_for(&config);
    let mut store = SaveOnExit::new(RecordStore::open(
        FileBackend::new(),
        resolver.as_ref(),
        &config,
    ));

    match cli.command {
        Commands::Get { key, default } => {
            writeln!(out, "{}", store.get_string(&key, &default))?;
        }
        Commands::GetInt { key, default } => {
            writeln!(out, "{}", store.get_int(&key, default)?)?;
        }
        Commands::GetFloat { key, default } => {
            writeln!(out, "{}", store.get_float(&key, default)?)?;
        }
        Commands::Set { key, value } => store.set_string(&key, value),
        Commands::SetInt { key, value } => store.set_int(&key, value),
        Commands::SetFloat { key, value } => store.set_float(&key, value),
        Commands::Add { key, offset } => {
            store.add_int(&key, offset)?;
            writeln!(out, "{}", store.get_int(&key, 0)?)?;
        }
        Commands::Remove { key } => {
            if !store.remove(&key) {
                log::warn!("No record {:?} to remove", key);
            }
        }
        Commands::Reset => store.reset(),
        Commands::Dump => writeln!(out, "{}", store.snapshot())?,
        Commands::Path => writeln!(out, "{}", store.local_file_path().display())?,
    }

    Ok(())
}
