//! CLI configuration -- thin wrapper around `rently_config`.
//!
//! Adds `GlobalOpts` awareness (--config, --timeout) on top of the
//! shared loader.

use std::path::PathBuf;

use rently_core::{Bridge, FileCredentialStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use rently_config::{Config, load_config, save_config};

/// Config file path: --config / RENTLY_CONFIG, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(rently_config::config_path)
}

/// Load config and apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(&config_path(global))?;
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    Ok(cfg)
}

/// Build a ready-to-use `Bridge` backed by the configured token files.
pub fn connect(global: &GlobalOpts) -> Result<Bridge<FileCredentialStore>, CliError> {
    let cfg = load(global)?;
    let bridge_config = rently_config::to_bridge_config(&cfg)?;
    let store = rently_config::credential_store(&cfg);
    Ok(Bridge::new(bridge_config, store)?)
}
