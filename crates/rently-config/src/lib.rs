//! Configuration for the rently bridge.
//!
//! TOML file + `RENTLY_` environment layering, credential resolution
//! (env + keyring + plaintext), and translation to
//! `rently_core::BridgeConfig`. The CLI adds flag overrides on top.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use rently_core::{
    BridgeConfig, DeviceIds, FileCredentialStore, HubConfig, HubEntities, LoginCredentials,
    TlsMode,
};

/// Keyring service name for every secret this tool stores.
pub const KEYRING_SERVICE: &str = "rently-bridge";

const MASK: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub cloud: CloudConfig,

    #[serde(default)]
    pub tokens: TokenPaths,

    #[serde(default)]
    pub hub: HubSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            cloud: CloudConfig::default(),
            tokens: TokenPaths::default(),
            hub: HubSection::default(),
        }
    }
}

/// Rently cloud account and devices.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudConfig {
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Device API base; device URLs are `{api_base}devices/{id}`.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermostat_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<String>,

    /// Account email (`RENTLY_EMAIL` wins).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Account password (plaintext; prefer keyring or `RENTLY_PASSWORD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Extra CA certificate (PEM) to trust.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            api_base: default_api_base(),
            thermostat_id: None,
            lock_id: None,
            email: None,
            password: None,
            ca_cert: None,
        }
    }
}

/// Where the two credential representations live.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenPaths {
    /// Bare token, authoritative when present.
    #[serde(default = "default_raw_path")]
    pub raw: PathBuf,

    /// `Bearer <token>` for external readers.
    #[serde(default = "default_bearer_path")]
    pub bearer: PathBuf,
}

impl Default for TokenPaths {
    fn default() -> Self {
        Self {
            raw: default_raw_path(),
            bearer: default_bearer_path(),
        }
    }
}

/// Home Assistant connection and helper entities.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubSection {
    #[serde(default = "default_hub_url")]
    pub url: String,

    /// Long-lived access token (plaintext; prefer `token_file` or keyring).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// File holding the long-lived access token.
    #[serde(default = "default_hub_token_file")]
    pub token_file: PathBuf,

    #[serde(default)]
    pub entities: EntityIds,
}

impl Default for HubSection {
    fn default() -> Self {
        Self {
            url: default_hub_url(),
            token: None,
            token_file: default_hub_token_file(),
            entities: EntityIds::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityIds {
    #[serde(default = "default_syncing")]
    pub syncing: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_setpoint")]
    pub setpoint: String,
    #[serde(default = "default_current_temp")]
    pub current_temp: String,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self {
            syncing: default_syncing(),
            mode: default_mode(),
            setpoint: default_setpoint(),
            current_temp: default_current_temp(),
        }
    }
}

impl From<EntityIds> for HubEntities {
    fn from(ids: EntityIds) -> Self {
        Self {
            syncing: ids.syncing,
            mode: ids.mode,
            setpoint: ids.setpoint,
            current_temp: ids.current_temp,
        }
    }
}

fn default_timeout() -> u64 {
    20
}
fn default_login_url() -> String {
    rently_core::DEFAULT_LOGIN_URL.into()
}
fn default_api_base() -> String {
    rently_core::DEFAULT_API_BASE.into()
}
fn default_hub_url() -> String {
    rently_core::DEFAULT_HUB_URL.into()
}
fn default_raw_path() -> PathBuf {
    data_dir().join("rently_access_token_raw.txt")
}
fn default_bearer_path() -> PathBuf {
    data_dir().join("rently_access_token.txt")
}
fn default_hub_token_file() -> PathBuf {
    data_dir().join("ha_token.txt")
}
fn default_syncing() -> String {
    HubEntities::default().syncing
}
fn default_mode() -> String {
    HubEntities::default().mode
}
fn default_setpoint() -> String {
    HubEntities::default().setpoint
}
fn default_current_temp() -> String {
    HubEntities::default().current_temp
}

impl Config {
    /// Copy with every secret replaced by a mask, for display.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if shown.cloud.password.is_some() {
            shown.cloud.password = Some(MASK.into());
        }
        if shown.hub.token.is_some() {
            shown.hub.token = Some(MASK.into());
        }
        shown
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rently-bridge", "rently")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "rently", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for the credential files.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "rently"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; defaults and `RENTLY_*` variables
/// still apply. Nested keys use `__`, e.g. `RENTLY_CLOUD__THERMOSTAT_ID`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RENTLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str).map_err(|e| ConfigError::io(path, e))?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn password_entry(email: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(KEYRING_SERVICE, &format!("{email}/password"))?)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Store the account password for `email` in the system keyring.
pub fn store_password(email: &str, password: &str) -> Result<(), ConfigError> {
    password_entry(email)?.set_password(password)?;
    Ok(())
}

/// Resolve account credentials.
///
/// Email: `RENTLY_EMAIL` → config. Password: `RENTLY_PASSWORD` → keyring
/// → plaintext config. `None` when either half is missing; the
/// authenticator reports that as a configuration error when a login is
/// actually needed.
pub fn resolve_login_credentials(cfg: &Config) -> Option<LoginCredentials> {
    let email = non_empty(std::env::var("RENTLY_EMAIL").ok())
        .or_else(|| non_empty(cfg.cloud.email.clone()))?;

    // 1. Env var
    let password = non_empty(std::env::var("RENTLY_PASSWORD").ok())
        // 2. Keyring
        .or_else(|| {
            password_entry(&email)
                .ok()
                .and_then(|entry| entry.get_password().ok())
        })
        // 3. Plaintext in config
        .or_else(|| non_empty(cfg.cloud.password.clone()))?;

    Some(LoginCredentials::new(email, SecretString::from(password)))
}

/// Resolve the hub token: config/env value → token file → keyring.
pub fn resolve_hub_token(cfg: &Config) -> Result<Option<SecretString>, ConfigError> {
    if let Some(token) = non_empty(cfg.hub.token.clone()) {
        return Ok(Some(SecretString::from(token)));
    }

    let path = &cfg.hub.token_file;
    match std::fs::read_to_string(path) {
        Ok(text) => {
            if let Some(token) = non_empty(Some(text)) {
                return Ok(Some(SecretString::from(token)));
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ConfigError::io(path, e)),
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, "hub-token") {
        if let Ok(token) = entry.get_password() {
            return Ok(Some(SecretString::from(token)));
        }
    }

    Ok(None)
}

// ── Translation to core types ───────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })
}

/// File-backed credential store at the configured paths.
pub fn credential_store(cfg: &Config) -> FileCredentialStore {
    FileCredentialStore::new(&cfg.tokens.raw, &cfg.tokens.bearer)
}

/// Build a `BridgeConfig`, resolving secrets along the way.
///
/// A missing or unreadable hub token yields `hub: None`; only the
/// read/sync operations need it.
pub fn to_bridge_config(cfg: &Config) -> Result<BridgeConfig, ConfigError> {
    if cfg.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let login_url = parse_url("cloud.login_url", &cfg.cloud.login_url)?;
    let api_base = parse_url("cloud.api_base", &cfg.cloud.api_base)?;

    let token = resolve_hub_token(cfg).unwrap_or_else(|e| {
        warn!(error = %e, "hub token unavailable, hub sync disabled");
        None
    });
    let hub = match token {
        Some(token) => Some(HubConfig {
            url: parse_url("hub.url", &cfg.hub.url)?,
            token,
        }),
        None => None,
    };

    let tls = cfg
        .cloud
        .ca_cert
        .clone()
        .map_or(TlsMode::System, TlsMode::CustomCa);

    Ok(BridgeConfig {
        login_url,
        api_base,
        credentials: resolve_login_credentials(cfg),
        devices: DeviceIds {
            thermostat: non_empty(cfg.cloud.thermostat_id.clone()),
            lock: non_empty(cfg.cloud.lock_id.clone()),
        },
        hub,
        entities: cfg.hub.entities.clone().into(),
        tls,
        timeout: Duration::from_secs(cfg.timeout),
    })
}
