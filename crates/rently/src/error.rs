//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code per failure class.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use rently_config::ConfigError;
use rently_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const UPSTREAM: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const STORAGE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(rently::configuration),
        help(
            "Set RENTLY_EMAIL / RENTLY_PASSWORD, or edit the config file.\n\
             Run: rently config init"
        )
    )]
    Configuration { message: String },

    #[error(transparent)]
    #[diagnostic(code(rently::config))]
    Config(#[from] ConfigError),

    // ── Credentials ──────────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(rently::auth_failed),
        help("Verify the account email and password. Run: rently config set-password")
    )]
    AuthFailed { message: String },

    #[error("Access denied after a fresh login (HTTP {status}): {body}")]
    #[diagnostic(
        code(rently::forbidden),
        help("The account may no longer have access to this device. Check the device id.")
    )]
    Forbidden { status: u16, body: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Device request failed (HTTP {status}): {body}")]
    #[diagnostic(code(rently::request_failed))]
    RequestFailed { status: u16, body: String },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(rently::bad_response))]
    BadResponse { message: String },

    #[error("Home Assistant call {service} failed (HTTP {status}): {body}")]
    #[diagnostic(
        code(rently::hub_failed),
        help("Check the hub token and that the helper entities exist.")
    )]
    HubFailed {
        service: String,
        status: u16,
        body: String,
    },

    // ── Network ──────────────────────────────────────────────────────
    #[error("Connection failed: {message}")]
    #[diagnostic(code(rently::connection_failed))]
    ConnectionFailed { message: String },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(rently::timeout),
        help("Increase the timeout with --timeout or RENTLY_TIMEOUT.")
    )]
    Timeout { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(rently::validation))]
    Validation { field: String, reason: String },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Could not access credential file {}", path.display())]
    #[diagnostic(
        code(rently::storage),
        help("Check permissions on the token directory, or set tokens.raw / tokens.bearer.")
    )]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::RequestFailed { .. } | Self::BadResponse { .. } | Self::HubFailed { .. } => {
                exit_code::UPSTREAM
            }
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Storage { .. } => exit_code::STORAGE,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => Self::Configuration { message },
            CoreError::Authentication { message, .. } => Self::AuthFailed { message },
            CoreError::Authorization { status, body } => Self::Forbidden { status, body },
            CoreError::Request { status, body } => Self::RequestFailed { status, body },
            CoreError::ResponseFormat { message } => Self::BadResponse { message },
            CoreError::Transport {
                message,
                timeout: true,
            } => Self::Timeout { message },
            CoreError::Transport { message, .. } => Self::ConnectionFailed { message },
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::Storage { path, source } => Self::Storage { path, source },
            CoreError::Hub {
                service,
                status,
                body,
            } => Self::HubFailed {
                service,
                status,
                body,
            },
        }
    }
}
