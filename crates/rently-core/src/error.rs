// ── Core error types ──
//
// User-facing errors from rently-core. Every variant is terminal for the
// operation that produced it; the only recovery is the single
// re-authentication retry inside `DeviceSession`. The
// `From<rently_api::Error>` impl translates transport-layer errors into
// this taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────
    /// A required input (account credentials, device id, hub token) is missing.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Credential errors ────────────────────────────────────────────
    /// Login endpoint rejected the account or answered without a token.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    /// Device endpoint rejected the credential again right after a fresh login.
    #[error("Device endpoint rejected a freshly issued credential (HTTP {status}): {body}")]
    Authorization { status: u16, body: String },

    // ── Request errors ───────────────────────────────────────────────
    /// Device endpoint rejected the request for a non-auth reason.
    #[error("Device request failed (HTTP {status}): {body}")]
    Request { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("Network failure: {message}")]
    Transport { message: String, timeout: bool },

    /// The response was not the JSON shape we rely on.
    #[error("Unexpected response: {message}")]
    ResponseFormat { message: String },

    // ── Input / state errors ─────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Credential storage failed at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Hub ──────────────────────────────────────────────────────────
    #[error("Hub service {service} failed (HTTP {status}): {body}")]
    Hub {
        service: String,
        status: u16,
        body: String,
    },
}

impl CoreError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rently_api::Error> for CoreError {
    fn from(err: rently_api::Error) -> Self {
        match err {
            rently_api::Error::Authentication { message, status } => {
                CoreError::Authentication { message, status }
            }
            rently_api::Error::Unauthorized { status, body } => {
                CoreError::Authorization { status, body }
            }
            rently_api::Error::Api { status, body } => CoreError::Request { status, body },
            rently_api::Error::Hub {
                service,
                status,
                body,
            } => CoreError::Hub {
                service,
                status,
                body,
            },
            rently_api::Error::Transport(e) if e.is_builder() => CoreError::Configuration {
                message: format!("could not build request: {e}"),
            },
            rently_api::Error::Transport(e) => CoreError::Transport {
                timeout: e.is_timeout(),
                message: e.to_string(),
            },
            rently_api::Error::InvalidUrl(e) => CoreError::Configuration {
                message: format!("Invalid URL: {e}"),
            },
            rently_api::Error::Tls(message) => CoreError::Configuration { message },
            rently_api::Error::Deserialization { message, body: _ } => {
                CoreError::ResponseFormat { message }
            }
        }
    }
}
