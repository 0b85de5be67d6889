use thiserror::Error;

/// Top-level error type for the `rently-api` crate.
///
/// Covers every failure mode across the three HTTP surfaces:
/// cloud login, cloud device endpoint, and hub service calls.
/// `rently-core` maps these into the user-facing taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login endpoint rejected the account credentials, or answered
    /// without a usable `access_token`.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    /// Device endpoint rejected the bearer credential (HTTP 401 or 403).
    #[error("Credential rejected by device endpoint (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    // ── Cloud API ───────────────────────────────────────────────────
    /// Any other non-success status from the device endpoint.
    #[error("Device API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    // ── Hub ─────────────────────────────────────────────────────────
    /// Hub service call answered with a non-2xx status.
    #[error("Hub service {service} failed (HTTP {status}): {body}")]
    Hub {
        service: String,
        status: u16,
        body: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the (truncated) raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the device endpoint rejected the credential
    /// and a fresh login might resolve it.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the transport error was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Cap a response body to at most `max` characters for error messages and logs.
pub fn truncate_body(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => body[..idx].to_owned(),
        None => body.to_owned(),
    }
}
