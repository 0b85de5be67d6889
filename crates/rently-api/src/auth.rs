use std::fmt;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

/// Prefix that turns a raw token into an `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Account credentials for the cloud login endpoint.
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A bearer credential ready to be placed in an `Authorization` header.
///
/// Always holds the prefixed form (`"Bearer <token>"`). Construction from
/// stored text goes through `rently_core::store::normalize`; this type
/// only guarantees the secret never leaks through `Debug`.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a value that is already a complete header value.
    pub fn from_header_value(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Like [`from_header_value`](Self::from_header_value), but `None` when
    /// the text cannot travel in an HTTP header (embedded newlines or
    /// other control characters).
    pub fn try_from_header_value(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        HeaderValue::from_str(&value)
            .is_ok()
            .then(|| Self::from_header_value(value))
    }

    /// Build the bearer credential for a raw token.
    pub fn from_raw(raw: &str) -> Self {
        Self::from_header_value(format!("{BEARER_PREFIX}{raw}"))
    }

    /// The `Authorization` header value.
    pub fn header_value(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
