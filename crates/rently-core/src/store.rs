//! Credential storage.
//!
//! One logical secret, two persisted forms: the raw token and the
//! `"Bearer "`-prefixed header value. The bearer file exists for external
//! readers; when both are present the raw form wins and is normalized
//! fresh, so a stale or hand-edited bearer file is harmless.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use rently_api::{AccessToken, BEARER_PREFIX};

use crate::error::CoreError;

/// Which persisted representation to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare token as issued by the login endpoint.
    Raw,
    /// `"Bearer " + raw`.
    Bearer,
}

/// Storage for the cloud credential.
///
/// `read` returns an empty string when nothing is stored; absence is the
/// normal "unauthenticated" state, not an error.
pub trait CredentialStore {
    fn read(&self, kind: TokenKind) -> Result<String, CoreError>;

    /// Persist `raw_token` verbatim and its bearer form. Both must succeed.
    fn write(&self, raw_token: &str) -> Result<(), CoreError>;
}

/// Turn stored text into an `Authorization` header value.
///
/// Empty in, empty out. Text already carrying a (case-insensitive)
/// `"Bearer "` prefix is returned as-is; anything else gets the prefix.
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let prefixed = text
        .get(..BEARER_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(BEARER_PREFIX));
    if prefixed {
        text.to_owned()
    } else {
        format!("{BEARER_PREFIX}{text}")
    }
}

/// The credential to use right now, or `None` if nothing usable is stored.
///
/// The raw form is authoritative; the bearer form is the fallback. Text
/// that cannot be sent as a header counts as absent so the caller logs in
/// again and overwrites it.
pub fn current_token(store: &impl CredentialStore) -> Result<Option<AccessToken>, CoreError> {
    let raw = store.read(TokenKind::Raw)?;
    let value = if raw.is_empty() {
        normalize(&store.read(TokenKind::Bearer)?)
    } else {
        normalize(&raw)
    };
    if value.is_empty() {
        return Ok(None);
    }
    let token = AccessToken::try_from_header_value(value);
    if token.is_none() {
        warn!("stored credential is not a valid header value, ignoring it");
    }
    Ok(token)
}

// ── File-backed store ────────────────────────────────────────────────

/// Two plaintext files on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    raw_path: PathBuf,
    bearer_path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(raw_path: impl Into<PathBuf>, bearer_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            bearer_path: bearer_path.into(),
        }
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn bearer_path(&self) -> &Path {
        &self.bearer_path
    }

    fn path(&self, kind: TokenKind) -> &Path {
        match kind {
            TokenKind::Raw => &self.raw_path,
            TokenKind::Bearer => &self.bearer_path,
        }
    }

    fn write_file(path: &Path, contents: &str) -> Result<(), CoreError> {
        let storage_err = |source| CoreError::Storage {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }
        std::fs::write(path, contents).map_err(storage_err)
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self, kind: TokenKind) -> Result<String, CoreError> {
        let path = self.path(kind);
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(text.trim().to_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(CoreError::Storage {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write(&self, raw_token: &str) -> Result<(), CoreError> {
        Self::write_file(&self.raw_path, raw_token)?;
        Self::write_file(&self.bearer_path, &format!("{BEARER_PREFIX}{raw_token}"))?;
        debug!(
            raw = %self.raw_path.display(),
            bearer = %self.bearer_path.display(),
            "credential files written"
        );
        Ok(())
    }
}

// ── In-memory store ──────────────────────────────────────────────────

/// Process-local store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<HashMap<TokenKind, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a single representation, leaving the other untouched.
    pub fn with(self, kind: TokenKind, text: impl Into<String>) -> Self {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, text.into());
        self
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self, kind: TokenKind) -> Result<String, CoreError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(&kind).map(|s| s.trim().to_owned()).unwrap_or_default())
    }

    fn write(&self, raw_token: &str) -> Result<(), CoreError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(TokenKind::Raw, raw_token.to_owned());
        slots.insert(TokenKind::Bearer, format!("{BEARER_PREFIX}{raw_token}"));
        Ok(())
    }
}
