// ── Authenticator ──
//
// Exchanges account credentials for a fresh access token and persists it
// through the credential store. No caching beyond the store: every call
// is a real login round-trip.

use secrecy::ExposeSecret;
use tracing::{debug, info};

use rently_api::{AccessToken, CloudClient, LoginCredentials};

use crate::error::CoreError;
use crate::store::{self, CredentialStore};

pub struct Authenticator<S> {
    cloud: CloudClient,
    store: S,
    credentials: Option<LoginCredentials>,
}

impl<S: CredentialStore> Authenticator<S> {
    pub fn new(cloud: CloudClient, store: S, credentials: Option<LoginCredentials>) -> Self {
        Self {
            cloud,
            store,
            credentials,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in, persist both token forms, and return the bearer credential.
    ///
    /// Missing email or password is a [`CoreError::Configuration`] and no
    /// request is made.
    pub async fn authenticate(&self) -> Result<AccessToken, CoreError> {
        let credentials = self
            .credentials
            .as_ref()
            .filter(|c| !c.email.trim().is_empty() && !c.password.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                CoreError::configuration(
                    "account email and password are required for login (RENTLY_EMAIL / RENTLY_PASSWORD)",
                )
            })?;

        let raw = self.cloud.login(credentials).await?;
        self.store.write(raw.expose_secret())?;
        info!("obtained and stored a fresh access token");

        Ok(AccessToken::from_header_value(store::normalize(
            raw.expose_secret(),
        )))
    }

    /// Stored credential if any, otherwise a fresh login.
    pub async fn credential(&self) -> Result<AccessToken, CoreError> {
        if let Some(token) = store::current_token(&self.store)? {
            debug!("using stored access token");
            return Ok(token);
        }
        debug!("no stored access token, logging in");
        self.authenticate().await
    }
}
