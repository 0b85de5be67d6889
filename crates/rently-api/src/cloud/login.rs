// Cloud login
//
// Exchanges account credentials for a bearer access token. One POST per
// call; no caching and no retry.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::LoginCredentials;
use crate::cloud::client::{CloudClient, LOGIN_BODY_PREVIEW};
use crate::cloud::models::{LoginRequest, LoginResponse};
use crate::error::{Error, truncate_body};

impl CloudClient {
    /// Log in with email/password and return the raw access token.
    ///
    /// Fails with [`Error::Authentication`] when the endpoint answers with a
    /// non-success status, a non-JSON body, or a body without a non-empty
    /// `access_token`. Network failures surface as [`Error::Transport`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<SecretString, Error> {
        debug!(url = %self.login_url(), "logging in");

        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };

        let resp = self
            .http()
            .post(self.login_url().clone())
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!(
                    "login failed (HTTP {status}): {}",
                    truncate_body(&text, LOGIN_BODY_PREVIEW)
                ),
                status: Some(status.as_u16()),
            });
        }

        let parsed: LoginResponse = serde_json::from_str(&text).map_err(|_| Error::Authentication {
            message: format!(
                "login returned non-JSON: {}",
                truncate_body(&text, LOGIN_BODY_PREVIEW)
            ),
            status: Some(status.as_u16()),
        })?;

        let token = parsed
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: format!(
                    "no access_token in response: {}",
                    truncate_body(&text, LOGIN_BODY_PREVIEW)
                ),
                status: Some(status.as_u16()),
            })?;

        debug!("login successful");
        Ok(SecretString::from(token.to_owned()))
    }
}
