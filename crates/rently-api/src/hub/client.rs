// Home Assistant service-call client
//
// The hub is a collaborator: every call is a POST to
// `/api/services/{domain}/{service}` with a small JSON body and a
// long-lived bearer token. Any 2xx is success.

use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, truncate_body};
use crate::hub::models::{EntityOption, EntityTarget, EntityValue};
use crate::transport::TransportConfig;

/// Upstream bodies from the hub are capped at this many characters.
pub const HUB_BODY_PREVIEW: usize = 300;

/// Default hub base URL (Home Assistant on the same host).
pub const DEFAULT_HUB_URL: &str = "http://127.0.0.1:8123";

/// HTTP client for hub helper-entity service calls.
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl HubClient {
    pub fn new(base_url: Url, token: SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, token))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, token: SecretString) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Build `{base}/api/services/{service}` where `service` is `domain/name`.
    pub(crate) fn service_url(&self, service: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/services/{service}"))?)
    }

    /// Invoke a hub service with an arbitrary JSON body.
    pub async fn call_service(
        &self,
        service: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.service_url(service)?;
        debug!(service, "POST {}", url);

        let resp = self
            .http
            .post(url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        Err(Error::Hub {
            service: service.to_owned(),
            status: status.as_u16(),
            body: truncate_body(&text, HUB_BODY_PREVIEW),
        })
    }

    /// `input_number/set_value`
    pub async fn set_number(&self, entity_id: &str, value: f64) -> Result<(), Error> {
        self.call_service("input_number/set_value", &EntityValue { entity_id, value })
            .await
    }

    /// `input_select/select_option`
    pub async fn select_option(&self, entity_id: &str, option: &str) -> Result<(), Error> {
        self.call_service(
            "input_select/select_option",
            &EntityOption { entity_id, option },
        )
        .await
    }

    /// `input_boolean/turn_on`
    pub async fn turn_on(&self, entity_id: &str) -> Result<(), Error> {
        self.call_service("input_boolean/turn_on", &EntityTarget { entity_id })
            .await
    }

    /// `input_boolean/turn_off`
    pub async fn turn_off(&self, entity_id: &str) -> Result<(), Error> {
        self.call_service("input_boolean/turn_off", &EntityTarget { entity_id })
            .await
    }
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
