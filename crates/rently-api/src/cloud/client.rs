// Cloud API HTTP client
//
// Wraps `reqwest::Client` with the two Rently endpoints: the OAuth login
// URL and the device API base. Login and device calls are implemented as
// inherent methods in sibling files; this module owns URL construction
// and response-status classification.

use tracing::trace;
use url::Url;

use crate::error::{Error, truncate_body};
use crate::transport::TransportConfig;

/// Upstream bodies from the login endpoint are capped at this many characters.
pub const LOGIN_BODY_PREVIEW: usize = 400;
/// Upstream bodies from the device endpoint are capped at this many characters.
pub const DEVICE_BODY_PREVIEW: usize = 500;

/// Default OAuth login endpoint.
pub const DEFAULT_LOGIN_URL: &str = "https://remotapp.rently.com/oauth/token";
/// Default device API base; device URLs are `{base}devices/{id}`.
pub const DEFAULT_API_BASE: &str = "https://app2.keyless.rocks/api/";

/// Raw HTTP client for the Rently cloud.
///
/// Performs exactly one HTTP call per method invocation. Credential
/// refresh and retry live in `rently-core`; this client only reports
/// a rejected credential as [`Error::Unauthorized`].
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    login_url: Url,
    api_base: Url,
}

impl CloudClient {
    /// Create a new cloud client from a `TransportConfig`.
    pub fn new(login_url: Url, api_base: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, login_url, api_base))
    }

    /// Create a cloud client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, login_url: Url, api_base: Url) -> Self {
        Self {
            http,
            login_url,
            api_base: with_trailing_slash(api_base),
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The OAuth login endpoint.
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Build the URL for a single device: `{api_base}devices/{device_id}`.
    pub fn device_url(&self, device_id: &str) -> Result<Url, Error> {
        Ok(self.api_base.join(&format!("devices/{device_id}"))?)
    }

    /// Classify a device endpoint response. 401/403 become
    /// [`Error::Unauthorized`], any other non-success [`Error::Api`].
    pub(crate) async fn check_device_status(
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let body = truncate_body(&body, DEVICE_BODY_PREVIEW);
        trace!(status = status.as_u16(), "device endpoint returned error");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized {
                status: status.as_u16(),
                body,
            });
        }

        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// `Url::join` drops the last path segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
