// Device endpoint: status reads and command writes.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::debug;

use crate::auth::AccessToken;
use crate::cloud::client::{CloudClient, DEVICE_BODY_PREVIEW};
use crate::cloud::models::{CommandRequest, Commands, DeviceResponse, DeviceStatus};
use crate::error::{Error, truncate_body};

impl CloudClient {
    /// `GET /devices/{id}` and return the device's `status` object.
    ///
    /// A missing `status` key yields an empty [`DeviceStatus`]; field-level
    /// validation is the caller's job. Non-JSON bodies are
    /// [`Error::Deserialization`].
    pub async fn device_status(
        &self,
        device_id: &str,
        token: &AccessToken,
    ) -> Result<DeviceStatus, Error> {
        let url = self.device_url(device_id)?;
        debug!("GET {}", url);

        let resp = self
            .http()
            .get(url)
            .header(AUTHORIZATION, token.header_value())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = Self::check_device_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        let parsed: DeviceResponse = serde_json::from_str(&body).map_err(|e| {
            let preview = truncate_body(&body, DEVICE_BODY_PREVIEW);
            Error::Deserialization {
                message: format!("device returned non-JSON: {e} (body preview: {preview:?})"),
                body: preview,
            }
        })?;

        Ok(parsed.status.unwrap_or_default())
    }

    /// `PUT /devices/{id}` with `{"commands": ...}`.
    ///
    /// Success is any 2xx; the response body is not inspected.
    pub async fn send_commands(
        &self,
        device_id: &str,
        token: &AccessToken,
        commands: &Commands,
    ) -> Result<(), Error> {
        let url = self.device_url(device_id)?;
        debug!(mode = %commands.mode, "PUT {}", url);

        let resp = self
            .http()
            .put(url)
            .header(AUTHORIZATION, token.header_value())
            .header(ACCEPT, "application/json")
            .json(&CommandRequest { commands })
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_device_status(resp).await?;
        Ok(())
    }
}
