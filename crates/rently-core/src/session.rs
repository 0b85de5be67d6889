// ── Resilient device client ──
//
// Every device request runs at most twice: once with the current
// credential and, if the endpoint answers 401/403, once more after a
// single fresh login. A second rejection is terminal. Other failures are
// never retried here.

use tracing::{debug, info};

use rently_api::{AccessToken, CloudClient, Commands, DeviceStatus};

use crate::auth::Authenticator;
use crate::error::CoreError;
use crate::store::CredentialStore;

pub struct DeviceSession<S> {
    cloud: CloudClient,
    auth: Authenticator<S>,
}

impl<S: CredentialStore> DeviceSession<S> {
    pub fn new(cloud: CloudClient, auth: Authenticator<S>) -> Self {
        Self { cloud, auth }
    }

    pub fn authenticator(&self) -> &Authenticator<S> {
        &self.auth
    }

    /// `GET` the device status.
    pub async fn fetch_status(&self, device_id: &str) -> Result<DeviceStatus, CoreError> {
        self.with_reauth(async |token: &AccessToken| {
            self.cloud.device_status(device_id, token).await
        })
        .await
    }

    /// `PUT` a command payload.
    pub async fn send_commands(&self, device_id: &str, commands: &Commands) -> Result<(), CoreError> {
        self.with_reauth(async |token: &AccessToken| {
            self.cloud.send_commands(device_id, token, commands).await
        })
        .await
    }

    async fn with_reauth<T>(
        &self,
        request: impl AsyncFn(&AccessToken) -> Result<T, rently_api::Error>,
    ) -> Result<T, CoreError> {
        let token = self.auth.credential().await?;

        match request(&token).await {
            Err(rently_api::Error::Unauthorized { status, .. }) => {
                info!(status, "credential rejected, logging in and retrying once");
                let fresh = self.auth.authenticate().await?;
                // A second 401/403 maps to CoreError::Authorization.
                let result = request(&fresh).await.map_err(CoreError::from);
                debug!(ok = result.is_ok(), "retry finished");
                result
            }
            other => other.map_err(CoreError::from),
        }
    }
}
