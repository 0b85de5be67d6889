// ── Sync orchestrator ──
//
// Composes the credential store, device session, translator, and hub
// client into the user-facing operations. Each method performs its
// outbound calls strictly in sequence and returns a value the CLI can
// render as one outcome line.

use tracing::{debug, info, warn};

use rently_api::{CloudClient, Commands, HubClient, TransportConfig};

use crate::auth::Authenticator;
use crate::config::{BridgeConfig, DeviceIds, HubEntities};
use crate::error::CoreError;
use crate::model::{SyncTarget, TemperatureReading, ThermostatCommand, unlock_commands};
use crate::session::DeviceSession;
use crate::store::CredentialStore;
use crate::translate;

pub struct Bridge<S> {
    session: DeviceSession<S>,
    hub: Option<HubClient>,
    devices: DeviceIds,
    entities: HubEntities,
}

impl<S: CredentialStore> Bridge<S> {
    /// Build the HTTP clients described by `config` around `store`.
    pub fn new(config: BridgeConfig, store: S) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config.tls,
            timeout: config.timeout,
        };
        let cloud = CloudClient::new(config.login_url, config.api_base, &transport)?;
        let hub = config
            .hub
            .map(|hub| HubClient::new(hub.url, hub.token, &transport))
            .transpose()?;

        let auth = Authenticator::new(cloud.clone(), store, config.credentials);
        Ok(Self {
            session: DeviceSession::new(cloud, auth),
            hub,
            devices: config.devices,
            entities: config.entities,
        })
    }

    pub fn store(&self) -> &S {
        self.session.authenticator().store()
    }

    fn hub(&self) -> Result<&HubClient, CoreError> {
        self.hub
            .as_ref()
            .ok_or_else(|| CoreError::configuration("no hub token configured"))
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Read `status.room_temp`, normalize to °F, and push it to the hub.
    pub async fn read_temperature(&self) -> Result<TemperatureReading, CoreError> {
        let hub = self.hub()?;
        let device_id = self.devices.thermostat()?;

        let status = self.session.fetch_status(device_id).await?;
        let temperature = translate::room_temperature(&status)?;
        debug!(?temperature, "room temperature");

        hub.set_number(&self.entities.current_temp, temperature.fahrenheit)
            .await?;

        Ok(TemperatureReading {
            temperature,
            entity_id: self.entities.current_temp.clone(),
        })
    }

    /// Mirror mode, room temperature, and the active setpoint into the hub.
    ///
    /// Translation happens before any hub call, so an invalid status
    /// leaves the hub untouched. The syncing indicator is switched off
    /// on every path once it has been switched on.
    pub async fn sync_status(&self) -> Result<SyncTarget, CoreError> {
        let hub = self.hub()?;
        let device_id = self.devices.thermostat()?;

        let status = self.session.fetch_status(device_id).await?;
        let target = translate::translate(&status)?;

        self.while_syncing(hub, async || self.push_target(hub, &target).await)
            .await?;

        info!(mode = %target.mode, setpoint = %target.setpoint_label(), "synced");
        Ok(target)
    }

    /// Send a validated mode/setpoint command to the thermostat.
    pub async fn set_thermostat(&self, command: &ThermostatCommand) -> Result<Commands, CoreError> {
        let device_id = self.devices.thermostat()?;
        let commands = command.to_commands();
        self.session.send_commands(device_id, &commands).await?;
        Ok(commands)
    }

    /// Send the fixed unlock command to the lock.
    pub async fn unlock(&self) -> Result<Commands, CoreError> {
        let device_id = self.devices.lock()?;
        let commands = unlock_commands();
        self.session.send_commands(device_id, &commands).await?;
        Ok(commands)
    }

    /// Log in and rewrite both stored credential forms. No device call.
    pub async fn refresh_token(&self) -> Result<(), CoreError> {
        self.session.authenticator().authenticate().await?;
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    async fn push_target(&self, hub: &HubClient, target: &SyncTarget) -> Result<(), CoreError> {
        hub.set_number(&self.entities.current_temp, target.current_temp.fahrenheit)
            .await?;
        hub.select_option(&self.entities.mode, target.mode.as_ref())
            .await?;
        if let Some(setpoint) = target.setpoint {
            hub.set_number(&self.entities.setpoint, setpoint).await?;
        }
        Ok(())
    }

    /// Run `body` with the hub's syncing indicator switched on.
    ///
    /// If both `body` and the switch-off fail, the body's error wins and
    /// the cleanup failure is logged.
    async fn while_syncing<T>(
        &self,
        hub: &HubClient,
        body: impl AsyncFnOnce() -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        hub.turn_on(&self.entities.syncing).await?;

        let result = body().await;
        let released = hub.turn_off(&self.entities.syncing).await;

        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(cleanup)) => Err(cleanup.into()),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(cleanup)) => {
                warn!(error = %cleanup, "failed to switch off syncing indicator");
                Err(err)
            }
        }
    }
}
