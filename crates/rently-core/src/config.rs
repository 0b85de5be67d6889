// ── Runtime bridge configuration ──
//
// These types describe *where* to talk to and *which* hub entities to
// mirror into. They carry credential data and connection tuning, but
// never touch disk. The CLI constructs a `BridgeConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use rently_api::{DEFAULT_API_BASE, DEFAULT_LOGIN_URL, LoginCredentials, TlsMode};

use crate::error::CoreError;

/// Cloud device identifiers. Each operation needs only one of them.
#[derive(Debug, Clone, Default)]
pub struct DeviceIds {
    pub thermostat: Option<String>,
    pub lock: Option<String>,
}

impl DeviceIds {
    pub fn thermostat(&self) -> Result<&str, CoreError> {
        self.thermostat
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::configuration("no thermostat device id configured"))
    }

    pub fn lock(&self) -> Result<&str, CoreError> {
        self.lock
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::configuration("no lock device id configured"))
    }
}

/// Hub connection. Only the read/sync operations need it.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub url: Url,
    pub token: SecretString,
}

/// Hub helper entities the bridge writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubEntities {
    /// `input_boolean` held on while a full sync is pushing values.
    pub syncing: String,
    /// `input_select` mirroring the thermostat mode.
    pub mode: String,
    /// `input_number` mirroring the active setpoint.
    pub setpoint: String,
    /// `input_number` mirroring the room temperature in °F.
    pub current_temp: String,
}

impl Default for HubEntities {
    fn default() -> Self {
        Self {
            syncing: "input_boolean.rently_syncing".into(),
            mode: "input_select.rently_thermostat_mode".into(),
            setpoint: "input_number.rently_thermostat_setpoint".into(),
            current_temp: "input_number.rently_current_temp".into(),
        }
    }
}

/// Everything `Bridge` needs to run one operation.
///
/// Built by the CLI, passed to `Bridge` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// OAuth login endpoint.
    pub login_url: Url,
    /// Device API base (`{base}devices/{id}`).
    pub api_base: Url,
    /// Account credentials; `None` means login is impossible.
    pub credentials: Option<LoginCredentials>,
    pub devices: DeviceIds,
    pub hub: Option<HubConfig>,
    pub entities: HubEntities,
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Config pointing at the production endpoints with nothing else set.
    pub fn new() -> Result<Self, CoreError> {
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|e| CoreError::configuration(format!("invalid URL {raw}: {e}")))
        };
        Ok(Self {
            login_url: parse(DEFAULT_LOGIN_URL)?,
            api_base: parse(DEFAULT_API_BASE)?,
            credentials: None,
            devices: DeviceIds::default(),
            hub: None,
            entities: HubEntities::default(),
            tls: TlsMode::default(),
            timeout: rently_api::DEFAULT_TIMEOUT,
        })
    }
}
