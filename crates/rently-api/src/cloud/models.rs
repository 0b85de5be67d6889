// Wire models for the Rently cloud endpoints.
//
// The device endpoint is loosely typed: every status field may be absent,
// and numeric fields show up both as JSON numbers and numeric strings.
// These structs stay permissive; `rently-core` validates them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /oauth/token` request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /oauth/token` response. Only `access_token` is consumed.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// `GET /devices/{id}` response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceResponse {
    #[serde(default)]
    pub status: Option<DeviceStatus>,
}

/// Raw thermostat status as reported by the cloud.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub room_temp: Option<Value>,
    #[serde(default)]
    pub cooling_setpoint: Option<Value>,
    #[serde(default)]
    pub heating_setpoint: Option<Value>,
}

impl DeviceStatus {
    /// Read a numeric field that may be encoded as a number or a numeric string.
    ///
    /// Returns `None` for absent, `null`, or non-numeric values.
    pub fn number(value: Option<&Value>) -> Option<f64> {
        match value? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn room_temp(&self) -> Option<f64> {
        Self::number(self.room_temp.as_ref())
    }

    pub fn cooling_setpoint(&self) -> Option<f64> {
        Self::number(self.cooling_setpoint.as_ref())
    }

    pub fn heating_setpoint(&self) -> Option<f64> {
        Self::number(self.heating_setpoint.as_ref())
    }
}

/// Device command payload, sent as `{"commands": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commands {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<i32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommandRequest<'a> {
    pub commands: &'a Commands,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_accept_numeric_strings() {
        let status: DeviceStatus = serde_json::from_value(json!({
            "mode": "cool",
            "room_temp": "72.5",
            "cooling_setpoint": 74,
        }))
        .unwrap();

        assert_eq!(status.room_temp(), Some(72.5));
        assert_eq!(status.cooling_setpoint(), Some(74.0));
        assert_eq!(status.heating_setpoint(), None);
    }

    #[test]
    fn numbers_reject_garbage() {
        assert_eq!(DeviceStatus::number(Some(&json!("warm"))), None);
        assert_eq!(DeviceStatus::number(Some(&json!(null))), None);
        assert_eq!(DeviceStatus::number(Some(&json!(true))), None);
    }

    #[test]
    fn off_commands_omit_setpoint() {
        let commands = Commands {
            mode: "off".into(),
            setpoint: None,
        };
        let body = serde_json::to_value(CommandRequest {
            commands: &commands,
        })
        .unwrap();
        assert_eq!(body, json!({ "commands": { "mode": "off" } }));
    }
}
