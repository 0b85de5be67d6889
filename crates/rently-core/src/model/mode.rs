use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::error::CoreError;

/// Thermostat operating mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThermostatMode {
    Cool,
    Heat,
    Off,
}

impl ThermostatMode {
    /// Parse user or device input: trimmed, case-insensitive.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        text.trim().parse().map_err(|_| {
            CoreError::validation("mode", format!("expected cool, heat, or off, got {text:?}"))
        })
    }

    pub fn is_off(self) -> bool {
        self == Self::Off
    }
}
