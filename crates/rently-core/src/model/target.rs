use std::fmt;

use serde::Serialize;

use crate::model::mode::ThermostatMode;
use crate::model::temperature::RoomTemperature;

/// Hub-side projection of a device status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncTarget {
    pub mode: ThermostatMode,
    pub current_temp: RoomTemperature,
    /// `None` leaves the hub's setpoint helper untouched.
    pub setpoint: Option<f64>,
}

impl SyncTarget {
    pub fn setpoint_label(&self) -> SetpointLabel {
        SetpointLabel(self.setpoint)
    }
}

/// Renders a setpoint or `unchanged`.
pub struct SetpointLabel(Option<f64>);

impl fmt::Display for SetpointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("unchanged"),
        }
    }
}

/// Outcome of a read-temperature-only sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReading {
    pub temperature: RoomTemperature,
    pub entity_id: String,
}
