// ── Status translation ──
//
// Cloud device status → hub-ready values. Mode is validated before
// anything else so garbage state is never mirrored.

use rently_api::DeviceStatus;

use crate::error::CoreError;
use crate::model::{RoomTemperature, SyncTarget, ThermostatMode};

/// Extract and unit-normalize `status.room_temp`.
pub fn room_temperature(status: &DeviceStatus) -> Result<RoomTemperature, CoreError> {
    let reported = status.room_temp().ok_or_else(|| CoreError::ResponseFormat {
        message: "missing expected field: status.room_temp".into(),
    })?;
    Ok(RoomTemperature::infer(reported))
}

pub fn translate(status: &DeviceStatus) -> Result<SyncTarget, CoreError> {
    let mode = ThermostatMode::parse(status.mode.as_deref().unwrap_or_default())?;
    let current_temp = room_temperature(status)?;

    // Off keeps the hub's setpoint helper where it is.
    let setpoint = match mode {
        ThermostatMode::Cool => status.cooling_setpoint(),
        ThermostatMode::Heat => status.heating_setpoint(),
        ThermostatMode::Off => None,
    };

    Ok(SyncTarget {
        mode,
        current_temp,
        setpoint,
    })
}
