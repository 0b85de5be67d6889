use serde::Serialize;

use rently_api::Commands;

use crate::error::CoreError;
use crate::model::mode::ThermostatMode;

/// Mode sent to the lock device to open it.
pub const UNLOCK_MODE: &str = "unlock";

/// A validated thermostat command.
///
/// `setpoint` is present exactly when `mode` is not `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThermostatCommand {
    mode: ThermostatMode,
    setpoint: Option<i32>,
}

impl ThermostatCommand {
    /// Validate `mode` first, then (for non-off modes) parse `setpoint`
    /// as a number and round it to the nearest integer, ties to even.
    ///
    /// The setpoint text is ignored entirely for `off`.
    pub fn parse(setpoint: &str, mode: &str) -> Result<Self, CoreError> {
        let mode = ThermostatMode::parse(mode)?;
        if mode.is_off() {
            return Ok(Self {
                mode,
                setpoint: None,
            });
        }
        Ok(Self {
            mode,
            setpoint: Some(parse_setpoint(setpoint)?),
        })
    }

    pub fn mode(&self) -> ThermostatMode {
        self.mode
    }

    pub fn setpoint(&self) -> Option<i32> {
        self.setpoint
    }

    pub fn to_commands(&self) -> Commands {
        Commands {
            mode: self.mode.to_string(),
            setpoint: self.setpoint,
        }
    }
}

/// The fixed lock command.
pub fn unlock_commands() -> Commands {
    Commands {
        mode: UNLOCK_MODE.into(),
        setpoint: None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn parse_setpoint(text: &str) -> Result<i32, CoreError> {
    let invalid = || CoreError::validation("setpoint", format!("not a number: {text:?}"));
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return Err(invalid());
    }
    // Range checked above.
    Ok(rounded as i32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rounds_to_nearest_integer() {
        assert_eq!(ThermostatCommand::parse("72.4", "cool").unwrap().setpoint(), Some(72));
        assert_eq!(ThermostatCommand::parse(" 71.6 ", "heat").unwrap().setpoint(), Some(72));
        assert_eq!(ThermostatCommand::parse("68", "HEAT").unwrap().setpoint(), Some(68));
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(ThermostatCommand::parse("72.5", "cool").unwrap().setpoint(), Some(72));
        assert_eq!(ThermostatCommand::parse("73.5", "cool").unwrap().setpoint(), Some(74));
    }

    #[test]
    fn off_ignores_setpoint_text() {
        let cmd = ThermostatCommand::parse("not-a-number", " Off ").unwrap();
        assert_eq!(cmd.mode(), ThermostatMode::Off);
        assert_eq!(cmd.setpoint(), None);
        assert_eq!(
            cmd.to_commands(),
            Commands {
                mode: "off".into(),
                setpoint: None
            }
        );
    }

    #[test]
    fn bad_setpoint_is_validation_error() {
        for bad in ["", "warm", "nan", "inf", "1e12"] {
            let err = ThermostatCommand::parse(bad, "cool").unwrap_err();
            assert!(
                matches!(err, CoreError::Validation { ref field, .. } if field == "setpoint"),
                "{bad:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn mode_is_validated_before_setpoint() {
        let err = ThermostatCommand::parse("warm", "auto").unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "mode"));
    }

    #[test]
    fn unlock_has_no_setpoint() {
        assert_eq!(
            serde_json::to_value(unlock_commands()).unwrap(),
            serde_json::json!({ "mode": "unlock" })
        );
    }
}
