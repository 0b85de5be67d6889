use std::ops::RangeInclusive;

use serde::Serialize;

/// Raw readings inside this range are taken to be Celsius.
///
/// Lossy: a genuine 20–45 °F reading is misread as Celsius. The device
/// reports no unit, so the range is the only signal available.
pub const CELSIUS_RANGE: RangeInclusive<f64> = -10.0..=45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short marker for outcome lines: `C->F` when converted, `F` otherwise.
    pub fn conversion_note(self) -> &'static str {
        match self {
            Self::Celsius => "C->F",
            Self::Fahrenheit => "F",
        }
    }
}

/// A room temperature with its inferred unit and the °F value to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomTemperature {
    /// Value as reported by the device.
    pub reported: f64,
    pub unit: TemperatureUnit,
    pub fahrenheit: f64,
}

impl RoomTemperature {
    pub fn infer(reported: f64) -> Self {
        if CELSIUS_RANGE.contains(&reported) {
            Self {
                reported,
                unit: TemperatureUnit::Celsius,
                fahrenheit: celsius_to_fahrenheit(reported),
            }
        } else {
            Self {
                reported,
                unit: TemperatureUnit::Fahrenheit,
                fahrenheit: reported,
            }
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
