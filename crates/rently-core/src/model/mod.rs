pub mod command;
pub mod mode;
pub mod target;
pub mod temperature;

pub use command::{ThermostatCommand, UNLOCK_MODE, unlock_commands};
pub use mode::ThermostatMode;
pub use target::{SyncTarget, TemperatureReading};
pub use temperature::{CELSIUS_RANGE, RoomTemperature, TemperatureUnit};
