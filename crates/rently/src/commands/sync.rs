//! Hub sync handlers: `temperature` and `sync`.

use rently_core::{Bridge, CredentialStore, TemperatureReading};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn temperature_line(reading: &TemperatureReading) -> String {
    let t = &reading.temperature;
    format!(
        "Read status.room_temp={} ({}); wrote {} -> {}",
        t.reported,
        t.unit.conversion_note(),
        t.fahrenheit,
        reading.entity_id
    )
}

pub async fn temperature<S: CredentialStore>(
    bridge: &Bridge<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reading = bridge.read_temperature().await?;
    let out = output::render_single(global.output, &reading, temperature_line)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn full<S: CredentialStore>(
    bridge: &Bridge<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let target = bridge.sync_status().await?;
    let out = output::render_single(global.output, &target, |t| {
        format!(
            "Synced: mode={}, room_temp={}, setpoint={}",
            t.mode,
            t.current_temp.fahrenheit,
            t.setpoint_label()
        )
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rently_core::RoomTemperature;

    use super::*;

    #[test]
    fn temperature_line_notes_conversion() {
        let reading = TemperatureReading {
            temperature: RoomTemperature::infer(20.0),
            entity_id: "input_number.rently_current_temp".into(),
        };
        assert_eq!(
            temperature_line(&reading),
            "Read status.room_temp=20 (C->F); wrote 68 -> input_number.rently_current_temp"
        );
    }
}
