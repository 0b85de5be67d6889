//! Device command handlers: `thermostat` and `unlock`.

use serde::Serialize;

use rently_core::{Bridge, Commands, CredentialStore, ThermostatCommand};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// The payload as sent, for display.
#[derive(Serialize)]
struct Sent {
    commands: Commands,
}

pub async fn thermostat<S: CredentialStore>(
    bridge: &Bridge<S>,
    command: &ThermostatCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let sent = Sent {
        commands: bridge.set_thermostat(command).await?,
    };
    let payload = serde_json::to_string(&sent)?;
    let out = output::render_single(global.output, &sent, |_| {
        format!("Thermostat updated: {payload}")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn unlock<S: CredentialStore>(
    bridge: &Bridge<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let sent = Sent {
        commands: bridge.unlock().await?,
    };
    let out = output::render_single(global.output, &sent, |_| "Door unlock sent OK".into())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
