//! Subcommand handlers. Each prints one outcome through `output`.

pub mod config_cmd;
pub mod device;
pub mod refresh;
pub mod sync;

use clap::CommandFactory;
use rently_core::ThermostatCommand;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Run one subcommand to completion.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Temperature => sync::temperature(&config::connect(global)?, global).await,
        Command::Sync => sync::full(&config::connect(global)?, global).await,
        Command::Thermostat(args) => {
            // Bad arguments fail before any config or network access.
            let command = ThermostatCommand::parse(&args.setpoint, &args.mode)?;
            device::thermostat(&config::connect(global)?, &command, global).await
        }
        Command::Unlock => device::unlock(&config::connect(global)?, global).await,
        Command::Refresh => refresh::handle(&config::connect(global)?, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "rently",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
