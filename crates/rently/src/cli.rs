//! Clap derive structures for the `rently` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rently -- bridge a Rently thermostat and lock into Home Assistant
#[derive(Debug, Parser)]
#[command(
    name = "rently",
    version,
    about = "Bridge a Rently thermostat and smart lock into Home Assistant",
    long_about = "Reads thermostat status from the Rently cloud, mirrors it into\n\
        Home Assistant helper entities, and sends thermostat and unlock commands.\n\n\
        Access tokens are cached on disk and refreshed automatically when the\n\
        cloud rejects them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "RENTLY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RENTLY_OUTPUT",
        default_value = "plain",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable outcome line
    Plain,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read the room temperature and push it to Home Assistant
    #[command(alias = "temp")]
    Temperature,

    /// Mirror mode, room temperature, and setpoint into Home Assistant
    Sync,

    /// Set thermostat mode and setpoint
    Thermostat(ThermostatArgs),

    /// Unlock the door
    Unlock,

    /// Log in and store a fresh access token
    Refresh,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ThermostatArgs {
    /// Target temperature in °F; rounded to a whole degree, ignored for `off`
    #[arg(allow_hyphen_values = true)]
    pub setpoint: String,

    /// cool, heat, or off
    pub mode: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Store the account password in the system keyring
    SetPassword {
        /// Account email (defaults to RENTLY_EMAIL or the configured email)
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
