//! Config subcommand handlers.

use rently_config::ConfigError;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let shown = config::load(global)?.redacted();
            let text = toml::to_string_pretty(&shown).map_err(ConfigError::from)?;
            let out = output::render_single(global.output, &shown, |_| {
                text.trim_end().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            let path = config::config_path(global);
            let out = output::render_single(global.output, &path, |p| p.display().to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ),
                });
            }
            config::save_config(&Config::default(), &path)?;
            eprintln!("✓ Configuration written to {}", path.display());
            eprintln!("  Next: set cloud.thermostat_id and run: rently config set-password");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { email } => {
            let email = match non_empty(email) {
                Some(email) => email,
                None => non_empty(std::env::var("RENTLY_EMAIL").ok())
                    .or_else(|| config::load(global).ok().and_then(|c| c.cloud.email))
                    .ok_or_else(|| CliError::Validation {
                        field: "email".into(),
                        reason: "pass --email, set RENTLY_EMAIL, or set cloud.email".into(),
                    })?,
            };

            let password = rpassword::prompt_password(format!("Password for {email}: "))?;
            if password.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            rently_config::store_password(&email, password.trim())?;
            eprintln!("✓ Password stored in system keyring for {email}");
            Ok(())
        }
    }
}
