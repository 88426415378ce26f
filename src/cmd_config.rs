//! Configuration command handlers.

use std::path::Path;

use pushgate_config::{ConfigLoader, ConfigValidator};

use crate::cli::ConfigAction;

/// Handle `config` subcommands.
pub(crate) fn handle_config_command(
    action: &ConfigAction,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;

    match action {
        ConfigAction::Check => {
            let result = ConfigValidator::validate(&config)?;

            if !path.exists() {
                println!("{} not found, checked built-in defaults", path.display());
            }
            for warning in &result.warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            for error in &result.errors {
                println!("error: {}: {}", error.path, error.message);
            }

            result.ensure_valid()?;
            println!("Configuration OK ({} warning(s))", result.warnings.len());
            Ok(())
        }
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
