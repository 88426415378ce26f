//! CLI definitions for Pushgate.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pushgate CLI.
#[derive(Parser)]
#[command(name = "pushgate")]
#[command(about = "Push notification delivery and click routing worker")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the worker and its HTTP bridge in foreground (default)
    Run {
        /// Bridge host (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Bridge port (overrides [server].port)
        #[arg(long)]
        port: Option<u16>,

        /// Deliver to the desktop instead of the in-memory tray
        #[arg(long)]
        desktop: bool,
    },

    /// Deliver one push payload to the desktop
    Push(PushArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct PushArgs {
    /// Notification title
    #[arg(long)]
    pub title: Option<String>,

    /// Notification body
    #[arg(long)]
    pub body: Option<String>,

    /// Path to open when the notification is clicked
    #[arg(long)]
    pub click_action: Option<String>,

    /// JSON file holding a full push payload; flags above override its data
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Load and validate the configuration file
    Check,

    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["pushgate"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_run_overrides() {
        let cli =
            Cli::try_parse_from(["pushgate", "run", "--port", "9000", "--desktop"]).unwrap();
        match cli.command {
            Some(Commands::Run {
                host,
                port,
                desktop,
            }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
                assert!(desktop);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_push_args() {
        let cli = Cli::try_parse_from([
            "pushgate",
            "push",
            "--title",
            "Hello",
            "--click-action",
            "/chat/1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Push(args)) => {
                assert_eq!(args.title.as_deref(), Some("Hello"));
                assert_eq!(args.click_action.as_deref(), Some("/chat/1"));
                assert!(args.body.is_none());
            }
            _ => panic!("expected push"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["pushgate", "config", "check", "-c", "other.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Check
            })
        ));
    }
}
