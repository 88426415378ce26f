//! Pushgate - push notification delivery and click routing.
//!
//! Main entry point for the Pushgate CLI and server.

mod cli;
mod cmd_config;
mod cmd_push;
mod server;

use clap::Parser;

use pushgate_config::{Config, ConfigLoader, HostKind};

use crate::cli::{Cli, Commands};

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(ConfigLoader::load_or_default(&cli.config)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(&cli)?;
            server::init_tracing(&config.logging)?;
            server::run_server(config).await
        }
        Some(Commands::Run {
            ref host,
            port,
            desktop,
        }) => {
            let mut config = load_config(&cli)?;
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if desktop {
                config.host.kind = HostKind::Desktop;
            }
            server::init_tracing(&config.logging)?;
            server::run_server(config).await
        }
        Some(Commands::Push(ref args)) => {
            let config = load_config(&cli)?;
            server::init_tracing(&config.logging)?;
            cmd_push::handle_push_command(args, &config).await
        }
        Some(Commands::Config { ref action }) => cmd_config::handle_config_command(action, &cli.config),
    }
}
