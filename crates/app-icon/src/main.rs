//! App-Icon: desktop harness for switching app icons on a simulated host.

mod app;
mod app_command;
mod cli;
mod config;
mod error;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    cli::Cli,
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use app_icon_core::IconBridge;
use clap::Parser;
use tokio::io::BufReader;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "app_icon=debug,app_icon_core=debug"
    } else {
        "app_icon=info,app_icon_core=info"
    };

    // Results go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Some(manifest) = cli.manifest.clone() {
        config.manifest_path = Some(manifest);
    }

    let commands = match AppCommand::parse_all(&cli.commands) {
        Ok(commands) => commands,
        Err(e) => {
            error!("Invalid command line: {:?}", e);
            std::process::exit(2);
        }
    };

    let platform = match config.build_platform() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build icon host: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut app = App {
        bridge: IconBridge::new(platform),
        blocking: cli.blocking,
        out: std::io::stdout(),
    };

    let result = rt.block_on(async {
        if commands.is_empty() {
            app.run_interactive(BufReader::new(tokio::io::stdin())).await
        } else {
            app.run_commands(commands).await
        }
    });

    if let Err(e) = result {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
