//! menumorpher entry point.

use std::process::ExitCode;

use clap::Parser;

use menumorpher_core::{TracingConfig, init_tracing};
use menumorpher_server::ServerConfig;
use menumorpher_server::ServerResult;
use menumorpher_server::cli::{Cli, Command, ConfigAction};
use menumorpher_server::commands;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::server()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    let mut config = ServerConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::dump(&config),
            ConfigAction::Validate => commands::validate(&config),
            ConfigAction::Path => commands::path(),
        },
        None => menumorpher_server::serve(&config).await,
    }
}
