use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    if let Err(e) = execute_command(&cli).await {
        e.print_diagnostic();
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "turso=warn,tursoctl_core=warn",
            1 => "turso=info,tursoctl_core=info",
            2 => "turso=debug,tursoctl_core=debug",
            _ => "turso=trace,tursoctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli) -> Result<(), CliError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            commands::completion::generate_completions(*shell);
            Ok(())
        }
        Commands::Complete { kind } => {
            let mut conn_mgr = ConnectionManager::open(cli.settings_file.as_deref())?;
            commands::completion::handle_complete(*kind, &mut conn_mgr).await
        }
        Commands::Db(db_cmd) => {
            let mut conn_mgr = ConnectionManager::open(cli.settings_file.as_deref())?;
            commands::db::handle_db_command(db_cmd, &mut conn_mgr, cli.output).await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Format command for human-readable logging
fn format_command(command: &Commands) -> String {
    use cli::DbCommands::*;

    match command {
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Complete { kind } => format!("__complete {:?}", kind),
        Commands::Db(cmd) => match cmd {
            Create { name, region, .. } => format!(
                "db create {} (region: {})",
                name.as_deref().unwrap_or("<random>"),
                region.as_deref().unwrap_or("<closest>")
            ),
            Destroy {
                name,
                region,
                instance,
                ..
            } => format!(
                "db destroy {} (region: {:?}, instance: {:?})",
                name, region, instance
            ),
            Replicate { name, region, .. } => format!("db replicate {} {}", name, region),
            List => "db list".to_string(),
            Regions => "db regions".to_string(),
            Show { name, url } => format!("db show {} (url only: {})", name, url),
        },
    }
}
