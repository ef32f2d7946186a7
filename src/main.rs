use clap::Parser;
use tracing_subscriber::EnvFilter;

use theme_script_runner::cli::{self, Cli, Commands};
use theme_script_runner::error::{Result, RunnerError};
use theme_script_runner::runner::RunOutcome;
use theme_script_runner::storage;

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = storage::config::config_path(cli.config.as_deref());

    let result: Result<bool> = match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => tokio::runtime::Runtime::new()
            .map_err(RunnerError::from)
            .and_then(|rt| rt.block_on(cli::watch::execute(&config_path)))
            .map(|()| true),
        Commands::Status => cli::status::execute(&config_path).map(|()| true),
        Commands::Run { appearance } => tokio::runtime::Runtime::new()
            .map_err(RunnerError::from)
            .and_then(|rt| rt.block_on(cli::run::execute(&config_path, appearance)))
            .map(|outcome| matches!(outcome, RunOutcome::Succeeded | RunOutcome::Unconfigured)),
        Commands::Config { action } => cli::config::execute(&config_path, action).map(|()| true),
        Commands::History { limit } => cli::history::execute(&config_path, limit).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
