//! Command-line interface

pub mod config;
pub mod history;
pub mod run;
pub mod status;
pub mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::theme::Appearance;

#[derive(Parser)]
#[command(name = "theme-script-runner")]
#[command(version)]
#[command(about = "Run a script whenever the system switches between light and dark mode")]
pub struct Cli {
    /// Config file (defaults to $THEME_SCRIPT_RUNNER_CONFIG, then ~/.theme-script-runner/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch for appearance changes and run the configured scripts (default)
    Watch,
    /// Show the current appearance and the configured scripts
    Status,
    /// Run the script configured for one appearance right now
    Run {
        #[arg(value_enum)]
        appearance: Appearance,
    },
    /// Inspect or edit the configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Show recent script runs
    History {
        /// Number of runs to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}
