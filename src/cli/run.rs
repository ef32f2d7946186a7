//! `run` subcommand: run the script for one appearance by hand

use std::path::Path;

use crate::error::Result;
use crate::runner::{RunOutcome, ScriptRunner};
use crate::storage::config::try_load_config;
use crate::storage::history::RunHistory;
use crate::theme::Appearance;

/// Run the script for `appearance` once, through the same path the watcher uses
pub async fn execute(config_path: &Path, appearance: Appearance) -> Result<RunOutcome> {
    let config = try_load_config(config_path)?;
    let runner = ScriptRunner::from_config(&config.runner)
        .with_history(RunHistory::beside_config(config_path));

    let (path, args) = config.scripts.script_for(appearance);
    let outcome = runner.run(appearance, path, args).await;
    println!("{}: {}", appearance, outcome.label());
    Ok(outcome)
}
