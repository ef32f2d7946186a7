//! `status` subcommand: current appearance and script configuration check

use std::path::Path;

use crate::error::Result;
use crate::runner::{build_command, expand_home, validate_script};
use crate::storage::config::{try_load_config, ScriptPrefs};
use crate::storage::history::RunHistory;
use crate::theme::{detect_system_appearance, Appearance};

/// Human-readable state of the script configured for one appearance
pub fn describe_script(prefs: &ScriptPrefs, appearance: Appearance) -> String {
    let (path, args) = prefs.script_for(appearance);
    let path = path.trim();
    if path.is_empty() {
        return "not configured".to_string();
    }

    let resolved = expand_home(path);
    match validate_script(&resolved) {
        Ok(()) => format!("ok  → {}", build_command(&resolved.to_string_lossy(), args)),
        Err(e) => e.to_string(),
    }
}

pub fn execute(config_path: &Path) -> Result<()> {
    let config = try_load_config(config_path)?;
    let current = detect_system_appearance();

    println!("Appearance: {}", current);
    println!("Config:     {}", config_path.display());
    println!("History:    {}", RunHistory::beside_config(config_path).path().display());
    println!(
        "Shell:      {} (timeout {}s)",
        config.runner.shell.display(),
        config.runner.timeout_secs
    );
    println!();

    for appearance in Appearance::all() {
        let marker = if *appearance == current { "*" } else { " " };
        println!(
            "{} {:<5}  {}",
            marker,
            appearance,
            describe_script(&config.scripts, *appearance)
        );
    }
    Ok(())
}
