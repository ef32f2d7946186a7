//! `history` subcommand: list recent script runs

use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::storage::history::{RunHistory, RunRecord};

pub fn format_record(record: &RunRecord) -> String {
    format!(
        "{}  {:<5}  {:<16}  {}",
        record
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S"),
        record.appearance,
        record.outcome.label(),
        record.path
    )
}

pub fn execute(config_path: &Path, limit: usize) -> Result<()> {
    let history = RunHistory::beside_config(config_path);
    let records = history.load_recent(limit)?;
    if records.is_empty() {
        println!("No runs recorded in {}", history.path().display());
        return Ok(());
    }
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunOutcome;
    use crate::theme::Appearance;

    #[test]
    fn test_format_record() {
        let record = RunRecord::now(Appearance::Dark, "/opt/dark.sh", RunOutcome::Failed { code: 2 });
        let line = format_record(&record);
        assert!(line.contains("dark"));
        assert!(line.contains("exit 2"));
        assert!(line.ends_with("/opt/dark.sh"));
    }
}
