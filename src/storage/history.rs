//! Run history persistence.
//!
//! Stores one JSON object per line (JSONL) so every execution is a single
//! append and the file can be read back as a stream. Only the outcome is
//! recorded, never script output.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::runner::RunOutcome;
use crate::theme::Appearance;

/// A single script execution attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub appearance: Appearance,
    /// Trimmed script path as configured
    pub path: String,
    pub outcome: RunOutcome,
}

impl RunRecord {
    pub fn now(appearance: Appearance, path: &str, outcome: RunOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            appearance,
            path: path.to_string(),
            outcome,
        }
    }
}

/// Append-only `history.jsonl` file
#[derive(Debug, Clone)]
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History lives next to the config file it belongs to
    pub fn beside_config(config_path: &Path) -> Self {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(super::app_dir);
        Self::new(dir.join("history.jsonl"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &RunRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        file.flush()?;
        Ok(())
    }

    /// Load every record, skipping blank or unparsable lines
    pub fn load(&self) -> Result<Vec<RunRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<RunRecord>(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// The `limit` most recent records, oldest first
    pub fn load_recent(&self, limit: usize) -> Result<Vec<RunRecord>> {
        let mut records = self.load()?;
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
        Ok(records)
    }
}
