//! Configuration persistence
//!
//! The `[scripts]` table is the preference set the watcher reads on every
//! evaluation. `[runner]` and `[watch]` are read once at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{app_dir, load_toml, save_toml, CONFIG_ENV};
use crate::error::Result;
use crate::theme::Appearance;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scripts: ScriptPrefs,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Script path and argument string per appearance mode.
///
/// Values are free-form: possibly empty, possibly padded with whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPrefs {
    #[serde(default)]
    pub dark_path: String,
    #[serde(default)]
    pub dark_args: String,
    #[serde(default)]
    pub light_path: String,
    #[serde(default)]
    pub light_args: String,
}

impl ScriptPrefs {
    /// (path, args) configured for `appearance`
    pub fn script_for(&self, appearance: Appearance) -> (&str, &str) {
        match appearance {
            Appearance::Dark => (&self.dark_path, &self.dark_args),
            Appearance::Light => (&self.light_path, &self.light_args),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Shell used as `<shell> -lc "<command>"`
    #[serde(default = "default_shell")]
    pub shell: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_shell() -> PathBuf {
    PathBuf::from("/bin/zsh")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Seconds between fallback appearance polls, 0 disables polling
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    10
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Resolve the config file path: explicit flag, then env var, then `~/.theme-script-runner/config.toml`
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_dir().join("config.toml"),
    }
}

/// Load config strictly: a missing file yields defaults, a malformed one is an error.
pub fn try_load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    load_toml(path)
}

/// Load config, falling back to defaults when the file is missing or unreadable.
pub fn load_config(path: &Path) -> Config {
    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load config; using defaults");
            Config::default()
        }
    }
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    save_toml(path, config)
}

/// Where the watcher reads its preference set from.
///
/// Implementations are consulted on every evaluation and must not cache.
pub trait PreferenceSource: Send + Sync {
    fn scripts(&self) -> ScriptPrefs;
}

/// Preference set backed by the `[scripts]` table of a config file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceSource for ConfigFile {
    fn scripts(&self) -> ScriptPrefs {
        load_config(&self.path).scripts
    }
}

impl<T: PreferenceSource + ?Sized> PreferenceSource for std::sync::Arc<T> {
    fn scripts(&self) -> ScriptPrefs {
        (**self).scripts()
    }
}

/// A fixed preference set
impl PreferenceSource for ScriptPrefs {
    fn scripts(&self) -> ScriptPrefs {
        self.clone()
    }
}
