pub mod config;
pub mod history;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "THEME_SCRIPT_RUNNER_CONFIG";

/// `~/.theme-script-runner/`
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".theme-script-runner")
}

/// Load and deserialize a TOML file
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Serialize and write a TOML file, creating the parent directory if needed
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
