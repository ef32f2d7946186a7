//! `config` subcommand: show and edit the configuration

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{Result, RunnerError};
use crate::storage::config::{save_config, try_load_config, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Set one value (an empty value clears a script or its args)
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    DarkPath,
    DarkArgs,
    LightPath,
    LightArgs,
    Shell,
    TimeoutSecs,
    PollIntervalSecs,
}

impl ConfigKey {
    /// Apply `value` to `config`
    pub fn apply(self, config: &mut Config, value: &str) -> Result<()> {
        match self {
            ConfigKey::DarkPath => config.scripts.dark_path = value.to_string(),
            ConfigKey::DarkArgs => config.scripts.dark_args = value.to_string(),
            ConfigKey::LightPath => config.scripts.light_path = value.to_string(),
            ConfigKey::LightArgs => config.scripts.light_args = value.to_string(),
            ConfigKey::Shell => {
                let shell = value.trim();
                if shell.is_empty() {
                    return Err(RunnerError::config("shell cannot be empty"));
                }
                config.runner.shell = PathBuf::from(shell);
            }
            ConfigKey::TimeoutSecs => {
                let secs = parse_secs(self, value)?;
                if secs == 0 {
                    return Err(RunnerError::config("timeout-secs must be at least 1"));
                }
                config.runner.timeout_secs = secs;
            }
            ConfigKey::PollIntervalSecs => config.watch.poll_interval_secs = parse_secs(self, value)?,
        }
        Ok(())
    }
}

fn parse_secs(key: ConfigKey, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        RunnerError::config(format!(
            "{:?} expects a whole number of seconds, got {:?}",
            key, value
        ))
    })
}

pub fn execute(config_path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = try_load_config(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => println!("{}", config_path.display()),
        ConfigAction::Set { key, value } => {
            // Strict load so a hand-edited file with a typo is never overwritten with defaults
            let mut config = try_load_config(config_path)?;
            key.apply(&mut config, &value)?;
            save_config(config_path, &config)?;
            tracing::debug!(?key, path = %config_path.display(), "config updated");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_script_keys_keep_raw_values() {
        let mut config = Config::default();
        ConfigKey::DarkPath
            .apply(&mut config, " /opt/set dark.sh ")
            .unwrap();
        ConfigKey::LightArgs
            .apply(&mut config, "--theme 'solar ized'")
            .unwrap();
        assert_eq!(config.scripts.dark_path, " /opt/set dark.sh ");
        assert_eq!(config.scripts.light_args, "--theme 'solar ized'");

        ConfigKey::DarkPath.apply(&mut config, "").unwrap();
        assert_eq!(config.scripts.dark_path, "");
    }

    #[test]
    fn test_apply_numbers() {
        let mut config = Config::default();
        ConfigKey::TimeoutSecs.apply(&mut config, "45").unwrap();
        ConfigKey::PollIntervalSecs.apply(&mut config, "0").unwrap();
        assert_eq!(config.runner.timeout_secs, 45);
        assert_eq!(config.watch.poll_interval_secs, 0);

        assert!(ConfigKey::TimeoutSecs.apply(&mut config, "0").is_err());
        assert!(ConfigKey::TimeoutSecs.apply(&mut config, "soon").is_err());
        assert!(ConfigKey::Shell.apply(&mut config, "  ").is_err());
        assert_eq!(config.runner.timeout_secs, 45);
    }

    #[test]
    fn test_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        execute(
            &path,
            ConfigAction::Set {
                key: ConfigKey::LightPath,
                value: "/opt/light.sh".to_string(),
            },
        )
        .unwrap();
        execute(
            &path,
            ConfigAction::Set {
                key: ConfigKey::Shell,
                value: "/bin/bash".to_string(),
            },
        )
        .unwrap();

        let config = try_load_config(&path).unwrap();
        assert_eq!(config.scripts.light_path, "/opt/light.sh");
        assert_eq!(config.runner.shell, PathBuf::from("/bin/bash"));
    }

    #[test]
    fn test_set_refuses_to_clobber_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scripts\n").unwrap();

        let result = execute(
            &path,
            ConfigAction::Set {
                key: ConfigKey::DarkPath,
                value: "/opt/dark.sh".to_string(),
            },
        );
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[scripts\n");
    }
}
