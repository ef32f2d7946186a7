//! Unified error type for theme-script-runner.
//!
//! Built on `thiserror` so errors chain through `?` up to `main`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// File or directory I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid configuration value or key
    #[error("Config error: {0}")]
    Config(String),

    /// Configured script path does not exist
    #[error("script not found: {}", .0.display())]
    PathMissing(PathBuf),

    /// Configured script path exists but cannot be executed
    #[error("script is not executable: {}", .0.display())]
    PathNotExecutable(PathBuf),

    /// The shell process could not be spawned
    #[error("failed to launch shell: {0}")]
    Launch(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;

impl RunnerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RunnerError::config("unknown key");
        assert_eq!(err.to_string(), "Config error: unknown key");

        let err = RunnerError::PathMissing(PathBuf::from("/tmp/nope.sh"));
        assert_eq!(err.to_string(), "script not found: /tmp/nope.sh");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: RunnerError = io_err.into();
        assert!(matches!(err, RunnerError::Io(_)));
    }

    #[test]
    fn test_launch_keeps_os_description() {
        let err = RunnerError::Launch(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert!(err.to_string().contains("permission denied"));
    }
}
