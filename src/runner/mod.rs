//! Script validation and execution.
//!
//! A script run goes through three steps: resolve (trim, skip when
//! unconfigured), validate (exists, executable) and execute (spawn the shell,
//! race it against the deadline). Every failure is logged here and returned
//! as a [`RunOutcome`]; nothing propagates to the caller.

mod command;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::{Child, Command};

use crate::error::{Result, RunnerError};
use crate::storage::config::RunnerConfig;
use crate::storage::history::{RunHistory, RunRecord};
use crate::theme::Appearance;

pub use command::{build_command, shell_escape};

/// Deadline for a single script execution
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of racing a child process against its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Exited on its own with this status code
    Exited(i32),
    /// Exited on its own without a status code (killed by a signal)
    Signaled,
    /// Still running at the deadline; killed
    TimedOut,
}

/// What happened to one resolve-validate-execute pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Empty path; nothing to do
    Unconfigured,
    PathMissing,
    NotExecutable,
    LaunchFailed { error: String },
    Succeeded,
    Failed { code: i32 },
    Signaled,
    TimedOut,
}

impl RunOutcome {
    /// Whether a shell process was spawned for this pass
    pub fn spawned(&self) -> bool {
        matches!(
            self,
            RunOutcome::Succeeded
                | RunOutcome::Failed { .. }
                | RunOutcome::Signaled
                | RunOutcome::TimedOut
        )
    }

    pub fn label(&self) -> String {
        match self {
            RunOutcome::Unconfigured => "unconfigured".to_string(),
            RunOutcome::PathMissing => "missing".to_string(),
            RunOutcome::NotExecutable => "not executable".to_string(),
            RunOutcome::LaunchFailed { error } => format!("launch failed: {}", error),
            RunOutcome::Succeeded => "ok".to_string(),
            RunOutcome::Failed { code } => format!("exit {}", code),
            RunOutcome::Signaled => "killed by signal".to_string(),
            RunOutcome::TimedOut => "timed out".to_string(),
        }
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

/// Check that `path` exists and can be executed
pub fn validate_script(path: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return Err(RunnerError::PathMissing(path.to_path_buf())),
    };

    if !metadata.is_file() || !is_executable(&metadata) {
        return Err(RunnerError::PathNotExecutable(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Runs configured scripts through a login shell with a deadline.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    shell: PathBuf,
    timeout: Duration,
    history: Option<RunHistory>,
}

impl ScriptRunner {
    pub fn new(shell: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            shell: shell.into(),
            timeout,
            history: None,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        let timeout = if config.timeout_secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(config.timeout_secs)
        };
        Self::new(&config.shell, timeout)
    }

    /// Record every validated run in `history`
    pub fn with_history(mut self, history: RunHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve, validate and execute the script configured for `appearance`.
    ///
    /// Never fails: each outcome is logged at its severity and returned.
    pub async fn run(&self, appearance: Appearance, path: &str, args: &str) -> RunOutcome {
        let path = path.trim();
        if path.is_empty() {
            tracing::debug!(%appearance, "no script configured");
            return RunOutcome::Unconfigured;
        }

        let outcome = self.validate_and_execute(appearance, path, args).await;
        self.record(appearance, path, &outcome);
        outcome
    }

    async fn validate_and_execute(&self, appearance: Appearance, path: &str, args: &str) -> RunOutcome {
        let resolved = expand_home(path);
        if let Err(e) = validate_script(&resolved) {
            tracing::error!(%appearance, error = %e, "{} script rejected", appearance);
            return match e {
                RunnerError::PathNotExecutable(_) => RunOutcome::NotExecutable,
                _ => RunOutcome::PathMissing,
            };
        }

        let command = build_command(&resolved.to_string_lossy(), args);
        tracing::info!(%appearance, %command, "running {} script", appearance);

        match self.execute(&command).await {
            Ok(ExecOutcome::Exited(0)) => {
                tracing::info!(%appearance, "{} script finished successfully", appearance);
                RunOutcome::Succeeded
            }
            Ok(ExecOutcome::Exited(code)) => {
                tracing::error!(%appearance, code, "{} script failed with exit status {}", appearance, code);
                RunOutcome::Failed { code }
            }
            Ok(ExecOutcome::Signaled) => {
                tracing::error!(%appearance, "{} script was terminated by a signal", appearance);
                RunOutcome::Signaled
            }
            Ok(ExecOutcome::TimedOut) => {
                tracing::warn!(
                    %appearance,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "{} script still running after {:?}; terminated",
                    appearance,
                    self.timeout
                );
                RunOutcome::TimedOut
            }
            Err(e) => {
                tracing::error!(%appearance, error = %e, "failed to run {} script", appearance);
                RunOutcome::LaunchFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Spawn `<shell> -lc <command>` and wait for it, killing it at the deadline.
    pub async fn execute(&self, command: &str) -> Result<ExecOutcome> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-lc")
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        // Own process group so the deadline takes down everything the script started
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(RunnerError::Launch)?;

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => {
                let status = status?;
                Ok(match status.code() {
                    Some(code) => ExecOutcome::Exited(code),
                    None => ExecOutcome::Signaled,
                })
            }
            Err(_) => {
                terminate(&mut child).await;
                Ok(ExecOutcome::TimedOut)
            }
        }
    }

    fn record(&self, appearance: Appearance, path: &str, outcome: &RunOutcome) {
        let Some(history) = &self.history else {
            return;
        };
        if let Err(e) = history.append(&RunRecord::now(appearance, path, outcome.clone())) {
            tracing::warn!(path = %history.path().display(), error = %e, "failed to record run history");
        }
    }
}

async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            // SAFETY: killpg only sends a signal; the group was created by process_group(0) at spawn
            unsafe {
                libc::killpg(pid as libc::pid_t, libc::SIGKILL);
            }
        }
    }
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "kill after timeout failed; child already gone");
    }
}
