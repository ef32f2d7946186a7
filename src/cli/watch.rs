//! `watch` subcommand: watch for appearance changes until stopped

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::runner::ScriptRunner;
use crate::storage::config::{load_config, ConfigFile};
use crate::storage::history::RunHistory;
use crate::theme::SystemAppearance;
use crate::watcher::{preferences_dir, SystemEvents, ThemeWatcher};

pub async fn execute(config_path: &Path) -> Result<()> {
    let config = load_config(config_path);
    let runner = ScriptRunner::from_config(&config.runner)
        .with_history(RunHistory::beside_config(config_path));
    let prefs = ConfigFile::new(config_path);
    tracing::info!(
        config = %prefs.path().display(),
        shell = %config.runner.shell.display(),
        timeout = ?runner.timeout(),
        "starting appearance watcher"
    );

    let handle = ThemeWatcher::new(SystemAppearance, prefs, runner).start();

    let mut events = SystemEvents::new();
    match preferences_dir() {
        Some(dir) if dir.is_dir() => {
            if let Err(e) = events.watch_preferences(&dir, handle.notifier()) {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot watch global preferences");
            }
        }
        _ => tracing::debug!("no global preferences directory; relying on polling"),
    }
    events.poll_every(
        Duration::from_secs(config.watch.poll_interval_secs),
        handle.notifier(),
    );
    if !events.is_watching_files() && !events.is_polling() {
        tracing::warn!("no appearance change source; only the startup run will happen");
    }

    shutdown_signal().await?;
    tracing::info!("shutting down");

    drop(events);
    handle.stop().await;
    Ok(())
}

/// Ctrl-C, or SIGTERM from a service manager
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }
    Ok(())
}
