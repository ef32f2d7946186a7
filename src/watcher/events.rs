//! Appearance-change notification sources.
//!
//! macOS keeps `AppleInterfaceStyle` in the global preferences domain, which
//! is persisted to `~/Library/Preferences/.GlobalPreferences.plist`. A write
//! to that file is the closest thing to an appearance-change event that can
//! be observed without linking AppKit. Writes are coalesced by `cfprefsd` and
//! can lag, so a periodic poll tick backs the file watch up. Neither source
//! carries a payload: both just set the watcher's pending flag and the
//! watcher re-queries the appearance itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{
    event::{CreateKind, ModifyKind, RenameMode},
    Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Notifier;

/// File name of the macOS global preferences domain
pub const GLOBAL_PREFERENCES_FILE: &str = ".GlobalPreferences.plist";

/// `~/Library/Preferences`
pub fn preferences_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Preferences"))
}

/// Whether a filesystem event touched the global preferences file.
///
/// `cfprefsd` writes through a temp file and renames it into place, so
/// creates and renames count as well as in-place modifications.
pub fn is_preferences_event(event: &Event) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To))
            | EventKind::Modify(ModifyKind::Name(RenameMode::Any))
            | EventKind::Modify(ModifyKind::Name(RenameMode::Both))
            | EventKind::Create(CreateKind::File)
            | EventKind::Create(CreateKind::Any)
    );
    relevant_kind
        && event.paths.iter().any(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n == GLOBAL_PREFERENCES_FILE)
        })
}

/// Live notification sources feeding one [`Notifier`].
///
/// Dropping this stops both the file watch and the poll task.
#[derive(Default)]
pub struct SystemEvents {
    fs_watcher: Option<RecommendedWatcher>,
    poll_task: Option<JoinHandle<()>>,
}

impl SystemEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `dir` (non-recursively) for writes to the global preferences file.
    pub fn watch_preferences(&mut self, dir: &Path, notifier: Notifier) -> notify::Result<()> {
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if is_preferences_event(&event) => {
                    tracing::debug!(kind = ?event.kind, "global preferences changed");
                    notifier.notify();
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "preferences watch error"),
            },
            Config::default(),
        )?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), "watching global preferences");

        self.fs_watcher = Some(watcher);
        Ok(())
    }

    /// Notify every `interval`. A zero interval disables polling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn poll_every(&mut self, interval: Duration, notifier: Notifier) {
        if interval.is_zero() {
            return;
        }

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately; the startup evaluation already covers it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                notifier.notify();
            }
        });
        tracing::debug!(?interval, "polling appearance");

        self.poll_task = Some(task);
    }

    pub fn is_watching_files(&self) -> bool {
        self.fs_watcher.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.poll_task.is_some()
    }
}

impl Drop for SystemEvents {
    fn drop(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }
}
