//! Appearance watcher.
//!
//! Bridges payload-less "appearance may have changed" notifications to at
//! most one script run per light/dark transition.
//!
//! Evaluations are strictly serial. One task owns the [`ThemeWatcher`] and
//! runs one evaluation at a time; notifications that arrive while a script is
//! running set a single-slot pending flag instead of being evaluated
//! immediately. When the running evaluation finishes the flag triggers exactly
//! one follow-up evaluation, which re-queries the appearance. A transition
//! during a script run is thereby deferred, never dropped or interleaved, and
//! a burst of notifications collapses into one evaluation.

mod events;

use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::runner::{RunOutcome, ScriptRunner};
use crate::storage::config::{PreferenceSource, ScriptPrefs};
use crate::theme::{Appearance, AppearanceSource};

pub use events::{preferences_dir, SystemEvents};

/// What one evaluation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Appearance matched the last observed one; nothing ran
    Unchanged(Appearance),
    /// Appearance was (re)applied and its script resolved
    Ran {
        appearance: Appearance,
        outcome: RunOutcome,
    },
    /// The appearance could not be read; nothing ran
    Skipped,
}

impl Evaluation {
    pub fn outcome(&self) -> Option<&RunOutcome> {
        match self {
            Evaluation::Unchanged(_) | Evaluation::Skipped => None,
            Evaluation::Ran { outcome, .. } => Some(outcome),
        }
    }
}

/// Single-slot pending flag shared between notification sources and the watcher task.
///
/// Any number of `notify` calls before the watcher next waits leave exactly one
/// pending evaluation.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    pending: Arc<Notify>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that the appearance may have changed. Callable from any thread.
    pub fn notify(&self) {
        self.pending.notify_one();
    }

    /// Wait until a notification is pending and consume it
    pub async fn pending(&self) {
        self.pending.notified().await;
    }
}

pub struct ThemeWatcher<A, P> {
    appearance: Arc<A>,
    prefs: Arc<P>,
    runner: ScriptRunner,
    last_observed: Option<Appearance>,
}

impl<A, P> ThemeWatcher<A, P>
where
    A: AppearanceSource + 'static,
    P: PreferenceSource + 'static,
{
    pub fn new(appearance: A, prefs: P, runner: ScriptRunner) -> Self {
        Self {
            appearance: Arc::new(appearance),
            prefs: Arc::new(prefs),
            runner,
            last_observed: None,
        }
    }

    /// `None` until the first evaluation
    pub fn last_observed(&self) -> Option<Appearance> {
        self.last_observed
    }

    /// Query the appearance and run its script if it changed, or unconditionally when `force`.
    ///
    /// Never fails; script problems are logged by the runner and reported in the result.
    pub async fn evaluate(&mut self, force: bool) -> Evaluation {
        let Some(appearance) = self.query_appearance().await else {
            return Evaluation::Skipped;
        };
        if !force && self.last_observed == Some(appearance) {
            tracing::trace!(%appearance, "appearance unchanged");
            return Evaluation::Unchanged(appearance);
        }

        match self.last_observed {
            Some(previous) if previous != appearance => {
                tracing::info!(from = %previous, to = %appearance, "appearance changed")
            }
            _ => tracing::info!(%appearance, force, "applying appearance"),
        }
        self.last_observed = Some(appearance);

        let outcome = self.resolve_and_run(appearance).await;
        Evaluation::Ran {
            appearance,
            outcome,
        }
    }

    async fn resolve_and_run(&self, appearance: Appearance) -> RunOutcome {
        let source = Arc::clone(&self.prefs);
        let prefs = match tokio::task::spawn_blocking(move || source.scripts()).await {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::error!(error = %e, "reading script preferences failed");
                ScriptPrefs::default()
            }
        };
        let (path, args) = prefs.script_for(appearance);
        self.runner.run(appearance, path, args).await
    }

    /// Sources may fork `defaults` or read the config file; they run on the blocking pool.
    async fn query_appearance(&self) -> Option<Appearance> {
        let source = Arc::clone(&self.appearance);
        match tokio::task::spawn_blocking(move || source.current()).await {
            Ok(appearance) => Some(appearance),
            Err(e) => {
                tracing::error!(error = %e, "appearance query failed");
                None
            }
        }
    }

    /// Run the forced startup evaluation, then serve notifications until stopped.
    ///
    /// The returned handle's [`Notifier`] is live immediately, so notifications
    /// that arrive during the startup run are kept pending rather than lost.
    /// Must be called from within a tokio runtime, once per watcher.
    pub fn start(self) -> WatcherHandle<A, P> {
        let notifier = Notifier::new();
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(self.serve(notifier.clone(), shutdown.clone()));
        WatcherHandle {
            notifier,
            shutdown,
            task,
        }
    }

    async fn serve(mut self, notifier: Notifier, shutdown: CancellationToken) -> Self {
        self.evaluate(true).await;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = notifier.pending() => {
                    self.evaluate(false).await;
                }
            }
        }

        tracing::debug!("appearance watcher stopped");
        self
    }
}

/// Handle to a running watcher task
pub struct WatcherHandle<A, P> {
    notifier: Notifier,
    shutdown: CancellationToken,
    task: JoinHandle<ThemeWatcher<A, P>>,
}

impl<A, P> WatcherHandle<A, P> {
    /// Notifier to hand to notification sources
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    pub fn notify(&self) {
        self.notifier.notify();
    }

    /// Stop serving notifications.
    ///
    /// A script that is already running is not interrupted; this waits for it
    /// to finish or hit its deadline. Returns the watcher with its final state.
    pub async fn stop(self) -> Option<ThemeWatcher<A, P>> {
        self.shutdown.cancel();
        match self.task.await {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::error!(error = %e, "appearance watcher task failed");
                None
            }
        }
    }
}
