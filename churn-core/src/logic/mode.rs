//! Mode Selector
//!
//! Owns the session's operating mode. The mode is decided by the startup
//! probe and changes afterwards only through an explicit reconnect, which
//! can move LOCAL -> REMOTE. Failed remote calls never touch it.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::remote::ProbeOutcome;

/// Where operations are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatingMode {
    Remote,
    Local,
}

impl OperatingMode {
    fn from_probe(outcome: &ProbeOutcome) -> Self {
        if outcome.reachable {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "REMOTE"),
            Self::Local => write!(f, "LOCAL"),
        }
    }
}

/// Result of a reconnect request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeTransition {
    /// Mode did not change
    Unchanged { mode: OperatingMode },
    /// Mode changed. On LOCAL -> REMOTE consumers drop their LOCAL results.
    Changed { from: OperatingMode, to: OperatingMode },
    /// A newer reconnect was issued while this probe was in flight
    Superseded,
}

impl ModeTransition {
    /// True when results produced in LOCAL mode are now stale
    pub fn discards_local_results(&self) -> bool {
        matches!(
            self,
            Self::Changed { from: OperatingMode::Local, to: OperatingMode::Remote }
        )
    }
}

/// Session-scoped mode holder
#[derive(Debug)]
pub struct ModeSelector {
    mode: RwLock<OperatingMode>,
    latest_ticket: AtomicU64,
    notifier: watch::Sender<OperatingMode>,
}

impl ModeSelector {
    /// Startup transition: REMOTE iff the first probe was reachable
    pub fn from_probe(outcome: &ProbeOutcome) -> Self {
        let mode = OperatingMode::from_probe(outcome);
        tracing::info!("Operating mode at startup: {}", mode);
        Self::with_mode(mode)
    }

    pub fn with_mode(mode: OperatingMode) -> Self {
        let (notifier, _) = watch::channel(mode);
        Self {
            mode: RwLock::new(mode),
            latest_ticket: AtomicU64::new(0),
            notifier,
        }
    }

    pub fn current(&self) -> OperatingMode {
        *self.mode.read()
    }

    /// Watch mode changes
    pub fn subscribe(&self) -> watch::Receiver<OperatingMode> {
        self.notifier.subscribe()
    }

    /// Explicit reconnect. Re-probes only while LOCAL.
    ///
    /// Each call takes a ticket before probing; only the most recently issued
    /// ticket may apply its outcome, older ones report `Superseded`.
    pub async fn reconnect<F, Fut>(&self, probe: F) -> ModeTransition
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProbeOutcome>,
    {
        if self.current() == OperatingMode::Remote {
            return ModeTransition::Unchanged { mode: OperatingMode::Remote };
        }

        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = probe().await;

        let mut mode = self.mode.write();
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Reconnect probe #{} superseded", ticket);
            return ModeTransition::Superseded;
        }

        if !outcome.reachable || *mode == OperatingMode::Remote {
            return ModeTransition::Unchanged { mode: *mode };
        }

        let from = *mode;
        *mode = OperatingMode::Remote;
        drop(mode);

        tracing::info!("Operating mode: {} -> {}", from, OperatingMode::Remote);
        self.notifier.send_replace(OperatingMode::Remote);

        ModeTransition::Changed { from, to: OperatingMode::Remote }
    }
}
