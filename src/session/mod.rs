//! Interactive session state.
//!
//! [`SessionController`] owns everything one user session sees: the typed
//! query, the in-flight flag, the last error and result, and the recent
//! lookup history. It is the only caller of the gateway.
//!
//! State locks are short-lived and never held across the gateway call, so
//! observers can take snapshots while a lookup is running.

mod history;
mod state;
pub mod validation;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::intel::GatewayClient;
use crate::storage::KeyValueStore;

pub use history::{History, HistoryEntry};
pub use state::{SessionState, SubmitOutcome};
pub use validation::{is_plausible_address, validate_address};

use state::LookupTrigger;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Marks a lookup in flight; clears `loading` when dropped unfinished.
struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a Mutex<SessionState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    /// Applies the outcome and clears `loading` under one lock.
    fn finish(mut self, apply: impl FnOnce(&mut SessionState)) {
        let mut state = lock(self.state);
        apply(&mut state);
        state.loading = false;
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("Lookup abandoned before it completed; session is idle again");
            lock(self.state).loading = false;
        }
    }
}

/// Drives lookups for one interactive session.
pub struct SessionController {
    gateway: GatewayClient,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
    history: Mutex<History>,
}

impl SessionController {
    /// Creates a controller, loading persisted history from `store` once.
    pub async fn initialize(gateway: GatewayClient, store: Arc<dyn KeyValueStore>) -> Self {
        let history = History::load(store.as_ref()).await;
        log::info!(
            "Session started with {} history entr{}",
            history.len(),
            if history.len() == 1 { "y" } else { "ies" }
        );

        Self {
            gateway,
            store,
            state: Mutex::new(SessionState::default()),
            history: Mutex::new(history),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    /// Recent lookups, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        lock(&self.history).entries().to_vec()
    }

    /// Replaces the typed query.
    pub fn set_query(&self, query: impl Into<String>) {
        lock(&self.state).query = query.into();
    }

    /// Looks up the current query, trimmed.
    pub async fn submit(&self) -> SubmitOutcome {
        let target = lock(&self.state).query.trim().to_string();
        self.run(target, LookupTrigger::Direct).await
    }

    /// Looks up a history address exactly as stored. The query is left alone.
    pub async fn select_history(&self, ip: &str) -> SubmitOutcome {
        self.run(ip.to_string(), LookupTrigger::History).await
    }

    async fn run(&self, target: String, trigger: LookupTrigger) -> SubmitOutcome {
        {
            let mut state = lock(&self.state);
            if state.loading {
                log::debug!("Ignoring lookup of {:?}: another lookup is in flight", target);
                return SubmitOutcome::Busy;
            }
            if target.trim().is_empty() {
                return SubmitOutcome::Ignored;
            }
            if let Err(e) = validate_address(&target) {
                log::info!("Rejected invalid address {:?}", e.input);
                state.error = Some(e.message().to_string());
                return SubmitOutcome::Rejected;
            }
            state.loading = true;
            state.error = None;
        }
        let in_flight = InFlight::start(&self.state);

        match self.gateway.lookup(&target).await {
            Ok(result) => {
                self.record_history(&target).await;

                in_flight.finish(|state| {
                    state.result = Some(result);
                    if trigger == LookupTrigger::Direct {
                        state.query.clear();
                    }
                });
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                in_flight.finish(|state| state.error = Some(e.message().to_string()));
                SubmitOutcome::Failed
            }
        }
    }

    // Runs while `loading` is still set, so persisted writes cannot interleave.
    async fn record_history(&self, ip: &str) {
        let snapshot = {
            let mut history = lock(&self.history);
            history.record(ip, chrono::Utc::now().timestamp_millis());
            history.clone()
        };

        if let Err(e) = snapshot.persist(self.store.as_ref()).await {
            log::warn!("Failed to persist lookup history: {}", e);
        }
    }
}
