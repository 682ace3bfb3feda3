// Shared test helpers for completers, stores and sessions.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use ip_intel::error_handling::CompletionError;
use ip_intel::intel::{Citation, Completion, CompletionRequest};
use ip_intel::{Completer, GatewayClient, SessionController, SqliteStore};

/// A schema-valid completion body.
#[allow(dead_code)] // Used by other test files
pub const VALID_BODY: &str = r#"{
    "summary": "Part of the Akamai Connected Cloud. Registered to Akamai Technologies.",
    "networkInfo": {"name": "LINODE-US", "organization": "Akamai Technologies, Inc.", "netRange": "23.90.64.0 - 23.90.79.255", "cidr": "23.90.64.0/20", "status": "Direct Allocation", "registry": "ARIN"},
    "geography": {"country": "United States", "city": "Newark", "coordinates": "40.7357, -74.1724"},
    "contacts": {"abuse": "abuse@akamai.com", "admin": null}
}"#;

/// A successful completion carrying `VALID_BODY` and the given citations.
#[allow(dead_code)] // Used by other test files
pub fn valid_completion(citations: Vec<Citation>) -> Result<Completion, CompletionError> {
    Ok(Completion {
        text: Some(VALID_BODY.to_string()),
        citations,
    })
}

/// Completer that replays queued replies and counts calls.
///
/// Once the queue is empty every call succeeds with `VALID_BODY`. When
/// gated, each call waits for `release()` before replying.
#[allow(dead_code)] // Used by other test files
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<Result<Completion, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    entered: Notify,
    gate: Option<Notify>,
}

#[allow(dead_code)] // Used by other test files
impl ScriptedCompleter {
    pub fn new(replies: Vec<Result<Completion, CompletionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            gate: None,
        })
    }

    pub fn always_ok() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            gate: Some(Notify::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Resolves once a call has started.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one gated call reply.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| valid_completion(Vec::new()))
    }
}

/// Opens (or reopens) a file-backed store at `path`.
#[allow(dead_code)] // Used by other test files
pub async fn open_store(path: &Path) -> Arc<SqliteStore> {
    Arc::new(
        SqliteStore::open(path)
            .await
            .expect("Failed to open test database"),
    )
}

/// Creates a session over an in-memory store.
#[allow(dead_code)] // Used by other test files
pub async fn create_session(completer: Arc<ScriptedCompleter>) -> SessionController {
    let store = SqliteStore::in_memory()
        .await
        .expect("Failed to create in-memory store");
    SessionController::initialize(GatewayClient::new(completer), Arc::new(store)).await
}
