//! Observable session state.

use crate::intel::LookupResult;

/// What the presentation layer sees of one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Text currently typed by the user
    pub query: String,
    /// A lookup is in flight
    pub loading: bool,
    /// User-facing message from the last rejected or failed attempt
    pub error: Option<String>,
    /// Result of the last successful lookup, kept across later failures
    pub result: Option<LookupResult>,
}

/// How a submit or history selection was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to look up; state unchanged.
    Ignored,
    /// Another lookup was in flight; state unchanged.
    Busy,
    /// The address failed validation; the gateway was not called.
    Rejected,
    /// The lookup succeeded and history was updated.
    Succeeded,
    /// The gateway failed; the error is in the state.
    Failed,
}

/// Where a lookup came from. Only direct submissions clear the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LookupTrigger {
    Direct,
    History,
}
