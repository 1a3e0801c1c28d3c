//! Error taxonomy for the review workflow.
//!
//! Auth-path deadlines are not errors at all: the sign-in flow reports them
//! as an unauthenticated outcome. Read-path failures are degraded to
//! defaults at the call site; write-path
//! failures are reported to the operator (manual saves) or logged and left
//! for the next edit to reschedule (auto-saves). Nothing here should ever
//! terminate the operator session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// The stored credential was rejected; the session handle has been
    /// cleared and the operator must re-authenticate.
    #[error("session credential rejected by backend")]
    Unauthorized,

    /// A debounced or manual draft write was rejected.
    #[error("failed to persist draft: {0}")]
    Persist(String),

    /// Transport-level failure talking to the backend or picks provider.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match any shape the boundary normalizer
    /// understands.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// An operation that needs a selected event was called without one.
    #[error("no event is selected")]
    NoSelection,

    /// Event results only move forward out of PENDING.
    #[error("invalid status transition {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl ReviewError {
    pub fn decode(context: impl Into<String>) -> Self {
        ReviewError::Decode(context.into())
    }
}
