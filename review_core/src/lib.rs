//! Review Core - draft reconciliation and auto-save for the admin pick-review
//! workflow.
//!
//! This crate provides:
//! - The wire data model for daily events and their pick lists
//! - Odds aggregation and draft normalization
//! - The operator draft store with field-level edit operations
//! - An explicit Idle/Suppressed/Scheduled auto-save state machine
//! - The review session: reconciles the draft against fetched server state
//!   and persists edits through a debounced write-through strategy
//! - HTTP clients for the staking backend and the Football-AI picks provider
//! - A bounded wallet-provider auth flow with an explicit session lifecycle
//!
//! All staking math, reward accrual, and prediction generation live in the
//! backend; this crate is the state-management core of the review client.

pub mod auth;
pub mod autosave;
pub mod clients;
pub mod draft;
pub mod error;
pub mod models;
pub mod odds;
pub mod session;

pub use autosave::{AutoSave, AutoSaveState, DEFAULT_QUIESCENCE_MS};
pub use draft::{DraftStore, PickField};
pub use error::ReviewError;
pub use models::{DailyEvent, EventStatus, Pick, ReviewQueue, SaveReviewRequest};
pub use session::{GenerateOutcome, ReviewSession};
