//! Remote collaborators of the review engine.
//!
//! The engine core never performs I/O itself; it talks to the backend
//! through the `RemoteStore` trait and to the upstream prediction provider
//! through `PredictionSource`, so tests can substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::ReviewError;
use crate::models::{
    EventStatus, ExternalPicks, GeneratedPicks, ReviewQueue, SaveReviewRequest,
};

pub mod backend;
pub mod football_ai;

pub use backend::BackendClient;
pub use football_ai::FootballAiClient;

/// Backend operations consumed by the review session.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the pending/published review queue.
    async fn fetch_review_queue(&self) -> Result<ReviewQueue, ReviewError>;

    /// Persist the admin draft (debounced or manual, `approved` decides
    /// whether the event is published).
    async fn save_draft(&self, request: &SaveReviewRequest) -> Result<(), ReviewError>;

    /// Record the final result of a published event.
    async fn set_event_result(
        &self,
        event_id: &str,
        status: EventStatus,
        details: Option<&str>,
    ) -> Result<(), ReviewError>;

    /// Hand externally fetched picks to the backend, creating today's event.
    async fn generate_daily_picks(
        &self,
        picks: &ExternalPicks,
    ) -> Result<GeneratedPicks, ReviewError>;
}

/// Upstream prediction provider, reached directly from the client tier
/// because the backend has no route to it.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    async fn fetch_safe_picks(&self) -> Result<ExternalPicks, ReviewError>;

    /// Provider name for logging and debugging.
    fn source_name(&self) -> &str;
}
