//! The review session: draft reconciliation and write-through persistence.
//!
//! Owns the cached pending/published lists, the operator draft, and the
//! auto-save machine. Single-threaded by construction: one session per
//! operator, mutated only from the driving event loop, while the backend may
//! be mutated concurrently by other clients. Reconciliation therefore
//! always treats the fetched snapshot as authoritative.

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::autosave::AutoSave;
use crate::clients::{PredictionSource, RemoteStore};
use crate::draft::{DraftStore, PickField};
use crate::error::ReviewError;
use crate::models::{
    DailyEvent, EventStatus, GeneratedPicks, Pick, ReviewQueue, SaveReviewRequest,
};
use crate::odds;

/// Outcome of a generate-daily-picks run.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// The upstream provider had nothing for today.
    NoPicks { reason: Option<String> },
    /// Picks were stored; a new event is awaiting review.
    Saved(GeneratedPicks),
}

pub struct ReviewSession {
    store: Arc<dyn RemoteStore>,
    pending: Vec<DailyEvent>,
    published: Vec<DailyEvent>,
    draft: DraftStore,
    autosave: AutoSave,
}

impl ReviewSession {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            pending: Vec::new(),
            published: Vec::new(),
            draft: DraftStore::new(),
            autosave: AutoSave::default(),
        }
    }

    /// Override the auto-save quiescence window (tests, slow links).
    pub fn with_quiescence(store: Arc<dyn RemoteStore>, window: std::time::Duration) -> Self {
        Self {
            autosave: AutoSave::new(window),
            ..Self::new(store)
        }
    }

    // ------------------------------------------------------------------
    // Read surface for the presentation layer
    // ------------------------------------------------------------------

    pub fn pending(&self) -> &[DailyEvent] {
        &self.pending
    }

    pub fn published(&self) -> &[DailyEvent] {
        &self.published
    }

    pub fn selected(&self) -> Option<&DailyEvent> {
        self.draft.selected()
    }

    pub fn draft_picks(&self) -> &[Pick] {
        self.draft.picks()
    }

    pub fn comments(&self) -> &str {
        self.draft.comments()
    }

    pub fn draft_total_odds(&self) -> f64 {
        odds::total_odds(self.draft.picks())
    }

    pub fn next_autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Fetch the review queue and reconcile. Read failures degrade to empty
    /// lists and leave the draft untouched so a transient outage never
    /// discards in-flight edits.
    pub async fn refresh(&mut self) {
        match self.store.fetch_review_queue().await {
            Ok(queue) => self.apply_refresh(queue),
            Err(e) => {
                warn!("failed to fetch review queue: {e}");
                self.pending.clear();
                self.published.clear();
            }
        }
    }

    /// Merge freshly fetched lists with the current selection.
    ///
    /// Resulted events are excluded from the published list before anything
    /// else, so they can never re-enter the reviewable set. A still-present
    /// selection is reloaded (suppressed) from the fresh snapshot; a vanished
    /// one clears the draft.
    pub fn apply_refresh(&mut self, queue: ReviewQueue) {
        self.pending = queue.pending;
        self.published = queue
            .published
            .into_iter()
            .filter(|event| event.status.is_pending())
            .collect();

        let Some(id) = self.draft.selected_id().map(str::to_string) else {
            return;
        };
        let found = self
            .pending
            .iter()
            .find(|event| event.id == id)
            .or_else(|| self.published.iter().find(|event| event.id == id))
            .cloned();
        match found {
            Some(event) => {
                debug!(event_id = %id, "reloading draft from fresh snapshot");
                self.load_draft(&event);
            }
            None => {
                debug!(event_id = %id, "selected event left the reviewable set");
                self.deselect();
            }
        }
    }

    /// Select an event from the cached lists. Returns false when the id is
    /// unknown.
    pub fn select(&mut self, event_id: &str) -> bool {
        let found = self
            .pending
            .iter()
            .find(|event| event.id == event_id)
            .or_else(|| self.published.iter().find(|event| event.id == event_id))
            .cloned();
        match found {
            Some(event) => {
                self.load_draft(&event);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.autosave.cancel();
        self.draft.clear();
    }

    /// Programmatic load: suppress first, then let the load's own change
    /// notification consume the one-shot. The net effect is that a load
    /// never schedules a write while the very next operator edit does.
    fn load_draft(&mut self, event: &DailyEvent) {
        self.autosave.suppress();
        self.draft.load(event);
        self.autosave.note_change(Instant::now());
    }

    // ------------------------------------------------------------------
    // Draft edits
    // ------------------------------------------------------------------

    pub fn update_field(&mut self, index: usize, field: PickField, value: &str) -> bool {
        let changed = self.draft.update_field(index, field, value);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn remove_pick(&mut self, index: usize) -> bool {
        let changed = self.draft.remove_pick(index);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn set_comments(&mut self, text: &str) -> bool {
        let changed = self.draft.set_comments(text);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn reset_to_ai_selection(&mut self) -> bool {
        let changed = self.draft.reset_to_ai_selection();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    fn mark_dirty(&mut self) {
        if self.draft.selected().is_some() {
            self.autosave.note_change(Instant::now());
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Fire the debounced write if its deadline has passed.
    ///
    /// On success the cached pending copy is patched so list summaries
    /// reflect the draft without a refetch. On failure the write is logged
    /// and dropped; the next edit reschedules naturally. Auto-saves are
    /// never retried on a timer.
    pub async fn flush_if_due(&mut self) -> bool {
        if !self.autosave.take_due(Instant::now()) {
            return false;
        }
        let Some(event_id) = self.draft.selected_id().map(str::to_string) else {
            return false;
        };
        let request = self.draft_request(&event_id, false);
        match self.store.save_draft(&request).await {
            Ok(()) => {
                let total = odds::total_odds(&request.admin_predictions);
                if let Some(cached) = self.pending.iter_mut().find(|e| e.id == event_id) {
                    cached.admin_predictions = Some(request.admin_predictions.clone());
                    cached.total_odds = Some(total);
                }
                debug!(event_id = %event_id, total_odds = total, "auto-saved draft");
                true
            }
            Err(e) => {
                warn!(event_id = %event_id, "auto-save failed: {e}");
                false
            }
        }
    }

    /// Manual save (`approved = false`) or approve-and-publish
    /// (`approved = true`). Bypasses the debounce, then refreshes from the
    /// server and clears the selection.
    pub async fn save(&mut self, approved: bool) -> Result<(), ReviewError> {
        let Some(event_id) = self.draft.selected_id().map(str::to_string) else {
            return Err(ReviewError::NoSelection);
        };
        self.autosave.cancel();
        let request = self.draft_request(&event_id, approved);
        self.store.save_draft(&request).await?;
        info!(event_id = %event_id, approved, "review saved");
        self.refresh().await;
        self.deselect();
        Ok(())
    }

    fn draft_request(&self, event_id: &str, approved: bool) -> SaveReviewRequest {
        SaveReviewRequest {
            event_id: event_id.to_string(),
            admin_predictions: odds::normalize_picks(self.draft.picks()),
            admin_comments: self.draft.comments().to_string(),
            approved,
        }
    }

    // ------------------------------------------------------------------
    // Results and generation
    // ------------------------------------------------------------------

    /// Record the final result of the selected event. Status only moves
    /// forward out of `Pending`; a resulted event leaves the reviewable set
    /// on the follow-up refresh.
    pub async fn set_event_result(
        &mut self,
        status: EventStatus,
        details: Option<&str>,
    ) -> Result<(), ReviewError> {
        let Some(selected) = self.draft.selected() else {
            return Err(ReviewError::NoSelection);
        };
        if !selected.status.is_pending() || status.is_pending() {
            return Err(ReviewError::InvalidTransition {
                from: selected.status.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }
        let event_id = selected.id.clone();
        self.store
            .set_event_result(&event_id, status, details)
            .await?;
        info!(event_id = %event_id, status = status.as_str(), "event resulted");
        self.refresh().await;
        self.deselect();
        Ok(())
    }

    /// Fetch today's picks from the upstream provider and hand them to the
    /// backend. An empty pick set is reported without touching the backend.
    pub async fn generate_daily_picks(
        &mut self,
        source: &dyn PredictionSource,
    ) -> Result<GenerateOutcome, ReviewError> {
        let picks = source.fetch_safe_picks().await?;
        if picks.picks.is_empty() {
            info!(source = source.source_name(), "no picks available today");
            return Ok(GenerateOutcome::NoPicks {
                reason: picks.reason,
            });
        }
        let ack = self.store.generate_daily_picks(&picks).await?;
        info!(
            event_id = %ack.event_id,
            matches = ack.match_count,
            "daily picks generated"
        );
        self.refresh().await;
        Ok(GenerateOutcome::Saved(ack))
    }
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("pending", &self.pending.len())
            .field("published", &self.published.len())
            .field("selected", &self.draft.selected_id())
            .field("autosave", &self.autosave.state())
            .finish()
    }
}
