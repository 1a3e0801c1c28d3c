//! In-memory draft of the currently selected event's pick list.
//!
//! Holds exactly one event's editable picks plus its comments field and
//! exposes pure mutation operations. Every mutation reports whether the
//! draft actually changed so the caller can drive auto-save scheduling.

use crate::models::{DailyEvent, Pick};
use crate::odds::round_odds;

/// Editable fields of a drafted pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickField {
    Prediction,
    Odds,
    BookmakerMarket,
    Reasoning,
}

impl PickField {
    /// Parse the field name used by the presentation layer.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "prediction" => Some(PickField::Prediction),
            "odds" => Some(PickField::Odds),
            "market" | "bookmakermarket" | "bookmaker_market" => Some(PickField::BookmakerMarket),
            "reasoning" => Some(PickField::Reasoning),
            _ => None,
        }
    }
}

/// The operator's in-progress, not-yet-finalized edit of an event.
#[derive(Debug, Default)]
pub struct DraftStore {
    selected: Option<DailyEvent>,
    picks: Vec<Pick>,
    comments: String,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft with the given event's admin draft (when non-empty)
    /// or its AI auto-selection. Picks are cloned so the draft never aliases
    /// server-held data.
    pub fn load(&mut self, event: &DailyEvent) {
        self.picks = match &event.admin_predictions {
            Some(drafted) if !drafted.is_empty() => drafted.clone(),
            _ => event.ai_selection(),
        };
        self.comments = event.admin_comments.clone().unwrap_or_default();
        self.selected = Some(event.clone());
    }

    /// Drop the selection and empty the draft.
    pub fn clear(&mut self) {
        self.selected = None;
        self.picks.clear();
        self.comments.clear();
    }

    pub fn selected(&self) -> Option<&DailyEvent> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|e| e.id.as_str())
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Edit a single field of the pick at `index`.
    ///
    /// Out-of-range indices are a silent no-op. For `Odds` the value is
    /// parsed as a float; on success the rounded value is written into both
    /// `odds` and `predicted_odds`, on parse failure the pick is untouched.
    /// Returns whether the draft changed.
    pub fn update_field(&mut self, index: usize, field: PickField, value: &str) -> bool {
        let Some(pick) = self.picks.get_mut(index) else {
            return false;
        };
        match field {
            PickField::Odds => match value.trim().parse::<f64>() {
                Ok(numeric) if numeric.is_finite() => {
                    let rounded = round_odds(numeric);
                    pick.odds = Some(rounded);
                    pick.predicted_odds = Some(rounded);
                    true
                }
                _ => false,
            },
            PickField::Prediction => {
                pick.prediction = Some(value.to_string());
                true
            }
            PickField::BookmakerMarket => {
                pick.bookmaker_market = Some(value.to_string());
                true
            }
            PickField::Reasoning => {
                pick.reasoning = Some(value.to_string());
                true
            }
        }
    }

    /// Remove the pick at `index`, preserving the order of the rest.
    /// Refused when the draft holds exactly one pick: a published event must
    /// always carry at least one match. Returns whether the draft changed.
    pub fn remove_pick(&mut self, index: usize) -> bool {
        if self.picks.len() <= 1 || index >= self.picks.len() {
            return false;
        }
        self.picks.remove(index);
        true
    }

    /// Discard in-flight edits and reload from the selected event's
    /// persisted admin draft (when present) or its AI auto-selection.
    /// Returns whether the draft changed.
    pub fn reset_to_ai_selection(&mut self) -> bool {
        let Some(event) = &self.selected else {
            return false;
        };
        self.picks = match &event.admin_predictions {
            Some(drafted) if !drafted.is_empty() => drafted.clone(),
            _ => event.ai_selection(),
        };
        true
    }

    /// Replace the comments field. Returns whether the draft changed.
    pub fn set_comments(&mut self, text: &str) -> bool {
        if self.comments == text {
            return false;
        }
        self.comments = text.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use chrono::Utc;

    fn pick(home: &str, away: &str, odds: f64, auto: bool) -> Pick {
        Pick {
            home_team: Some(home.to_string()),
            away_team: Some(away.to_string()),
            odds: Some(odds),
            predicted_odds: Some(odds),
            auto_selected: auto,
            ..Default::default()
        }
    }

    fn event(matches: Vec<Pick>, admin: Option<Vec<Pick>>) -> DailyEvent {
        DailyEvent {
            id: "evt-1".to_string(),
            date: "2026-08-27".to_string(),
            sport: "football".to_string(),
            matches,
            ai_predictions: vec![],
            admin_predictions: admin,
            admin_comments: Some("looks safe".to_string()),
            total_odds: None,
            status: EventStatus::Pending,
            admin_reviewed: false,
            result: None,
            created_at: Utc::now(),
            updated_at: None,
            auto_selection_total_odds: None,
            auto_selection_count: None,
        }
    }

    #[test]
    fn load_prefers_admin_draft_and_copies_comments() {
        let mut store = DraftStore::new();
        store.load(&event(
            vec![pick("A", "B", 1.2, true)],
            Some(vec![pick("E", "F", 1.9, false)]),
        ));
        assert_eq!(store.picks()[0].home_team.as_deref(), Some("E"));
        assert_eq!(store.comments(), "looks safe");
    }

    #[test]
    fn odds_edit_parses_rounds_and_mirrors() {
        let mut store = DraftStore::new();
        store.load(&event(vec![pick("A", "B", 1.05, true)], None));

        assert!(store.update_field(0, PickField::Odds, "1.23456789"));
        assert_eq!(store.picks()[0].odds, Some(1.2346));
        assert_eq!(store.picks()[0].predicted_odds, Some(1.2346));
    }

    #[test]
    fn unparseable_odds_edit_is_a_no_op() {
        let mut store = DraftStore::new();
        store.load(&event(vec![pick("A", "B", 1.05, true)], None));

        assert!(!store.update_field(0, PickField::Odds, "1.2abc"));
        assert_eq!(store.picks()[0].odds, Some(1.05));
        assert_eq!(store.picks()[0].predicted_odds, Some(1.05));
    }

    #[test]
    fn out_of_range_edit_is_a_no_op() {
        let mut store = DraftStore::new();
        store.load(&event(vec![pick("A", "B", 1.05, true)], None));
        assert!(!store.update_field(5, PickField::Prediction, "Home Win"));
    }

    #[test]
    fn last_pick_cannot_be_removed() {
        let mut store = DraftStore::new();
        store.load(&event(vec![pick("A", "B", 1.05, true)], None));
        assert!(!store.remove_pick(0));
        assert_eq!(store.picks().len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut store = DraftStore::new();
        store.load(&event(
            vec![
                pick("A", "B", 1.1, true),
                pick("C", "D", 1.2, true),
                pick("E", "F", 1.3, true),
            ],
            None,
        ));
        assert!(store.remove_pick(1));
        assert_eq!(store.picks()[0].home_team.as_deref(), Some("A"));
        assert_eq!(store.picks()[1].home_team.as_deref(), Some("E"));
    }

    #[test]
    fn reset_keeps_persisted_admin_draft_over_ai_selection() {
        let mut store = DraftStore::new();
        store.load(&event(
            vec![pick("A", "B", 1.2, true)],
            Some(vec![pick("E", "F", 1.9, false)]),
        ));
        store.update_field(0, PickField::Prediction, "Away Win");
        assert!(store.reset_to_ai_selection());
        assert_eq!(store.picks()[0].home_team.as_deref(), Some("E"));
        assert_eq!(store.picks()[0].prediction, None);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = DraftStore::new();
        store.load(&event(vec![pick("A", "B", 1.2, true)], None));
        store.clear();
        assert!(store.selected().is_none());
        assert!(store.is_empty());
        assert_eq!(store.comments(), "");
    }
}
