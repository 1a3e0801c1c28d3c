//! Wire-level data model for the admin review workflow.
//!
//! These structs mirror the backend's camelCase JSON. The backend owns all
//! staking math and prediction generation; this crate only edits and
//! reconciles the admin draft of an event's pick list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::odds;

/// A single prediction unit: two teams, a predicted outcome, and odds.
///
/// Invariant: whenever either odds field is written through the draft store
/// or normalization, `odds` and `predicted_odds` hold the same value rounded
/// to 4 decimal places.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    pub odds: Option<f64>,
    pub predicted_odds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmaker_market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injuries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2h: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_warnings: Option<Vec<String>>,
    #[serde(default)]
    pub auto_selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Pick {
    /// The effective odds for aggregation: `odds` if finite, else
    /// `predicted_odds` if finite, else the multiplicative identity.
    pub fn effective_odds(&self) -> f64 {
        match (self.odds, self.predicted_odds) {
            (Some(v), _) if v.is_finite() => v,
            (_, Some(v)) if v.is_finite() => v,
            _ => 1.0,
        }
    }

    /// Both team names present and non-blank.
    pub fn has_both_teams(&self) -> bool {
        let filled = |t: &Option<String>| t.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.home_team) && filled(&self.away_team)
    }
}

/// Lifecycle status of a daily event.
///
/// Transitions are forward-only: `Pending` may move to any resulted state,
/// after which the event leaves the reviewable set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    #[default]
    Pending,
    Won,
    Lost,
    Void,
}

impl EventStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, EventStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDING",
            EventStatus::Won => "WON",
            EventStatus::Lost => "LOST",
            EventStatus::Void => "VOID",
        }
    }
}

/// A dated collection of picks with a lifecycle status.
///
/// `matches` is the published/canonical list, `ai_predictions` the raw
/// machine-generated candidates, and `admin_predictions` the operator draft
/// (absent until first edit).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEvent {
    pub id: String,
    pub date: String,
    pub sport: String,
    #[serde(default)]
    pub matches: Vec<Pick>,
    #[serde(default)]
    pub ai_predictions: Vec<Pick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_predictions: Option<Vec<Pick>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_odds: Option<f64>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub admin_reviewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_selection_total_odds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_selection_count: Option<u32>,
}

impl DailyEvent {
    /// The AI auto-selection baseline: auto-selected picks within `matches`,
    /// falling back to auto-selected picks within `ai_predictions`, falling
    /// back to all of `matches`. Empty when `matches` is empty.
    pub fn ai_selection(&self) -> Vec<Pick> {
        if self.matches.is_empty() {
            return Vec::new();
        }
        let auto: Vec<Pick> = self
            .matches
            .iter()
            .filter(|p| p.auto_selected)
            .cloned()
            .collect();
        if !auto.is_empty() {
            return auto;
        }
        let ai_auto: Vec<Pick> = self
            .ai_predictions
            .iter()
            .filter(|p| p.auto_selected)
            .cloned()
            .collect();
        if !ai_auto.is_empty() {
            return ai_auto;
        }
        self.matches.clone()
    }

    /// The list an operator currently sees: the persisted admin draft when
    /// non-empty, else the AI auto-selection.
    pub fn current_picks(&self) -> Vec<Pick> {
        match &self.admin_predictions {
            Some(drafted) if !drafted.is_empty() => drafted.clone(),
            _ => self.ai_selection(),
        }
    }

    /// Aggregate odds of the AI auto-selection, falling back to the cached
    /// `total_odds` (then 1.0) when the selection is empty.
    pub fn ai_total_odds(&self) -> f64 {
        let picks = self.ai_selection();
        if picks.is_empty() {
            self.total_odds.unwrap_or(1.0)
        } else {
            odds::total_odds(&picks)
        }
    }

    /// Aggregate odds of whatever list `current_picks` resolves to.
    pub fn current_total_odds(&self) -> f64 {
        let picks = self.current_picks();
        if picks.is_empty() {
            self.ai_total_odds()
        } else {
            odds::total_odds(&picks)
        }
    }
}

/// The two reviewable lists returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewQueue {
    #[serde(default)]
    pub pending: Vec<DailyEvent>,
    #[serde(default)]
    pub published: Vec<DailyEvent>,
}

/// Payload for both debounced and manual draft writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReviewRequest {
    pub event_id: String,
    pub admin_predictions: Vec<Pick>,
    pub admin_comments: String,
    pub approved: bool,
}

/// Picks fetched from the upstream prediction provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalPicks {
    #[serde(default)]
    pub picks: Vec<Pick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Acknowledgement for a generate-daily-picks request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPicks {
    pub event_id: String,
    #[serde(default, alias = "matches")]
    pub match_count: u32,
}

/// User record returned by `POST /auth/sync`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(home: &str, away: &str, odds: Option<f64>, auto: bool) -> Pick {
        Pick {
            home_team: Some(home.to_string()),
            away_team: Some(away.to_string()),
            odds,
            auto_selected: auto,
            ..Default::default()
        }
    }

    fn event_with(matches: Vec<Pick>, ai: Vec<Pick>) -> DailyEvent {
        DailyEvent {
            id: "evt-1".to_string(),
            date: "2026-08-27".to_string(),
            sport: "football".to_string(),
            matches,
            ai_predictions: ai,
            admin_predictions: None,
            admin_comments: None,
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
    fn ai_selection_prefers_auto_selected_matches() {
        let event = event_with(
            vec![
                pick("A", "B", Some(1.2), true),
                pick("C", "D", Some(1.5), false),
            ],
            vec![],
        );
        let selection = event.ai_selection();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].home_team.as_deref(), Some("A"));
    }

    #[test]
    fn ai_selection_falls_back_to_ai_predictions_then_all_matches() {
        let event = event_with(
            vec![pick("A", "B", Some(1.2), false)],
            vec![pick("X", "Y", Some(1.8), true)],
        );
        let selection = event.ai_selection();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].home_team.as_deref(), Some("X"));

        let event = event_with(
            vec![
                pick("A", "B", Some(1.2), false),
                pick("C", "D", Some(1.5), false),
            ],
            vec![pick("X", "Y", Some(1.8), false)],
        );
        assert_eq!(event.ai_selection().len(), 2);
    }

    #[test]
    fn ai_selection_empty_without_matches() {
        let event = event_with(vec![], vec![pick("X", "Y", Some(1.8), true)]);
        assert!(event.ai_selection().is_empty());
    }

    #[test]
    fn current_picks_prefers_admin_draft() {
        let mut event = event_with(vec![pick("A", "B", Some(1.2), true)], vec![]);
        event.admin_predictions = Some(vec![pick("E", "F", Some(1.9), false)]);
        let current = event.current_picks();
        assert_eq!(current[0].home_team.as_deref(), Some("E"));

        event.admin_predictions = Some(vec![]);
        let current = event.current_picks();
        assert_eq!(current[0].home_team.as_deref(), Some("A"));
    }

    #[test]
    fn status_defaults_to_pending_when_absent() {
        let json = r#"{
            "id": "evt-2",
            "date": "2026-08-27",
            "sport": "football",
            "matches": [],
            "aiPredictions": [],
            "adminReviewed": false,
            "createdAt": "2026-08-27T08:00:00Z"
        }"#;
        let event: DailyEvent = serde_json::from_str(json).expect("event parses");
        assert_eq!(event.status, EventStatus::Pending);
    }

    #[test]
    fn pick_round_trips_camel_case() {
        let json = r#"{"homeTeam":"A","awayTeam":"B","odds":1.25,"predictedOdds":1.25,"autoSelected":true}"#;
        let p: Pick = serde_json::from_str(json).expect("pick parses");
        assert_eq!(p.odds, Some(1.25));
        assert!(p.auto_selected);
        let back = serde_json::to_value(&p).expect("pick serializes");
        assert_eq!(back["predictedOdds"], 1.25);
    }
}
