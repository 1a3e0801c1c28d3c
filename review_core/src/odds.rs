//! Odds aggregation and draft normalization.
//!
//! `total_odds` is the multiplicative aggregate shown next to every pick
//! list; `normalize_picks` is applied to the draft immediately before any
//! write to the backend.

use crate::models::Pick;

/// Round an odds value to 4 decimal places.
pub fn round_odds(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Multiplicative aggregate over a pick list.
///
/// Folds an accumulator starting at 1.0, multiplying by each pick's `odds`
/// if finite, else `predicted_odds` if finite, else 1.0. The identity for an
/// empty list is therefore 1.0.
pub fn total_odds(picks: &[Pick]) -> f64 {
    picks.iter().fold(1.0, |acc, p| acc * p.effective_odds())
}

/// Prepare a draft for persistence.
///
/// Picks missing either team name are dropped (never surfaced as an error).
/// For the rest, a single odds value is resolved (`odds` preferred over
/// `predicted_odds`), rounded to 4 decimals, and written into both fields.
/// A pick whose odds cannot be resolved to a finite number keeps its fields
/// untouched rather than being coerced to zero.
pub fn normalize_picks(picks: &[Pick]) -> Vec<Pick> {
    picks
        .iter()
        .filter(|p| p.has_both_teams())
        .map(|p| {
            let mut pick = p.clone();
            let resolved = match (pick.odds, pick.predicted_odds) {
                (Some(v), _) if v.is_finite() => Some(round_odds(v)),
                (_, Some(v)) if v.is_finite() => Some(round_odds(v)),
                _ => None,
            };
            if let Some(value) = resolved {
                pick.odds = Some(value);
                pick.predicted_odds = Some(value);
            }
            pick
        })
        .collect()
}
