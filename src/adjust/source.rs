//! Adjustment source trait and test doubles
//!
//! Every situational adjustment (rest/travel, weather, quarterback form,
//! turnover tendency, red-zone and third-down efficiency) implements the same
//! narrow capability: asked for a team and a game context, answer a raw
//! rating-point delta. The composer owns weighting, capping, and summation.

use crate::error::Result;
use crate::types::GameContext;
use std::sync::Mutex;

/// Capability interface for situational adjustment sources.
///
/// A raw delta is unweighted and uncapped; the composer applies the
/// per-source weight and cap from configuration. Sources must treat a missing
/// signal as a zero delta — an `Err` is reserved for genuinely bad data and
/// degrades to zero at the composer, never aborting a game update.
pub trait AdjustmentSource: Send + Sync {
    /// Stable name used for configuration lookup and history records
    fn name(&self) -> &'static str;

    /// Raw rating-point delta for one team in one game
    fn delta(&self, team: &str, context: &GameContext) -> Result<f64>;
}

/// Source returning fixed per-side deltas, recording every query
#[derive(Debug, Default)]
pub struct FixedAdjustment {
    home_delta: f64,
    away_delta: f64,
    calls: Mutex<Vec<String>>,
}

impl FixedAdjustment {
    pub fn new(home_delta: f64, away_delta: f64) -> Self {
        Self {
            home_delta,
            away_delta,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Teams this source has been queried for, in order
    pub fn queried_teams(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl AdjustmentSource for FixedAdjustment {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(team.to_string());
        }
        Ok(match context.side_of(team) {
            Some(crate::types::Side::Home) => self.home_delta,
            Some(crate::types::Side::Away) => self.away_delta,
            None => 0.0,
        })
    }
}

/// Source that always fails, for exercising graceful degradation
#[derive(Debug, Default)]
pub struct FailingAdjustment;

impl AdjustmentSource for FailingAdjustment {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn delta(&self, _team: &str, _context: &GameContext) -> Result<f64> {
        Err(crate::error::RatingError::Internal {
            message: "signal provider unavailable".to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamSignals;

    fn context() -> GameContext {
        GameContext {
            season: 2024,
            week: 3,
            home_team: "KC".to_string(),
            away_team: "DEN".to_string(),
            home_score: 27,
            away_score: 13,
            kickoff: None,
            home_rest_days: None,
            away_rest_days: None,
            weather_severity: None,
            home_signals: TeamSignals::default(),
            away_signals: TeamSignals::default(),
        }
    }

    #[test]
    fn test_fixed_source_answers_per_side() {
        let source = FixedAdjustment::new(5.0, -3.0);
        let ctx = context();

        assert_eq!(source.delta("KC", &ctx).unwrap(), 5.0);
        assert_eq!(source.delta("DEN", &ctx).unwrap(), -3.0);
        assert_eq!(source.delta("NYJ", &ctx).unwrap(), 0.0);
        assert_eq!(source.queried_teams(), vec!["KC", "DEN", "NYJ"]);
    }

    #[test]
    fn test_failing_source_errors() {
        let source = FailingAdjustment;
        assert!(source.delta("KC", &context()).is_err());
    }
}
