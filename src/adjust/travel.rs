//! Rest/travel adjustment source
//!
//! Converts an upstream travel-fatigue score (time zones crossed, short
//! weeks, distance) into a rating-point penalty. Rest-day differentials are
//! handled directly by the game updater; this source covers only the travel
//! side of the rest/travel category.

use crate::adjust::source::AdjustmentSource;
use crate::error::Result;
use crate::types::GameContext;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for the travel-fatigue source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelParams {
    /// Rating points lost per unit of fatigue score
    pub points_per_unit: f64,
}

impl Default for TravelParams {
    fn default() -> Self {
        Self { points_per_unit: 8.0 }
    }
}

impl TravelParams {
    pub fn validate(&self) -> Result<()> {
        if !self.points_per_unit.is_finite() || self.points_per_unit < 0.0 {
            return Err(anyhow!("travel points_per_unit must be non-negative"));
        }
        Ok(())
    }
}

/// Travel-fatigue adjustment source
#[derive(Debug, Clone)]
pub struct TravelAdjustment {
    params: TravelParams,
}

impl TravelAdjustment {
    pub fn new(params: TravelParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl Default for TravelAdjustment {
    fn default() -> Self {
        Self {
            params: TravelParams::default(),
        }
    }
}

impl AdjustmentSource for TravelAdjustment {
    fn name(&self) -> &'static str {
        "travel"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        let fatigue = match context.signals_for(team).and_then(|s| s.travel_fatigue) {
            Some(value) => value,
            None => {
                debug!(team, "no travel fatigue signal, contributing 0");
                return Ok(0.0);
            }
        };

        if !fatigue.is_finite() || fatigue < 0.0 {
            return Err(anyhow!("travel fatigue {} for {} is out of range", fatigue, team));
        }

        Ok(-fatigue * self.params.points_per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamSignals;

    fn context(home_fatigue: Option<f64>, away_fatigue: Option<f64>) -> GameContext {
        GameContext {
            season: 2024,
            week: 9,
            home_team: "SEA".to_string(),
            away_team: "MIA".to_string(),
            home_score: 20,
            away_score: 17,
            kickoff: None,
            home_rest_days: None,
            away_rest_days: None,
            weather_severity: None,
            home_signals: TeamSignals {
                travel_fatigue: home_fatigue,
                ..TeamSignals::default()
            },
            away_signals: TeamSignals {
                travel_fatigue: away_fatigue,
                ..TeamSignals::default()
            },
        }
    }

    #[test]
    fn test_fatigue_is_a_penalty() {
        let source = TravelAdjustment::default();
        let ctx = context(Some(0.0), Some(1.5));

        assert_eq!(source.delta("SEA", &ctx).unwrap(), 0.0);
        assert_eq!(source.delta("MIA", &ctx).unwrap(), -12.0);
    }

    #[test]
    fn test_missing_signal_contributes_zero() {
        let source = TravelAdjustment::default();
        let ctx = context(None, None);
        assert_eq!(source.delta("SEA", &ctx).unwrap(), 0.0);
    }

    #[test]
    fn test_bad_signal_is_an_error() {
        let source = TravelAdjustment::default();
        assert!(source.delta("MIA", &context(None, Some(f64::NAN))).is_err());
        assert!(source.delta("MIA", &context(None, Some(-2.0))).is_err());
    }

    #[test]
    fn test_negative_points_rejected() {
        assert!(TravelAdjustment::new(TravelParams { points_per_unit: -1.0 }).is_err());
    }
}
