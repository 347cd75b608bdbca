//! Turnover-tendency adjustment source
//!
//! Turnover margin is noisy and regresses hard toward the mean, so the
//! centered margin signal is squashed through tanh before scaling: small
//! tendencies transfer almost linearly, extreme ones saturate.

use crate::adjust::source::AdjustmentSource;
use crate::error::Result;
use crate::types::GameContext;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for the turnover source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverParams {
    /// Rating points at full saturation of the margin signal
    pub points_per_unit: f64,
}

impl Default for TurnoverParams {
    fn default() -> Self {
        Self { points_per_unit: 6.0 }
    }
}

impl TurnoverParams {
    pub fn validate(&self) -> Result<()> {
        if !self.points_per_unit.is_finite() || self.points_per_unit < 0.0 {
            return Err(anyhow!("turnover points_per_unit must be non-negative"));
        }
        Ok(())
    }
}

/// Turnover-margin adjustment source
#[derive(Debug, Clone)]
pub struct TurnoverAdjustment {
    params: TurnoverParams,
}

impl TurnoverAdjustment {
    pub fn new(params: TurnoverParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl Default for TurnoverAdjustment {
    fn default() -> Self {
        Self {
            params: TurnoverParams::default(),
        }
    }
}

impl AdjustmentSource for TurnoverAdjustment {
    fn name(&self) -> &'static str {
        "turnover"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        let margin = match context.signals_for(team).and_then(|s| s.turnover_margin) {
            Some(value) => value,
            None => {
                debug!(team, "no turnover margin signal, contributing 0");
                return Ok(0.0);
            }
        };

        if !margin.is_finite() {
            return Err(anyhow!("turnover margin {} for {} is not finite", margin, team));
        }

        Ok(margin.tanh() * self.params.points_per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamSignals;

    fn context(home_margin: Option<f64>) -> GameContext {
        GameContext {
            season: 2024,
            week: 11,
            home_team: "SF".to_string(),
            away_team: "LAR".to_string(),
            home_score: 30,
            away_score: 24,
            kickoff: None,
            home_rest_days: None,
            away_rest_days: None,
            weather_severity: None,
            home_signals: TeamSignals {
                turnover_margin: home_margin,
                ..TeamSignals::default()
            },
            away_signals: TeamSignals::default(),
        }
    }

    #[test]
    fn test_positive_margin_is_a_boost() {
        let source = TurnoverAdjustment::default();
        let delta = source.delta("SF", &context(Some(0.5))).unwrap();
        assert!(delta > 0.0);
        assert!((delta - 0.5_f64.tanh() * 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_margins_saturate() {
        let source = TurnoverAdjustment::default();
        let big = source.delta("SF", &context(Some(10.0))).unwrap();
        let bigger = source.delta("SF", &context(Some(100.0))).unwrap();

        assert!(big <= 6.0);
        assert!((bigger - big).abs() < 1e-3);
    }

    #[test]
    fn test_missing_signal_contributes_zero() {
        let source = TurnoverAdjustment::default();
        assert_eq!(source.delta("SF", &context(None)).unwrap(), 0.0);
    }

    #[test]
    fn test_non_finite_margin_is_an_error() {
        let source = TurnoverAdjustment::default();
        assert!(source.delta("SF", &context(Some(f64::INFINITY))).is_err());
    }
}
