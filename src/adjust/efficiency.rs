//! Red-zone and third-down efficiency adjustment sources
//!
//! Both sources read a centered conversion-rate signal (0 = league average)
//! and scale it linearly to rating points. They share a parameter shape but
//! stay separate sources so each can be enabled, weighted, and capped on its
//! own.

use crate::adjust::source::AdjustmentSource;
use crate::error::Result;
use crate::types::GameContext;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters shared by the efficiency sources
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyParams {
    /// Rating points per unit of centered conversion rate
    pub points_per_unit: f64,
}

impl Default for EfficiencyParams {
    fn default() -> Self {
        Self { points_per_unit: 5.0 }
    }
}

impl EfficiencyParams {
    pub fn validate(&self, source: &str) -> Result<()> {
        if !self.points_per_unit.is_finite() || self.points_per_unit < 0.0 {
            return Err(anyhow!("{} points_per_unit must be non-negative", source));
        }
        Ok(())
    }
}

/// Red-zone conversion adjustment source
#[derive(Debug, Clone)]
pub struct RedZoneAdjustment {
    params: EfficiencyParams,
}

impl RedZoneAdjustment {
    pub fn new(params: EfficiencyParams) -> Result<Self> {
        params.validate("red_zone")?;
        Ok(Self { params })
    }
}

impl Default for RedZoneAdjustment {
    fn default() -> Self {
        Self {
            params: EfficiencyParams::default(),
        }
    }
}

impl AdjustmentSource for RedZoneAdjustment {
    fn name(&self) -> &'static str {
        "red_zone"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        scaled_rate(
            "red zone",
            team,
            context.signals_for(team).and_then(|s| s.red_zone_rate),
            self.params.points_per_unit,
        )
    }
}

/// Third-down conversion adjustment source
#[derive(Debug, Clone)]
pub struct ThirdDownAdjustment {
    params: EfficiencyParams,
}

impl ThirdDownAdjustment {
    pub fn new(params: EfficiencyParams) -> Result<Self> {
        params.validate("third_down")?;
        Ok(Self { params })
    }
}

impl Default for ThirdDownAdjustment {
    fn default() -> Self {
        Self {
            params: EfficiencyParams::default(),
        }
    }
}

impl AdjustmentSource for ThirdDownAdjustment {
    fn name(&self) -> &'static str {
        "third_down"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        scaled_rate(
            "third down",
            team,
            context.signals_for(team).and_then(|s| s.third_down_rate),
            self.params.points_per_unit,
        )
    }
}

fn scaled_rate(label: &str, team: &str, rate: Option<f64>, points_per_unit: f64) -> Result<f64> {
    let rate = match rate {
        Some(value) => value,
        None => {
            debug!(team, "no {} rate signal, contributing 0", label);
            return Ok(0.0);
        }
    };

    if !rate.is_finite() {
        return Err(anyhow!("{} rate {} for {} is not finite", label, rate, team));
    }

    Ok(rate * points_per_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamSignals;

    fn context() -> GameContext {
        GameContext {
            season: 2024,
            week: 13,
            home_team: "BAL".to_string(),
            away_team: "PIT".to_string(),
            home_score: 17,
            away_score: 13,
            kickoff: None,
            home_rest_days: None,
            away_rest_days: None,
            weather_severity: None,
            home_signals: TeamSignals {
                red_zone_rate: Some(0.8),
                third_down_rate: Some(-0.4),
                ..TeamSignals::default()
            },
            away_signals: TeamSignals::default(),
        }
    }

    #[test]
    fn test_red_zone_rate_scales_to_points() {
        let source = RedZoneAdjustment::default();
        assert_eq!(source.delta("BAL", &context()).unwrap(), 4.0);
        assert_eq!(source.delta("PIT", &context()).unwrap(), 0.0);
    }

    #[test]
    fn test_third_down_rate_scales_to_points() {
        let source = ThirdDownAdjustment::default();
        assert_eq!(source.delta("BAL", &context()).unwrap(), -2.0);
    }

    #[test]
    fn test_non_finite_rate_is_an_error() {
        let source = RedZoneAdjustment::default();
        let mut ctx = context();
        ctx.home_signals.red_zone_rate = Some(f64::NAN);
        assert!(source.delta("BAL", &ctx).is_err());
    }

    #[test]
    fn test_bad_params_rejected() {
        assert!(RedZoneAdjustment::new(EfficiencyParams { points_per_unit: -1.0 }).is_err());
        assert!(ThirdDownAdjustment::new(EfficiencyParams {
            points_per_unit: f64::NAN
        })
        .is_err());
    }
}
