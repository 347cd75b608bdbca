//! Weather adjustment source
//!
//! Weather severity is a venue-level scalar, but the composer contract is
//! per-team: harsh conditions shift the edge toward the acclimatized home
//! side, so the home team gains what the away team loses.

use crate::adjust::source::AdjustmentSource;
use crate::error::Result;
use crate::types::{GameContext, Side};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for the weather source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherParams {
    /// Rating points shifted toward the home side per unit of severity
    pub home_edge_per_unit: f64,
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            home_edge_per_unit: 3.0,
        }
    }
}

impl WeatherParams {
    pub fn validate(&self) -> Result<()> {
        if !self.home_edge_per_unit.is_finite() || self.home_edge_per_unit < 0.0 {
            return Err(anyhow!("weather home_edge_per_unit must be non-negative"));
        }
        Ok(())
    }
}

/// Weather-severity adjustment source
#[derive(Debug, Clone)]
pub struct WeatherAdjustment {
    params: WeatherParams,
}

impl WeatherAdjustment {
    pub fn new(params: WeatherParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl Default for WeatherAdjustment {
    fn default() -> Self {
        Self {
            params: WeatherParams::default(),
        }
    }
}

impl AdjustmentSource for WeatherAdjustment {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        let severity = match context.weather_severity {
            Some(value) => value,
            None => {
                debug!(team, "no weather severity signal, contributing 0");
                return Ok(0.0);
            }
        };

        if !severity.is_finite() || severity < 0.0 {
            return Err(anyhow!("weather severity {} is out of range", severity));
        }

        let edge = severity * self.params.home_edge_per_unit;
        Ok(match context.side_of(team) {
            Some(Side::Home) => edge,
            Some(Side::Away) => -edge,
            None => 0.0,
        })
    }
}
