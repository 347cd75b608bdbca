//! Per-source adjustment settings
//!
//! Each situational adjustment source (rest/travel, weather, quarterback,
//! turnover, red-zone, third-down) carries an enable flag, a weight applied to
//! its raw delta, and a hard cap on the weighted delta's magnitude.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Settings for one adjustment source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Whether the composer queries this source at all
    pub enabled: bool,
    /// Multiplier applied to the source's raw delta
    pub weight: f64,
    /// Cap on the weighted delta's absolute value, in rating points
    pub max_delta: f64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 1.0,
            max_delta: 25.0,
        }
    }
}

impl SourceSettings {
    /// A disabled source, for configs that opt out of a category
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Validate settings values
    pub fn validate(&self, source: &str) -> Result<()> {
        if !self.weight.is_finite() {
            return Err(anyhow!("{} weight must be finite", source));
        }
        if !self.max_delta.is_finite() || self.max_delta < 0.0 {
            return Err(anyhow!("{} max_delta must be non-negative", source));
        }
        Ok(())
    }
}

/// Settings for every adjustment source the engine knows about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSettings {
    pub travel: SourceSettings,
    pub weather: SourceSettings,
    pub quarterback: SourceSettings,
    pub turnover: SourceSettings,
    pub red_zone: SourceSettings,
    pub third_down: SourceSettings,
}

impl AdjustmentSettings {
    /// Settings with every source switched off
    pub fn all_disabled() -> Self {
        Self {
            travel: SourceSettings::disabled(),
            weather: SourceSettings::disabled(),
            quarterback: SourceSettings::disabled(),
            turnover: SourceSettings::disabled(),
            red_zone: SourceSettings::disabled(),
            third_down: SourceSettings::disabled(),
        }
    }

    /// Validate all per-source settings
    pub fn validate(&self) -> Result<()> {
        self.travel.validate("travel")?;
        self.weather.validate("weather")?;
        self.quarterback.validate("quarterback")?;
        self.turnover.validate("turnover")?;
        self.red_zone.validate("red_zone")?;
        self.third_down.validate("third_down")?;
        Ok(())
    }
}
