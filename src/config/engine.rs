//! Main engine configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including TOML file loading, environment variable overrides, and
//! validation. Validation happens once at construction of the engine
//! components; the update path never re-checks these invariants.

use crate::config::sources::AdjustmentSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Complete rating-engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rating: RatingSettings,
    pub split: SplitSettings,
    pub adjustments: AdjustmentSettings,
}

/// Core rating-update settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Rating every unseen team starts at, and the regression target
    pub base_rating: f64,
    /// K-factor: maximum unscaled per-game rating movement
    pub k_factor: f64,
    /// Rating points added to the home team before computing expectation
    pub home_field_advantage: f64,
    /// Logistic curve scale: rating difference worth ~10x win odds
    pub expectation_scale: f64,
    /// Whether margin-of-victory scaling is applied
    pub mov_enabled: bool,
    /// Margin-of-victory multiplier numerator
    pub mov_multiplier: f64,
    /// Damping applied per point of pre-game rating difference
    pub mov_damping: f64,
    /// Hard cap on how far any single game may move a rating
    pub max_shift_per_game: f64,
    /// Fraction of a team's rating carried across a season boundary;
    /// the remainder regresses to the base rating
    pub preseason_carry: f64,
    /// Rating points per day of rest advantage
    pub rest_points_per_day: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            base_rating: 1500.0,
            k_factor: 20.0,
            home_field_advantage: 55.0,
            expectation_scale: 400.0,
            mov_enabled: true,
            mov_multiplier: 2.2,
            mov_damping: 0.001,
            max_shift_per_game: 50.0,
            preseason_carry: 0.75,
            rest_points_per_day: 1.5,
        }
    }
}

/// Offense/defense split-rating settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Whether offense/defense split ratings are tracked alongside the
    /// overall rating
    pub enabled: bool,
    /// K-factor for split-rating movement, in rating points per point of
    /// scoring surprise
    pub k_factor: f64,
    /// League-average points scored per team per game
    pub baseline_points: f64,
    /// Rating points corresponding to one point of expected scoring
    pub points_per_rating: f64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            k_factor: 2.0,
            baseline_points: 21.0,
            points_per_rating: 25.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, with defaults for absent fields
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base) = env::var("GRIDLINE_BASE_RATING") {
            config.rating.base_rating = base
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_BASE_RATING value: {}", base))?;
        }
        if let Ok(k) = env::var("GRIDLINE_K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_K_FACTOR value: {}", k))?;
        }
        if let Ok(hfa) = env::var("GRIDLINE_HOME_FIELD_ADVANTAGE") {
            config.rating.home_field_advantage = hfa
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_HOME_FIELD_ADVANTAGE value: {}", hfa))?;
        }
        if let Ok(scale) = env::var("GRIDLINE_EXPECTATION_SCALE") {
            config.rating.expectation_scale = scale
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_EXPECTATION_SCALE value: {}", scale))?;
        }
        if let Ok(mov) = env::var("GRIDLINE_MOV_ENABLED") {
            config.rating.mov_enabled = mov
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_MOV_ENABLED value: {}", mov))?;
        }
        if let Ok(max_shift) = env::var("GRIDLINE_MAX_SHIFT_PER_GAME") {
            config.rating.max_shift_per_game = max_shift
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_MAX_SHIFT_PER_GAME value: {}", max_shift))?;
        }
        if let Ok(carry) = env::var("GRIDLINE_PRESEASON_CARRY") {
            config.rating.preseason_carry = carry
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_PRESEASON_CARRY value: {}", carry))?;
        }
        if let Ok(split) = env::var("GRIDLINE_SPLIT_ENABLED") {
            config.split.enabled = split
                .parse()
                .map_err(|_| anyhow!("Invalid GRIDLINE_SPLIT_ENABLED value: {}", split))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}

/// Validate configuration values
pub fn validate_config(config: &EngineConfig) -> Result<()> {
    let rating = &config.rating;

    if !rating.base_rating.is_finite() || rating.base_rating < 0.0 {
        return Err(anyhow!("Base rating must be non-negative"));
    }
    if !rating.k_factor.is_finite() || rating.k_factor <= 0.0 {
        return Err(anyhow!("K-factor must be strictly positive"));
    }
    if !rating.home_field_advantage.is_finite() {
        return Err(anyhow!("Home-field advantage must be finite"));
    }
    if !rating.expectation_scale.is_finite() || rating.expectation_scale <= 0.0 {
        return Err(anyhow!("Expectation scale must be strictly positive"));
    }
    if !rating.mov_multiplier.is_finite() || rating.mov_multiplier <= 0.0 {
        return Err(anyhow!("MOV multiplier must be strictly positive"));
    }
    if !rating.mov_damping.is_finite() || rating.mov_damping <= 0.0 {
        return Err(anyhow!("MOV damping must be strictly positive"));
    }
    if !rating.max_shift_per_game.is_finite() || rating.max_shift_per_game < 0.0 {
        return Err(anyhow!("Max shift per game must be non-negative"));
    }
    if !(0.0..=1.0).contains(&rating.preseason_carry) {
        return Err(anyhow!("Preseason carry must lie in [0, 1]"));
    }
    if !rating.rest_points_per_day.is_finite() {
        return Err(anyhow!("Rest points per day must be finite"));
    }

    let split = &config.split;
    if !split.k_factor.is_finite() || split.k_factor < 0.0 {
        return Err(anyhow!("Split K-factor must be non-negative"));
    }
    if !split.baseline_points.is_finite() || split.baseline_points < 0.0 {
        return Err(anyhow!("Split baseline points must be non-negative"));
    }
    if !split.points_per_rating.is_finite() || split.points_per_rating <= 0.0 {
        return Err(anyhow!("Split points per rating must be strictly positive"));
    }

    config.adjustments.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rating.base_rating, 1500.0);
        assert_eq!(config.rating.k_factor, 20.0);
        assert!(!config.split.enabled);
    }

    #[test]
    fn test_non_positive_k_rejected() {
        let mut config = EngineConfig::default();
        config.rating.k_factor = 0.0;
        assert!(config.validate().is_err());

        config.rating.k_factor = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let mut config = EngineConfig::default();
        config.rating.expectation_scale = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_mov_constants_rejected() {
        let mut config = EngineConfig::default();
        config.rating.mov_multiplier = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.rating.mov_damping = -0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_carry_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config.rating.preseason_carry = 1.5;
        assert!(config.validate().is_err());

        config.rating.preseason_carry = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_max_shift_rejected() {
        let mut config = EngineConfig::default();
        config.rating.max_shift_per_game = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.rating.k_factor, config.rating.k_factor);
        assert_eq!(parsed.split.enabled, config.split.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: EngineConfig = toml::from_str(
            r#"
            [rating]
            k_factor = 32.0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.rating.k_factor, 32.0);
        assert_eq!(parsed.rating.base_rating, 1500.0);
        assert!(parsed.adjustments.travel.enabled);
    }
}
