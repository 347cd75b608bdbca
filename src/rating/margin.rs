//! Margin-of-victory scaling
//!
//! Blowouts move ratings more than close games, but a blowout that was
//! already expected (large pre-game rating gap) moves ratings less than an
//! equally sized upset. The damping term in the denominator carries that
//! second effect.

use crate::error::{RatingError, Result};

/// Margin-of-victory multiplier with validated constants
#[derive(Debug, Clone, Copy)]
pub struct MarginScaler {
    enabled: bool,
    multiplier: f64,
    damping: f64,
}

impl MarginScaler {
    /// Create a margin scaler.
    ///
    /// Both constants must be strictly positive even when scaling is
    /// disabled; bad constants are a configuration error, not a runtime one.
    pub fn new(enabled: bool, multiplier: f64, damping: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(RatingError::InvalidConfig {
                message: format!("MOV multiplier {} must be strictly positive", multiplier),
            }
            .into());
        }
        if !damping.is_finite() || damping <= 0.0 {
            return Err(RatingError::InvalidConfig {
                message: format!("MOV damping {} must be strictly positive", damping),
            }
            .into());
        }
        Ok(Self {
            enabled,
            multiplier,
            damping,
        })
    }

    /// Multiplier for a game decided by `point_diff` points with a pre-game
    /// rating gap of `rating_diff`. Only magnitudes matter; returns exactly
    /// 1.0 when scaling is disabled.
    pub fn multiplier(&self, point_diff: i64, rating_diff: f64) -> f64 {
        if !self.enabled {
            return 1.0;
        }

        let margin = point_diff.unsigned_abs() as f64;
        (margin + 1.0).ln() * self.multiplier / (self.damping * rating_diff.abs() + self.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_always_returns_one() {
        let scaler = MarginScaler::new(false, 2.2, 0.001).unwrap();
        assert_eq!(scaler.multiplier(0, 0.0), 1.0);
        assert_eq!(scaler.multiplier(60, 300.0), 1.0);
        assert_eq!(scaler.multiplier(-3, -120.0), 1.0);
    }

    #[test]
    fn test_non_positive_constants_rejected() {
        assert!(MarginScaler::new(true, 0.0, 0.001).is_err());
        assert!(MarginScaler::new(true, 2.2, 0.0).is_err());
        assert!(MarginScaler::new(true, -2.2, 0.001).is_err());
    }

    #[test]
    fn test_sign_of_inputs_is_irrelevant() {
        let scaler = MarginScaler::new(true, 2.2, 0.001).unwrap();
        assert_eq!(scaler.multiplier(14, 100.0), scaler.multiplier(-14, 100.0));
        assert_eq!(scaler.multiplier(14, 100.0), scaler.multiplier(14, -100.0));
    }

    #[test]
    fn test_bigger_margins_scale_more() {
        let scaler = MarginScaler::new(true, 2.2, 0.001).unwrap();
        let close = scaler.multiplier(3, 0.0);
        let blowout = scaler.multiplier(28, 0.0);
        assert!(blowout > close);
    }

    #[test]
    fn test_expected_blowouts_are_damped() {
        let scaler = MarginScaler::new(true, 2.2, 0.001).unwrap();
        let upset = scaler.multiplier(28, 0.0);
        let expected = scaler.multiplier(28, 300.0);
        assert!(expected < upset);
    }

    #[test]
    fn test_even_matchup_formula() {
        // ln(15) * 2.2 / (0.001*0 + 2.2) = ln(15)
        let scaler = MarginScaler::new(true, 2.2, 0.001).unwrap();
        let m = scaler.multiplier(14, 0.0);
        assert!((m - 15.0_f64.ln()).abs() < 1e-12);
    }
}
