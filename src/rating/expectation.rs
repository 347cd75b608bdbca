//! Win-probability expectation model
//!
//! Converts a rating differential into a win probability on a logistic curve.
//! The scale parameter sets how many rating points correspond to a tenfold
//! change in win odds.

use crate::error::{RatingError, Result};

/// Probabilities are clamped this far away from {0, 1}; the logistic curve
/// underflows to exactly 0 or 1 once the scaled differential is large enough
const PROBABILITY_EPSILON: f64 = 1e-12;

/// Logistic expectation model with a validated scale
#[derive(Debug, Clone, Copy)]
pub struct ExpectationModel {
    scale: f64,
}

impl ExpectationModel {
    /// Create an expectation model.
    ///
    /// Fails with `InvalidScale` if the scale is not strictly positive.
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RatingError::InvalidScale { value: scale }.into());
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Probability that the team rated `rating_a` beats the team rated
    /// `rating_b`. Always in the open interval (0, 1): extreme differentials
    /// that saturate the curve are clamped an epsilon away from {0, 1}.
    /// Symmetric, so `win_probability(a, b) + win_probability(b, a) == 1`
    /// within that epsilon.
    pub fn win_probability(&self, rating_a: f64, rating_b: f64) -> f64 {
        let p = 1.0 / (1.0 + 10.0_f64.powf(-(rating_a - rating_b) / self.scale));
        p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_scale_rejected() {
        assert!(ExpectationModel::new(0.0).is_err());
        assert!(ExpectationModel::new(-400.0).is_err());
        assert!(ExpectationModel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_equal_ratings_are_even_money() {
        let model = ExpectationModel::new(400.0).unwrap();
        assert!((model.win_probability(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let model = ExpectationModel::new(400.0).unwrap();
        let p_ab = model.win_probability(1620.0, 1480.0);
        let p_ba = model.win_probability(1480.0, 1620.0);
        assert!((p_ab + p_ba - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_home_field_example() {
        // 55-point edge on a 400 scale: p = 1/(1+10^(-55/400)) ~ 0.5785
        let model = ExpectationModel::new(400.0).unwrap();
        let p = model.win_probability(1555.0, 1500.0);
        assert!((p - 0.5785).abs() < 1e-3);
    }

    #[test]
    fn test_large_differential_stays_in_open_interval() {
        let model = ExpectationModel::new(400.0).unwrap();
        let p = model.win_probability(4000.0, 0.0);
        assert!(p > 0.99 && p < 1.0);
        let q = model.win_probability(0.0, 4000.0);
        assert!(q > 0.0 && q < 0.01);
    }

    #[test]
    fn test_saturating_differential_is_clamped_into_open_interval() {
        // On a scale of 1, a 4000-point gap underflows the raw curve to 1/0
        let model = ExpectationModel::new(1.0).unwrap();
        let p = model.win_probability(4000.0, 0.0);
        assert!(p < 1.0);
        let q = model.win_probability(0.0, 4000.0);
        assert!(q > 0.0);
        assert!((p + q - 1.0).abs() < 1e-9);
    }
}
