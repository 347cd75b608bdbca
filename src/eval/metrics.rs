//! Scoring rules and calibration metrics
//!
//! Pure functions over a finite, already-collected set of (probability,
//! outcome) samples. Nothing here has side effects; every metric is
//! recomputable at any time from the same history.

use crate::error::{RatingError, Result};
use crate::types::GameResult;
use serde::{Deserialize, Serialize};

/// Probabilities are clamped this far away from {0, 1} inside log loss
const LOG_LOSS_EPSILON: f64 = 1e-15;

/// One scored prediction: assigned probability and what actually happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionSample {
    /// Probability assigned to the outcome being 1
    pub probability: f64,
    /// 1.0 for a home win, 0.0 otherwise
    pub outcome: f64,
}

impl PredictionSample {
    pub fn new(probability: f64, outcome: bool) -> Self {
        Self {
            probability,
            outcome: if outcome { 1.0 } else { 0.0 },
        }
    }
}

/// Extract (home win probability, home won) samples from a game history
pub fn samples_from_results(results: &[GameResult]) -> Vec<PredictionSample> {
    results
        .iter()
        .map(|r| PredictionSample::new(r.home_win_probability, r.home_won))
        .collect()
}

/// One calibration bin: predictions grouped by assigned probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub mean_predicted: f64,
    pub observed_rate: f64,
}

fn validate(samples: &[PredictionSample], what: &str) -> Result<()> {
    if samples.is_empty() {
        return Err(RatingError::EmptyInput {
            context: what.to_string(),
        }
        .into());
    }
    for sample in samples {
        if !sample.probability.is_finite()
            || !(0.0..=1.0).contains(&sample.probability)
        {
            return Err(RatingError::InvalidProbability {
                value: sample.probability,
            }
            .into());
        }
    }
    Ok(())
}

/// Mean squared error between probability and outcome. Range [0, 1];
/// 0 is a perfect, fully confident record.
pub fn brier_score(samples: &[PredictionSample]) -> Result<f64> {
    validate(samples, "brier score")?;

    let sum: f64 = samples
        .iter()
        .map(|s| (s.probability - s.outcome).powi(2))
        .sum();
    Ok(sum / samples.len() as f64)
}

/// Mean negative log-likelihood. Probabilities are clamped away from
/// {0, 1} so a confidently wrong prediction scores finitely; computed
/// termwise, so a single-class outcome set needs no special casing.
pub fn log_loss(samples: &[PredictionSample]) -> Result<f64> {
    validate(samples, "log loss")?;

    let sum: f64 = samples
        .iter()
        .map(|s| {
            let p = s.probability.clamp(LOG_LOSS_EPSILON, 1.0 - LOG_LOSS_EPSILON);
            -(s.outcome * p.ln() + (1.0 - s.outcome) * (1.0 - p).ln())
        })
        .sum();
    Ok(sum / samples.len() as f64)
}

/// Group predictions into `bins` groups and report per-group mean predicted
/// probability vs. observed outcome rate.
///
/// Binning is quantile-based so every bin carries comparable weight; when
/// tied predictions collapse a quantile boundary, the partition falls back
/// to equal-width bins over [0, 1].
pub fn calibration(samples: &[PredictionSample], bins: usize) -> Result<Vec<CalibrationBin>> {
    validate(samples, "calibration")?;
    if bins == 0 {
        return Err(RatingError::InvalidConfig {
            message: "calibration bin count must be at least 1".to_string(),
        }
        .into());
    }

    let bins = bins.min(samples.len());

    let mut sorted: Vec<PredictionSample> = samples.to_vec();
    sorted.sort_by(|a, b| {
        a.probability
            .partial_cmp(&b.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(quantile_bins) = quantile_partition(&sorted, bins) {
        return Ok(quantile_bins);
    }
    Ok(equal_width_partition(&sorted, bins))
}

/// Quantile partition into near-equal chunks; None when tied probabilities
/// collapse a chunk boundary.
fn quantile_partition(sorted: &[PredictionSample], bins: usize) -> Option<Vec<CalibrationBin>> {
    let n = sorted.len();
    let mut out = Vec::with_capacity(bins);
    let mut start = 0;

    for i in 0..bins {
        // Chunk boundaries at the quantile cut points
        let end = (n * (i + 1)) / bins;
        if end <= start {
            return None;
        }
        let chunk = &sorted[start..end];

        // A boundary shared with the next chunk means ties collapsed it
        if end < n && sorted[end - 1].probability == sorted[end].probability {
            return None;
        }

        out.push(summarize_bin(
            chunk,
            chunk[0].probability,
            chunk[chunk.len() - 1].probability,
        ));
        start = end;
    }

    Some(out)
}

/// Equal-width partition over [0, 1]; empty bins are reported with zero count
fn equal_width_partition(sorted: &[PredictionSample], bins: usize) -> Vec<CalibrationBin> {
    let mut grouped: Vec<Vec<PredictionSample>> = vec![Vec::new(); bins];
    for sample in sorted {
        let idx = ((sample.probability * bins as f64).floor() as usize).min(bins - 1);
        grouped[idx].push(*sample);
    }

    grouped
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let lower = i as f64 / bins as f64;
            let upper = (i + 1) as f64 / bins as f64;
            summarize_bin(&chunk, lower, upper)
        })
        .collect()
}

fn summarize_bin(chunk: &[PredictionSample], lower: f64, upper: f64) -> CalibrationBin {
    let count = chunk.len();
    let (mean_predicted, observed_rate) = if count > 0 {
        let pred: f64 = chunk.iter().map(|s| s.probability).sum();
        let obs: f64 = chunk.iter().map(|s| s.outcome).sum();
        (pred / count as f64, obs / count as f64)
    } else {
        (0.0, 0.0)
    };

    CalibrationBin {
        lower,
        upper,
        count,
        mean_predicted,
        observed_rate,
    }
}

/// Sample-count-weighted mean absolute gap between predicted and observed
/// rates across calibration bins.
pub fn expected_calibration_error(samples: &[PredictionSample], bins: usize) -> Result<f64> {
    let partition = calibration(samples, bins)?;
    let n = samples.len() as f64;

    Ok(partition
        .iter()
        .filter(|bin| bin.count > 0)
        .map(|bin| {
            (bin.count as f64 / n) * (bin.mean_predicted - bin.observed_rate).abs()
        })
        .sum())
}

/// Population variance of the predicted probabilities. A model that only
/// ever says 0.5 has sharpness 0; sharpness says nothing about correctness,
/// only decisiveness.
pub fn sharpness(samples: &[PredictionSample]) -> Result<f64> {
    validate(samples, "sharpness")?;

    let n = samples.len() as f64;
    let mean: f64 = samples.iter().map(|s| s.probability).sum::<f64>() / n;
    let variance: f64 = samples
        .iter()
        .map(|s| (s.probability - mean).powi(2))
        .sum::<f64>()
        / n;
    Ok(variance)
}

/// Fraction of outcomes called correctly at the 0.5 threshold
pub fn accuracy(samples: &[PredictionSample]) -> Result<f64> {
    validate(samples, "accuracy")?;

    let correct = samples
        .iter()
        .filter(|s| (s.probability >= 0.5) == (s.outcome >= 0.5))
        .count();
    Ok(correct as f64 / samples.len() as f64)
}
