//! Evaluation report assembly
//!
//! Bundles every metric the engine tracks into one serializable report,
//! derived purely from a recorded game history.

use crate::error::Result;
use crate::eval::metrics::{
    accuracy, brier_score, calibration, expected_calibration_error, log_loss, samples_from_results,
    sharpness, CalibrationBin,
};
use crate::types::GameResult;
use serde::{Deserialize, Serialize};

/// Default number of calibration bins
pub const DEFAULT_CALIBRATION_BINS: usize = 10;

/// Full scoring summary for one backtest history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub samples: usize,
    pub brier_score: f64,
    pub log_loss: f64,
    pub expected_calibration_error: f64,
    pub sharpness: f64,
    /// Fraction of games called correctly at the 0.5 threshold
    pub accuracy: f64,
    pub calibration: Vec<CalibrationBin>,
}

/// Score a recorded game history.
///
/// Fails with `EmptyInput` on an empty history; probabilities outside
/// [0, 1] surface as `InvalidProbability`.
pub fn evaluate(results: &[GameResult], bins: usize) -> Result<EvaluationReport> {
    let samples = samples_from_results(results);

    Ok(EvaluationReport {
        samples: samples.len(),
        brier_score: brier_score(&samples)?,
        log_loss: log_loss(&samples)?,
        expected_calibration_error: expected_calibration_error(&samples, bins)?,
        sharpness: sharpness(&samples)?,
        accuracy: accuracy(&samples)?,
        calibration: calibration(&samples, bins)?,
    })
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "samples: {}", self.samples)?;
        writeln!(f, "brier score: {:.4}", self.brier_score)?;
        writeln!(f, "log loss: {:.4}", self.log_loss)?;
        writeln!(
            f,
            "expected calibration error: {:.4}",
            self.expected_calibration_error
        )?;
        writeln!(f, "sharpness: {:.4}", self.sharpness)?;
        writeln!(f, "accuracy: {:.1}%", self.accuracy * 100.0)?;
        writeln!(f, "calibration:")?;
        for bin in &self.calibration {
            writeln!(
                f,
                "  [{:.2}, {:.2}] n={:<4} predicted {:.3} observed {:.3}",
                bin.lower, bin.upper, bin.count, bin.mean_predicted, bin.observed_rate
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameContext, TeamSignals};

    fn result(probability: f64, home_score: i64, away_score: i64) -> GameResult {
        GameResult {
            context: GameContext {
                season: 2024,
                week: 1,
                home_team: "NYG".to_string(),
                away_team: "WAS".to_string(),
                home_score,
                away_score,
                kickoff: None,
                home_rest_days: None,
                away_rest_days: None,
                weather_severity: None,
                home_signals: TeamSignals::default(),
                away_signals: TeamSignals::default(),
            },
            pre_home_rating: 1500.0,
            pre_away_rating: 1500.0,
            post_home_rating: 1500.0,
            post_away_rating: 1500.0,
            home_win_probability: probability,
            home_won: home_score > away_score,
            adjustments: vec![],
        }
    }

    #[test]
    fn test_report_from_history() {
        let history = vec![
            result(0.7, 24, 17),
            result(0.6, 13, 20),
            result(0.3, 10, 31),
            result(0.8, 27, 7),
        ];

        let report = evaluate(&history, 2).unwrap();
        assert_eq!(report.samples, 4);
        assert!(report.brier_score > 0.0 && report.brier_score < 1.0);
        assert!(report.log_loss > 0.0);
        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.calibration.len(), 2);
    }

    #[test]
    fn test_empty_history_is_an_error() {
        assert!(evaluate(&[], DEFAULT_CALIBRATION_BINS).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let history = vec![result(0.6, 21, 14)];
        let report = evaluate(&history, 1).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("brier_score"));
    }
}
