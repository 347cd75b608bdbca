//! Prediction scoring: proper scoring rules, calibration, report assembly

pub mod metrics;
pub mod report;

// Re-export commonly used types
pub use metrics::{
    accuracy, brier_score, calibration, expected_calibration_error, log_loss, sharpness,
    CalibrationBin, PredictionSample,
};
pub use report::{evaluate, EvaluationReport, DEFAULT_CALIBRATION_BINS};
