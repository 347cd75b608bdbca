//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine failures
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("invalid rating {value} for team {team}: ratings must be non-negative")]
    InvalidRating { team: String, value: f64 },

    #[error("invalid score {home}-{away}: scores must be non-negative")]
    InvalidScore { home: i64, away: i64 },

    #[error("invalid probability {value}: must lie in [0, 1]")]
    InvalidProbability { value: f64 },

    #[error("invalid expectation scale {value}: must be strictly positive")]
    InvalidScale { value: f64 },

    #[error("empty input: {context}")]
    EmptyInput { context: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}
