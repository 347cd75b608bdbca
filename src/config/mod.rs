//! Configuration management for the rating engine
//!
//! This module handles all configuration loading from TOML files and
//! environment variables, validation, and default values.

pub mod engine;
pub mod sources;

// Re-export commonly used types
pub use engine::{validate_config, EngineConfig, RatingSettings, SplitSettings};
pub use sources::{AdjustmentSettings, SourceSettings};
