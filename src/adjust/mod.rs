//! Situational adjustments: capability trait, concrete sources, composer
//!
//! Each source answers a bounded rating-point delta for a team and game; the
//! composer holds a data-driven list of sources and merges their deltas into
//! one pre-game shift per side.

pub mod composer;
pub mod efficiency;
pub mod quarterback;
pub mod source;
pub mod travel;
pub mod turnover;
pub mod weather;

// Re-export commonly used types
pub use composer::AdjustmentComposer;
pub use efficiency::{EfficiencyParams, RedZoneAdjustment, ThirdDownAdjustment};
pub use quarterback::{QuarterbackAdjustment, QuarterbackParams};
pub use source::{AdjustmentSource, FailingAdjustment, FixedAdjustment};
pub use travel::{TravelAdjustment, TravelParams};
pub use turnover::{TurnoverAdjustment, TurnoverParams};
pub use weather::{WeatherAdjustment, WeatherParams};
