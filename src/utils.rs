//! Utility functions for the rating engine

use crate::types::RunId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique backtest run ID
pub fn generate_run_id() -> RunId {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_run_ids() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();
        assert_ne!(id1, id2);
    }
}
