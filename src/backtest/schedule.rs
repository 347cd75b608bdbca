//! Schedule loading
//!
//! The runner processes games strictly in the order it is handed; putting the
//! games in chronological order is the loader's job. This module reads a JSON
//! array of game records and sorts it by (season, week, kickoff).

use crate::error::Result;
use crate::types::GameContext;
use anyhow::Context;
use std::path::Path;

/// Load a schedule from a JSON file and sort it chronologically
pub fn load_schedule(path: &Path) -> Result<Vec<GameContext>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule file {}", path.display()))?;
    let mut games: Vec<GameContext> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse schedule file {}", path.display()))?;
    sort_chronologically(&mut games);
    Ok(games)
}

/// Order games by season, then week, then kickoff time where known
pub fn sort_chronologically(games: &mut [GameContext]) {
    games.sort_by(|a, b| {
        (a.season, a.week, a.kickoff).cmp(&(b.season, b.week, b.kickoff))
    });
}
