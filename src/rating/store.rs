//! Rating storage
//!
//! This module owns the current rating for every team. All mutation funnels
//! through `set`/`set_split`, which enforce the non-negativity invariant at a
//! single choke point; the only bulk operation is the between-seasons
//! regression toward the base rating.

use crate::error::{RatingError, Result};
use crate::types::TeamId;
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Offense/defense split rating for one team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRating {
    pub offense: f64,
    pub defense: f64,
}

/// Storage entry for a team's rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: TeamId,
    pub rating: f64,
    /// Present only when the engine runs in split mode
    pub split: Option<SplitRating>,
    pub games_played: u64,
    pub last_updated: DateTime<Utc>,
}

impl TeamEntry {
    fn new(team: TeamId, rating: f64) -> Self {
        Self {
            team,
            rating,
            split: None,
            games_played: 0,
            last_updated: current_timestamp(),
        }
    }
}

/// Owning key/value store for team ratings.
///
/// Teams are never pre-registered: `get` answers the base rating for unseen
/// teams, and the first `set` creates the entry. Entries are never deleted,
/// only regressed toward the base rating between seasons.
#[derive(Debug, Clone)]
pub struct RatingStore {
    base_rating: f64,
    teams: HashMap<TeamId, TeamEntry>,
}

impl RatingStore {
    /// Create an empty store with the given base rating
    pub fn new(base_rating: f64) -> Self {
        Self {
            base_rating,
            teams: HashMap::new(),
        }
    }

    /// The rating unseen teams start at, and the regression target
    pub fn base_rating(&self) -> f64 {
        self.base_rating
    }

    /// Current rating for a team; the base rating if the team is unseen
    pub fn get(&self, team: &str) -> f64 {
        self.teams.get(team).map(|e| e.rating).unwrap_or(self.base_rating)
    }

    /// Current split rating for a team; base offense/defense if unseen
    pub fn get_split(&self, team: &str) -> SplitRating {
        self.teams
            .get(team)
            .and_then(|e| e.split)
            .unwrap_or(SplitRating {
                offense: self.base_rating,
                defense: self.base_rating,
            })
    }

    /// Full entry for a team, if it has been seen
    pub fn entry(&self, team: &str) -> Option<&TeamEntry> {
        self.teams.get(team)
    }

    /// Number of teams with at least one recorded rating
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Set a team's rating, recording one played game.
    ///
    /// Fails with `InvalidRating` if the rating is negative or non-finite;
    /// the store is left unchanged on failure.
    pub fn set(&mut self, team: &str, rating: f64) -> Result<()> {
        if !rating.is_finite() || rating < 0.0 {
            return Err(RatingError::InvalidRating {
                team: team.to_string(),
                value: rating,
            }
            .into());
        }

        let entry = self
            .teams
            .entry(team.to_string())
            .or_insert_with(|| TeamEntry::new(team.to_string(), rating));
        entry.rating = rating;
        entry.games_played += 1;
        entry.last_updated = current_timestamp();
        Ok(())
    }

    /// Set a team's offense/defense split rating.
    ///
    /// Both components share the non-negativity invariant of `set`.
    pub fn set_split(&mut self, team: &str, offense: f64, defense: f64) -> Result<()> {
        for value in [offense, defense] {
            if !value.is_finite() || value < 0.0 {
                return Err(RatingError::InvalidRating {
                    team: team.to_string(),
                    value,
                }
                .into());
            }
        }

        let base_rating = self.base_rating;
        let entry = self
            .teams
            .entry(team.to_string())
            .or_insert_with(|| TeamEntry::new(team.to_string(), base_rating));
        entry.split = Some(SplitRating { offense, defense });
        entry.last_updated = current_timestamp();
        Ok(())
    }

    /// Regress every known team toward the base rating.
    ///
    /// `carry` is the fraction of the old rating kept:
    /// `new = carry * old + (1 - carry) * base`. Applied to split components
    /// independently when present. Called once per season boundary, never
    /// mid-season.
    pub fn regress(&mut self, carry: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&carry) {
            return Err(RatingError::InvalidConfig {
                message: format!("regression carry {} must lie in [0, 1]", carry),
            }
            .into());
        }

        let now = current_timestamp();
        for entry in self.teams.values_mut() {
            entry.rating = carry * entry.rating + (1.0 - carry) * self.base_rating;
            if let Some(split) = entry.split.as_mut() {
                split.offense = carry * split.offense + (1.0 - carry) * self.base_rating;
                split.defense = carry * split.defense + (1.0 - carry) * self.base_rating;
            }
            entry.last_updated = now;
        }
        Ok(())
    }

    /// All entries, sorted by rating descending
    pub fn snapshot(&self) -> Vec<TeamEntry> {
        let mut entries: Vec<TeamEntry> = self.teams.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }
}
