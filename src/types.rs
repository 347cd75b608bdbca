//! Common types used throughout the rating engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for teams
pub type TeamId = String;

/// Unique identifier for backtest runs
pub type RunId = Uuid;

/// Which side of a game a team is playing on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Situational signal values for one team, computed by upstream collaborators.
///
/// Each value is a single scalar per game; `None` means the collaborator had no
/// data for this team/game and the corresponding adjustment source contributes
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSignals {
    /// Travel fatigue score (0 = fresh, higher = more worn down)
    pub travel_fatigue: Option<f64>,
    /// Quarterback form score, centered on league average
    pub qb_form: Option<f64>,
    /// Turnover-margin tendency, centered on league average
    pub turnover_margin: Option<f64>,
    /// Red-zone conversion rate, centered on league average
    pub red_zone_rate: Option<f64>,
    /// Third-down conversion rate, centered on league average
    pub third_down_rate: Option<f64>,
}

/// Read-only description of one completed game.
///
/// Produced by an external schedule/results loader; consumed by one
/// `GameUpdater` invocation and recorded in the backtest history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContext {
    pub season: u16,
    pub week: u8,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: i64,
    pub away_score: i64,
    /// Kickoff time, when the loader knows it
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    /// Days since each side last played
    #[serde(default)]
    pub home_rest_days: Option<i64>,
    #[serde(default)]
    pub away_rest_days: Option<i64>,
    /// Venue-level weather severity (0 = benign, higher = harsher)
    #[serde(default)]
    pub weather_severity: Option<f64>,
    #[serde(default)]
    pub home_signals: TeamSignals,
    #[serde(default)]
    pub away_signals: TeamSignals,
}

impl GameContext {
    /// Which side the given team plays on in this game, if it plays at all.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team {
            Some(Side::Home)
        } else if self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Signals for the given team, if it plays in this game.
    pub fn signals_for(&self, team: &str) -> Option<&TeamSignals> {
        match self.side_of(team)? {
            Side::Home => Some(&self.home_signals),
            Side::Away => Some(&self.away_signals),
        }
    }

    /// Tie policy: a tied score counts as a home loss.
    pub fn home_won(&self) -> bool {
        self.home_score > self.away_score
    }
}

/// Weighted, capped rating-point contribution of a single adjustment source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDelta {
    pub source: String,
    pub home: f64,
    pub away: f64,
}

/// Sum of all enabled adjustment sources for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedAdjustment {
    pub home_total: f64,
    pub away_total: f64,
    /// Per-source contributions, in registration order
    pub breakdown: Vec<SourceDelta>,
}

/// History record for one processed game.
///
/// Appended once per game by the backtest runner and never mutated afterward;
/// the ordered sequence is what the evaluator consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub context: GameContext,
    pub pre_home_rating: f64,
    pub pre_away_rating: f64,
    pub post_home_rating: f64,
    pub post_away_rating: f64,
    /// Pre-game probability assigned to a home win
    pub home_win_probability: f64,
    pub home_won: bool,
    /// Per-source adjustment deltas that fed this update
    pub adjustments: Vec<SourceDelta>,
}
