//! Test fixtures shared across integration tests

use gridline::config::{AdjustmentSettings, EngineConfig};
use gridline::types::{GameContext, TeamSignals};

/// Build a minimal game record with no rest or signal data
pub fn game(season: u16, week: u8, home: &str, away: &str, hs: i64, aw: i64) -> GameContext {
    GameContext {
        season,
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: hs,
        away_score: aw,
        kickoff: None,
        home_rest_days: None,
        away_rest_days: None,
        weather_severity: None,
        home_signals: TeamSignals::default(),
        away_signals: TeamSignals::default(),
    }
}

/// Config with MOV scaling off and every adjustment source disabled, so
/// tests can predict rating movement in closed form
pub fn bare_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.rating.mov_enabled = false;
    config.adjustments = AdjustmentSettings::all_disabled();
    config
}
