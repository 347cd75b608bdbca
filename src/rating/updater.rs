//! Per-game rating update
//!
//! `GameUpdater` is the atomic operation of the engine: two pre-game ratings,
//! a final score, and a composed adjustment go in; two post-game ratings and
//! the pre-game win probability assigned to the outcome come out. It is a pure
//! function per game and the only writer of the rating store.

use crate::config::{EngineConfig, SplitSettings};
use crate::error::{RatingError, Result};
use crate::rating::expectation::ExpectationModel;
use crate::rating::margin::MarginScaler;
use crate::rating::store::RatingStore;
use crate::types::{ComposedAdjustment, GameContext};
use tracing::debug;

/// Outcome of one rating update
#[derive(Debug, Clone, PartialEq)]
pub struct GameUpdate {
    pub pre_home: f64,
    pub pre_away: f64,
    pub post_home: f64,
    pub post_away: f64,
    /// Pre-game probability assigned to a home win
    pub home_win_probability: f64,
    /// Tie policy: a tied score counts as a home loss
    pub home_won: bool,
    /// Signed rating transfer from away to home
    pub rating_delta: f64,
}

/// Applies one game's result to the rating store
#[derive(Debug, Clone)]
pub struct GameUpdater {
    k_factor: f64,
    home_field_advantage: f64,
    rest_points_per_day: f64,
    max_shift_per_game: f64,
    expectation: ExpectationModel,
    margin: MarginScaler,
    split: SplitSettings,
}

impl GameUpdater {
    /// Build an updater from a validated configuration.
    ///
    /// Constants are checked here once; `apply` never re-validates them.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            k_factor: config.rating.k_factor,
            home_field_advantage: config.rating.home_field_advantage,
            rest_points_per_day: config.rating.rest_points_per_day,
            max_shift_per_game: config.rating.max_shift_per_game,
            expectation: ExpectationModel::new(config.rating.expectation_scale)?,
            margin: MarginScaler::new(
                config.rating.mov_enabled,
                config.rating.mov_multiplier,
                config.rating.mov_damping,
            )?,
            split: config.split.clone(),
        })
    }

    /// Rest-day differential in rating points; zero unless both sides' rest
    /// is known.
    fn rest_adjustment(&self, context: &GameContext) -> f64 {
        match (context.home_rest_days, context.away_rest_days) {
            (Some(home), Some(away)) => (home - away) as f64 * self.rest_points_per_day,
            _ => 0.0,
        }
    }

    /// Process one game, writing both post-game ratings to the store.
    ///
    /// The rating transfer is exactly zero-sum: home-field advantage, rest,
    /// and composed adjustments shift only the expectation, never the total
    /// rating mass. Every post-game value — scalar and, in split mode, all
    /// four split components — is validated before any write, so a failed
    /// update leaves the store untouched.
    pub fn apply(
        &self,
        store: &mut RatingStore,
        context: &GameContext,
        adjustment: &ComposedAdjustment,
    ) -> Result<GameUpdate> {
        if context.home_score < 0 || context.away_score < 0 {
            return Err(RatingError::InvalidScore {
                home: context.home_score,
                away: context.away_score,
            }
            .into());
        }

        let pre_home = store.get(&context.home_team);
        let pre_away = store.get(&context.away_team);

        let rest_adjustment = self.rest_adjustment(context);
        let adj_home =
            pre_home + self.home_field_advantage + adjustment.home_total + rest_adjustment / 2.0;
        let adj_away = pre_away + adjustment.away_total - rest_adjustment / 2.0;

        let home_win_probability = self.expectation.win_probability(adj_home, adj_away);
        let home_won = context.home_won();
        let actual = if home_won { 1.0 } else { 0.0 };

        let multiplier = self
            .margin
            .multiplier(context.home_score - context.away_score, adj_home - adj_away);

        let raw_delta = self.k_factor * multiplier * (actual - home_win_probability);
        let rating_delta = raw_delta.clamp(-self.max_shift_per_game, self.max_shift_per_game);

        let post_home = pre_home + rating_delta;
        let post_away = pre_away - rating_delta;

        // All writes or none
        for (team, rating) in [(&context.home_team, post_home), (&context.away_team, post_away)] {
            if !rating.is_finite() || rating < 0.0 {
                return Err(RatingError::InvalidRating {
                    team: team.clone(),
                    value: rating,
                }
                .into());
            }
        }

        let split_update = if self.split.enabled {
            Some(self.split_values(store, context)?)
        } else {
            None
        };

        store.set(&context.home_team, post_home)?;
        store.set(&context.away_team, post_away)?;

        if let Some((new_home, new_away)) = split_update {
            store.set_split(&context.home_team, new_home.0, new_home.1)?;
            store.set_split(&context.away_team, new_away.0, new_away.1)?;
        }

        debug!(
            home = %context.home_team,
            away = %context.away_team,
            p_home = home_win_probability,
            delta = rating_delta,
            "applied game update"
        );

        Ok(GameUpdate {
            pre_home,
            pre_away,
            post_home,
            post_away,
            home_win_probability,
            home_won,
            rating_delta,
        })
    }

    /// Split-mode post values: offense moves toward points scored vs.
    /// expected, the opposing defense moves inversely by the same surprise.
    /// Read-only; validates all four components so `apply` commits nothing
    /// until every write is known to succeed.
    fn split_values(
        &self,
        store: &RatingStore,
        context: &GameContext,
    ) -> Result<((f64, f64), (f64, f64))> {
        let home = store.get_split(&context.home_team);
        let away = store.get_split(&context.away_team);

        let expected_home_points = self.expected_points(home.offense, away.defense);
        let expected_away_points = self.expected_points(away.offense, home.defense);

        let home_surprise = context.home_score as f64 - expected_home_points;
        let away_surprise = context.away_score as f64 - expected_away_points;

        let rail = self.max_shift_per_game;
        let home_off_delta = (self.split.k_factor * home_surprise).clamp(-rail, rail);
        let away_off_delta = (self.split.k_factor * away_surprise).clamp(-rail, rail);

        let new_home = (
            home.offense + home_off_delta,
            home.defense - away_off_delta,
        );
        let new_away = (
            away.offense + away_off_delta,
            away.defense - home_off_delta,
        );

        for (team, (offense, defense)) in [
            (&context.home_team, new_home),
            (&context.away_team, new_away),
        ] {
            for value in [offense, defense] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RatingError::InvalidRating {
                        team: team.clone(),
                        value,
                    }
                    .into());
                }
            }
        }

        Ok((new_home, new_away))
    }

    fn expected_points(&self, offense: f64, opponent_defense: f64) -> f64 {
        self.split.baseline_points + (offense - opponent_defense) / self.split.points_per_rating
    }
}
