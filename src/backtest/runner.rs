//! Backtest runner
//!
//! Drives a chronological game list through the rating store, the adjustment
//! composer, and the game updater, recording one immutable `GameResult` per
//! processed game. Orchestration only; all rating math lives in the
//! components it drives.

use crate::adjust::AdjustmentComposer;
use crate::config::EngineConfig;
use crate::error::{RatingError, Result};
use crate::eval::{evaluate, EvaluationReport};
use crate::rating::{GameUpdater, RatingStore};
use crate::types::{GameContext, GameResult, RunId};
use crate::utils::generate_run_id;
use tracing::{info, info_span, warn};

/// Runner lifecycle: processing games, or finalized with history intact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Running,
    Done,
}

/// Chronological backtest over a game list
pub struct BacktestRunner {
    run_id: RunId,
    store: RatingStore,
    composer: AdjustmentComposer,
    updater: GameUpdater,
    preseason_carry: f64,
    history: Vec<GameResult>,
    state: RunnerState,
    current_season: Option<u16>,
    skipped: usize,
}

impl BacktestRunner {
    /// Build a runner with an explicit composer (callers supply their own
    /// adjustment sources, e.g. tests or collaborators with bespoke signals).
    pub fn new(config: &EngineConfig, composer: AdjustmentComposer) -> Result<Self> {
        Ok(Self {
            run_id: generate_run_id(),
            store: RatingStore::new(config.rating.base_rating),
            composer,
            updater: GameUpdater::new(config)?,
            preseason_carry: config.rating.preseason_carry,
            history: Vec::new(),
            state: RunnerState::Running,
            current_season: None,
            skipped: 0,
        })
    }

    /// Build a runner with the six standard adjustment sources
    pub fn with_standard_sources(config: &EngineConfig) -> Result<Self> {
        let composer = AdjustmentComposer::with_standard_sources(&config.adjustments);
        Self::new(config, composer)
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// The rating store in its current (or final) state
    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Every processed game, in processing order
    pub fn history(&self) -> &[GameResult] {
        &self.history
    }

    /// Games dropped by per-game failure isolation
    pub fn skipped_games(&self) -> usize {
        self.skipped
    }

    /// Process games strictly in the order given.
    ///
    /// The caller is responsible for chronological ordering (see
    /// `schedule::sort_chronologically`); the runner never sorts. A season
    /// boundary triggers the preseason regression before the first game of
    /// the new season. A game that fails inside the updater is logged and
    /// skipped with ratings unchanged; it never aborts the run. Finalizes
    /// the runner: a second `run` call is an error.
    ///
    /// Returns the recorded history; the runner keeps its own copy for
    /// `history`, `report`, and `store` access.
    pub fn run(&mut self, games: &[GameContext]) -> Result<Vec<GameResult>> {
        if self.state == RunnerState::Done {
            return Err(RatingError::Internal {
                message: "backtest already finalized".to_string(),
            }
            .into());
        }

        let span = info_span!("backtest", run_id = %self.run_id);
        let _guard = span.enter();
        info!(games = games.len(), "starting backtest");

        for game in games {
            if let Some(previous) = self.current_season {
                if game.season != previous {
                    info!(
                        from = previous,
                        to = game.season,
                        carry = self.preseason_carry,
                        "season boundary, regressing ratings"
                    );
                    self.store.regress(self.preseason_carry)?;
                }
            }
            self.current_season = Some(game.season);

            let adjustment = self.composer.compose(game);
            match self.updater.apply(&mut self.store, game, &adjustment) {
                Ok(update) => {
                    self.history.push(GameResult {
                        context: game.clone(),
                        pre_home_rating: update.pre_home,
                        pre_away_rating: update.pre_away,
                        post_home_rating: update.post_home,
                        post_away_rating: update.post_away,
                        home_win_probability: update.home_win_probability,
                        home_won: update.home_won,
                        adjustments: adjustment.breakdown,
                    });
                }
                Err(error) => {
                    self.skipped += 1;
                    warn!(
                        season = game.season,
                        week = game.week,
                        home = %game.home_team,
                        away = %game.away_team,
                        %error,
                        "skipping game, ratings unchanged"
                    );
                }
            }
        }

        self.state = RunnerState::Done;
        info!(
            processed = self.history.len(),
            skipped = self.skipped,
            "backtest finished"
        );
        Ok(self.history.clone())
    }

    /// Score the recorded history
    pub fn report(&self, bins: usize) -> Result<EvaluationReport> {
        evaluate(&self.history, bins)
    }
}
