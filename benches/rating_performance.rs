//! Performance benchmarks for the rating engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridline::backtest::BacktestRunner;
use gridline::config::EngineConfig;
use gridline::rating::{GameUpdater, RatingStore};
use gridline::types::{ComposedAdjustment, GameContext, TeamSignals};

const TEAMS: [&str; 8] = ["KC", "BUF", "CIN", "BAL", "DET", "PHI", "SF", "DAL"];

fn synthetic_game(season: u16, week: u8, home_idx: usize, away_idx: usize) -> GameContext {
    GameContext {
        season,
        week,
        home_team: TEAMS[home_idx].to_string(),
        away_team: TEAMS[away_idx].to_string(),
        // Deterministic but varied scores
        home_score: 14 + ((home_idx * 7 + week as usize * 3) % 24) as i64,
        away_score: 10 + ((away_idx * 5 + week as usize * 2) % 24) as i64,
        kickoff: None,
        home_rest_days: Some(7),
        away_rest_days: Some(6 + (away_idx % 4) as i64),
        weather_severity: Some((week % 3) as f64),
        home_signals: TeamSignals {
            qb_form: Some(((home_idx as f64) - 3.5) / 3.0),
            turnover_margin: Some(((week % 5) as f64 - 2.0) / 2.0),
            ..TeamSignals::default()
        },
        away_signals: TeamSignals {
            qb_form: Some(((away_idx as f64) - 3.5) / 3.0),
            ..TeamSignals::default()
        },
    }
}

fn synthetic_schedule(seasons: u16) -> Vec<GameContext> {
    let mut games = Vec::new();
    for season in 0..seasons {
        for week in 1..=14u8 {
            for home_idx in 0..TEAMS.len() {
                let away_idx = (home_idx + week as usize) % TEAMS.len();
                if home_idx != away_idx {
                    games.push(synthetic_game(2020 + season, week, home_idx, away_idx));
                }
            }
        }
    }
    games
}

fn bench_single_game_update(c: &mut Criterion) {
    let config = EngineConfig::default();
    let updater = GameUpdater::new(&config).unwrap();
    let game = synthetic_game(2024, 1, 0, 1);

    c.bench_function("single_game_update", |b| {
        b.iter(|| {
            let mut store = RatingStore::new(1500.0);
            black_box(updater.apply(&mut store, &game, &ComposedAdjustment::default()))
        })
    });
}

fn bench_three_season_backtest(c: &mut Criterion) {
    let config = EngineConfig::default();
    let games = synthetic_schedule(3);

    c.bench_function("three_season_backtest", |b| {
        b.iter(|| {
            let mut runner = BacktestRunner::with_standard_sources(&config).unwrap();
            runner.run(black_box(&games)).unwrap();
            black_box(runner.report(10))
        })
    });
}

criterion_group!(benches, bench_single_game_update, bench_three_season_backtest);
criterion_main!(benches);
