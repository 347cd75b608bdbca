//! Adjustment composition
//!
//! The composer holds a data-driven list of adjustment sources, each paired
//! with its configured settings. For every enabled source it retrieves a raw
//! delta per side, applies the source's weight, clamps to the source's cap,
//! and accumulates the totals. A source that fails degrades to a zero delta —
//! adjustment failure never aborts a game update.

use crate::adjust::efficiency::{RedZoneAdjustment, ThirdDownAdjustment};
use crate::adjust::quarterback::QuarterbackAdjustment;
use crate::adjust::source::AdjustmentSource;
use crate::adjust::travel::TravelAdjustment;
use crate::adjust::turnover::TurnoverAdjustment;
use crate::adjust::weather::WeatherAdjustment;
use crate::config::{AdjustmentSettings, SourceSettings};
use crate::types::{ComposedAdjustment, GameContext, Side, SourceDelta};
use tracing::warn;

struct RegisteredSource {
    source: Box<dyn AdjustmentSource>,
    settings: SourceSettings,
}

/// Composes independent per-source deltas into one pre-game rating shift
#[derive(Default)]
pub struct AdjustmentComposer {
    sources: Vec<RegisteredSource>,
}

impl AdjustmentComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source with its settings. Registration order only affects
    /// the breakdown's ordering; summation is commutative.
    pub fn register(&mut self, source: Box<dyn AdjustmentSource>, settings: SourceSettings) {
        self.sources.push(RegisteredSource { source, settings });
    }

    /// Composer holding the six standard sources with default parameters,
    /// each paired with its configured settings.
    pub fn with_standard_sources(settings: &AdjustmentSettings) -> Self {
        let mut composer = Self::new();
        composer.register(Box::new(TravelAdjustment::default()), settings.travel);
        composer.register(Box::new(WeatherAdjustment::default()), settings.weather);
        composer.register(Box::new(QuarterbackAdjustment::default()), settings.quarterback);
        composer.register(Box::new(TurnoverAdjustment::default()), settings.turnover);
        composer.register(Box::new(RedZoneAdjustment::default()), settings.red_zone);
        composer.register(Box::new(ThirdDownAdjustment::default()), settings.third_down);
        composer
    }

    /// Number of registered sources, enabled or not
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Query every enabled source for both sides and sum the weighted,
    /// capped deltas.
    pub fn compose(&self, context: &GameContext) -> ComposedAdjustment {
        let mut composed = ComposedAdjustment::default();

        for registered in &self.sources {
            if !registered.settings.enabled {
                continue;
            }

            let home = self.side_delta(registered, &context.home_team, Side::Home, context);
            let away = self.side_delta(registered, &context.away_team, Side::Away, context);

            composed.home_total += home;
            composed.away_total += away;
            composed.breakdown.push(SourceDelta {
                source: registered.source.name().to_string(),
                home,
                away,
            });
        }

        composed
    }

    /// Weighted, capped delta for one side; a failing source degrades to 0.
    fn side_delta(
        &self,
        registered: &RegisteredSource,
        team: &str,
        side: Side,
        context: &GameContext,
    ) -> f64 {
        let raw = match registered.source.delta(team, context) {
            Ok(delta) if delta.is_finite() => delta,
            Ok(delta) => {
                warn!(
                    source = registered.source.name(),
                    team,
                    side = %side,
                    delta,
                    "adjustment source returned a non-finite delta, using 0"
                );
                return 0.0;
            }
            Err(error) => {
                warn!(
                    source = registered.source.name(),
                    team,
                    side = %side,
                    %error,
                    "adjustment source failed, using 0"
                );
                return 0.0;
            }
        };

        let cap = registered.settings.max_delta;
        (raw * registered.settings.weight).clamp(-cap, cap)
    }
}
