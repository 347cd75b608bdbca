//! Quarterback-form adjustment source
//!
//! The upstream signal is a centered quarterback efficiency score (0 = league
//! average, positive = better). One hot or awful stretch can produce extreme
//! scores, so the form is clamped to a window before scaling to rating
//! points.

use crate::adjust::source::AdjustmentSource;
use crate::error::Result;
use crate::types::GameContext;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for the quarterback source
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarterbackParams {
    /// Rating points per unit of form score
    pub points_per_unit: f64,
    /// Form scores are clamped to ±this window before scaling
    pub form_window: f64,
}

impl Default for QuarterbackParams {
    fn default() -> Self {
        Self {
            points_per_unit: 10.0,
            form_window: 3.0,
        }
    }
}

impl QuarterbackParams {
    pub fn validate(&self) -> Result<()> {
        if !self.points_per_unit.is_finite() || self.points_per_unit < 0.0 {
            return Err(anyhow!("quarterback points_per_unit must be non-negative"));
        }
        if !self.form_window.is_finite() || self.form_window <= 0.0 {
            return Err(anyhow!("quarterback form_window must be strictly positive"));
        }
        Ok(())
    }
}

/// Quarterback-form adjustment source
#[derive(Debug, Clone)]
pub struct QuarterbackAdjustment {
    params: QuarterbackParams,
}

impl QuarterbackAdjustment {
    pub fn new(params: QuarterbackParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl Default for QuarterbackAdjustment {
    fn default() -> Self {
        Self {
            params: QuarterbackParams::default(),
        }
    }
}

impl AdjustmentSource for QuarterbackAdjustment {
    fn name(&self) -> &'static str {
        "quarterback"
    }

    fn delta(&self, team: &str, context: &GameContext) -> Result<f64> {
        let form = match context.signals_for(team).and_then(|s| s.qb_form) {
            Some(value) => value,
            None => {
                debug!(team, "no quarterback form signal, contributing 0");
                return Ok(0.0);
            }
        };

        if !form.is_finite() {
            return Err(anyhow!("quarterback form {} for {} is not finite", form, team));
        }

        let window = self.params.form_window;
        Ok(form.clamp(-window, window) * self.params.points_per_unit)
    }
}
