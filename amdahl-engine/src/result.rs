// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The outcome of evaluating one component.

use std::sync::Arc;

use serde::Serialize;

use crate::component::Component;
use crate::evaluator::{Evaluate, efficiency_percent, round_to, round_to_precision};
use crate::types::AmdahlResult;

/// Original and optimized duration of a workload, in whatever unit the
/// caller supplied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Timing {
    pub original: f64,
    pub optimized: f64,
}

impl Timing {
    /// Time saved as a percentage of the original duration.
    #[must_use]
    pub fn improvement_percent(&self) -> f64 {
        (self.original - self.optimized) / self.original * 100.0
    }
}

/// A [Component] together with its computed speedup and ceiling.
///
/// The component is shared, not copied. A result is never modified after it
/// has been built; [SpeedupResult::with_timing] returns a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeedupResult {
    component: Arc<Component>,
    speedup: f64,
    theoretical_ceiling: f64,
    timing: Option<Timing>,
}

impl SpeedupResult {
    /// Evaluate `component`. Fails only if its ceiling is undefined.
    pub fn evaluate(evaluator: &impl Evaluate, component: &Arc<Component>) -> AmdahlResult<Self> {
        let speedup = evaluator.speedup(component);
        let theoretical_ceiling = evaluator.theoretical_ceiling(component)?;
        Ok(Self {
            component: component.clone(),
            speedup,
            theoretical_ceiling,
            timing: None,
        })
    }

    /// Evaluate `component` and apply its speedup to `original_duration`.
    pub fn evaluate_with_timing(
        evaluator: &impl Evaluate,
        component: &Arc<Component>,
        original_duration: f64,
    ) -> AmdahlResult<Self> {
        Self::evaluate(evaluator, component)?.with_timing(evaluator, original_duration)
    }

    /// Copy of this result with the timing fields filled in.
    pub fn with_timing(&self, evaluator: &impl Evaluate, original: f64) -> AmdahlResult<Self> {
        let optimized = evaluator.optimized_duration(original, self.speedup)?;
        Ok(Self {
            timing: Some(Timing {
                original,
                optimized,
            }),
            ..self.clone()
        })
    }

    #[must_use]
    pub fn component(&self) -> &Arc<Component> {
        &self.component
    }

    #[must_use]
    pub fn speedup(&self) -> f64 {
        self.speedup
    }

    #[must_use]
    pub fn theoretical_ceiling(&self) -> f64 {
        self.theoretical_ceiling
    }

    #[must_use]
    pub fn timing(&self) -> Option<&Timing> {
        self.timing.as_ref()
    }

    #[must_use]
    pub fn original_duration(&self) -> Option<f64> {
        self.timing.map(|t| t.original)
    }

    #[must_use]
    pub fn optimized_duration(&self) -> Option<f64> {
        self.timing.map(|t| t.optimized)
    }

    /// Only available once both durations are known.
    #[must_use]
    pub fn total_improvement_percent(&self) -> Option<f64> {
        self.timing.map(|t| t.improvement_percent())
    }

    #[must_use]
    pub fn efficiency_percent(&self) -> f64 {
        efficiency_percent(self.speedup, self.theoretical_ceiling)
    }

    #[must_use]
    pub fn efficiency_report(&self) -> EfficiencyReport {
        EfficiencyReport {
            speedup: self.speedup,
            theoretical_ceiling: self.theoretical_ceiling,
            efficiency_percent: round_to(self.efficiency_percent(), 2),
            improvement_margin: round_to_precision(self.theoretical_ceiling - self.speedup),
            scalability_factor: round_to(self.component.improvement_factor() / self.speedup, 2),
        }
    }
}

/// How much of the available headroom an optimization uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EfficiencyReport {
    pub speedup: f64,
    pub theoretical_ceiling: f64,

    /// Speedup as a percentage of the ceiling, to 2 decimal places.
    pub efficiency_percent: f64,

    /// Speedup still available if the factor were unbounded.
    pub improvement_margin: f64,

    /// Improvement factor per unit of overall speedup. Large values mean
    /// most of the local improvement is lost to the unimproved work.
    pub scalability_factor: f64,
}
