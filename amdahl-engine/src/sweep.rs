// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Sample grids for plotting speedup against its parameters.
//!
//! Only the data is produced here. Drawing it, and writing any image files,
//! is left to the front-end.

use std::sync::Arc;

use serde::Serialize;

use crate::component::Component;
use crate::evaluator::{Evaluate, speedup, theoretical_ceiling};

/// Ceilings at or above this are dropped from [ceiling_curve] as they would
/// swamp the rest of the plot.
pub const CEILING_PLOT_LIMIT: f64 = 100.0;

/// Fractions plotted against the factor by default.
pub const DEFAULT_FACTOR_SWEEP_FRACTIONS: [f64; 2] = [0.25, 0.35];

/// Factors plotted against the fraction by default.
pub const DEFAULT_FRACTION_SWEEP_FACTORS: [f64; 2] = [4.0, 8.0];

/// One curve: a label and its `(x, y)` points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// The speedup of one named component, for a bar chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub name: String,
    pub speedup: f64,
}

/// Improvement factors `1, 2, ..., 20`.
#[must_use]
pub fn factor_range() -> Vec<f64> {
    (1..=20).map(f64::from).collect()
}

/// Improvable fractions `0.05, 0.10, ..., 0.95`.
#[must_use]
pub fn fraction_range() -> Vec<f64> {
    (5..=95).step_by(5).map(|p| f64::from(p) / 100.0).collect()
}

/// One series per fraction, plotting speedup against each factor.
///
/// Invalid samples (for example `k = 1`) are left out of the series.
#[must_use]
pub fn speedup_vs_factor(fractions: &[f64], factors: &[f64]) -> Vec<Series> {
    fractions
        .iter()
        .map(|&f| Series {
            label: format!("f = {f:.2}"),
            points: factors
                .iter()
                .filter_map(|&k| speedup(f, k).ok().map(|a| (k, a)))
                .collect(),
        })
        .collect()
}

/// One series per factor, plotting speedup against each fraction.
#[must_use]
pub fn speedup_vs_fraction(factors: &[f64], fractions: &[f64]) -> Vec<Series> {
    factors
        .iter()
        .map(|&k| Series {
            label: format!("k = {k}"),
            points: fractions
                .iter()
                .filter_map(|&f| speedup(f, k).ok().map(|a| (f, a)))
                .collect(),
        })
        .collect()
}

/// The theoretical ceiling against the fraction.
#[must_use]
pub fn ceiling_curve(fractions: &[f64]) -> Series {
    Series {
        label: "A_max = 1/(1-f)".to_string(),
        points: fractions
            .iter()
            .filter_map(|&f| theoretical_ceiling(f).ok().map(|c| (f, c)))
            .filter(|(_, c)| *c < CEILING_PLOT_LIMIT)
            .collect(),
    }
}

#[must_use]
pub fn component_bars(evaluator: &impl Evaluate, components: &[Arc<Component>]) -> Vec<Bar> {
    components
        .iter()
        .map(|c| Bar {
            name: c.name().to_string(),
            speedup: evaluator.speedup(c),
        })
        .collect()
}
