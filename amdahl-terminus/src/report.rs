// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Plain-text rendering of engine results.
//!
//! The same text is printed by the subcommands and shown in the explorer
//! panes.

use amdahl_engine::analysis::{Comparison, PairComparison, TargetRecommendation};
use amdahl_engine::result::{EfficiencyReport, SpeedupResult};
use amdahl_engine::scenario::WorkedProblem;
use amdahl_engine::types::AmdahlResult;
use itertools::Itertools;

/// Shown when a comparison is asked for with no components.
pub const NO_DATA: &str = "No components to compare.";

pub const THEORY: &str = "\
Amdahl's Law

When only part of a system is made faster, the overall speedup is

    A = 1 / ((1 - f) + f / k)

where f is the fraction of the original execution time spent in the part
being improved and k is how many times faster that part becomes.

The (1 - f) term is the work that is not improved. It takes the same time
however large k grows, so the speedup can never exceed

    A_max = 1 / (1 - f)

Consequences:
- A component covering a small share of the work gives little overall
  speedup even with a very large improvement factor.
- Doubling k helps less and less as f / k shrinks next to (1 - f).
- To decide what to optimize, compare the resulting overall speedups, not
  the improvement factors.

The factor needed to reach a target speedup A follows from the same
formula:

    k = f / (1 / A - (1 - f))

and exists only when A is below the ceiling 1 / (1 - f).";

/// The computed values of one component.
#[must_use]
pub fn format_result(result: &SpeedupResult) -> String {
    let component = result.component();
    let mut lines = vec![
        component.name().to_string(),
        format!(
            "  Improvable fraction (f): {:.1}%",
            component.improvable_fraction() * 100.0
        ),
        format!("  Improvement factor (k): {}", component.improvement_factor()),
        format!("  Speedup: {:.4}x", result.speedup()),
        format!("  Theoretical ceiling: {:.4}x", result.theoretical_ceiling()),
        format!("  Efficiency: {:.2}%", result.efficiency_percent()),
    ];
    if let Some(timing) = result.timing() {
        lines.push(format!("  Original duration: {:.4} ms", timing.original));
        lines.push(format!("  Optimized duration: {:.4} ms", timing.optimized));
        lines.push(format!(
            "  Total improvement: {:.2}%",
            timing.improvement_percent()
        ));
    }
    lines.join("\n")
}

#[must_use]
pub fn format_efficiency(report: &EfficiencyReport) -> String {
    [
        format!("Efficiency: {:.2}% of the ceiling", report.efficiency_percent),
        format!("Improvement margin: {:.4}x", report.improvement_margin),
        format!("Scalability factor: {:.2}", report.scalability_factor),
    ]
    .join("\n")
}

/// One row per result with speedup and ceiling.
#[must_use]
pub fn format_results_table(results: &[SpeedupResult]) -> String {
    let width = results
        .iter()
        .map(|r| r.component().name().len())
        .max()
        .unwrap_or(0)
        .max("Component".len());

    let header = format!(
        "{:<width$}  {:>6}  {:>4}  {:>8}  {:>8}",
        "Component", "f", "k", "Speedup", "Ceiling"
    );
    let rows = results.iter().map(|r| {
        let c = r.component();
        format!(
            "{:<width$}  {:>5.1}%  {:>4}  {:>7.4}x  {:>7.4}x",
            c.name(),
            c.improvable_fraction() * 100.0,
            c.improvement_factor(),
            r.speedup(),
            r.theoretical_ceiling()
        )
    });
    std::iter::once(header).chain(rows).join("\n")
}

/// Ranking followed by the justification, or [NO_DATA].
#[must_use]
pub fn format_comparison(comparison: &Comparison) -> String {
    let Some(analysis) = comparison.analysis() else {
        return NO_DATA.to_string();
    };
    if analysis.is_empty() {
        return format!("{NO_DATA}\n\n{}", analysis.justification());
    }

    let ranking = analysis
        .ranking()
        .iter()
        .enumerate()
        .map(|(i, (name, speedup))| format!("{}. {name}: {speedup:.4}x", i + 1))
        .join("\n");
    format!("Ranking:\n{ranking}\n\n{}", analysis.justification())
}

/// The answer to "what factor is needed to reach `target`".
#[must_use]
pub fn format_required_factor(fraction: f64, target: f64, required: &AmdahlResult<f64>) -> String {
    match required {
        Ok(factor) => format!(
            "Reaching a {target:.4}x speedup with {:.1}% of the work improvable needs an \
             improvement factor of k = {factor:.4}",
            fraction * 100.0
        ),
        Err(e) => e.to_string(),
    }
}

#[must_use]
pub fn format_recommendation(recommendation: &TargetRecommendation, target: f64) -> String {
    match recommendation {
        TargetRecommendation::NoData => NO_DATA.to_string(),
        TargetRecommendation::Met { component, speedup } => format!(
            "{} reaches the {target:.4}x target with a speedup of {speedup:.4}x",
            component.name()
        ),
        TargetRecommendation::BestAvailable {
            component,
            speedup,
            shortfall,
            required_factor,
        } => {
            let needed = match required_factor {
                Ok(factor) => format!(
                    "It would need an improvement factor of k = {factor:.4} to get there."
                ),
                Err(e) => e.to_string(),
            };
            format!(
                "No component reaches the {target:.4}x target. The best available is {} at \
                 {speedup:.4}x, {shortfall:.4}x short.\n{needed}",
                component.name()
            )
        }
    }
}

#[must_use]
pub fn format_pair(pair: &PairComparison) -> String {
    format!(
        "{} ({:.4}x) gives more speedup than {} ({:.4}x), a difference of {:.4}x",
        pair.better.name(),
        pair.better_speedup,
        pair.other.name(),
        pair.other_speedup,
        pair.difference
    )
}

fn section(title: &str, body: &str) -> String {
    format!("{title}\n{}\n{body}", "-".repeat(title.len()))
}

/// Every answer of the GPU exercise, one section each.
#[must_use]
pub fn format_worked_problem(problem: &WorkedProblem) -> String {
    [
        section(
            "1. Speedup of each component",
            &format_results_table(&problem.results),
        ),
        section(
            "2. Frame time with optimized CUDA cores",
            &format_result(&problem.cuda_cores_timing),
        ),
        section(
            &format!("3. Reaching a {:.2}x speedup", problem.target_speedup),
            &format_recommendation(&problem.target, problem.target_speedup),
        ),
        section("4. Comparative analysis", problem.analysis.justification()),
        section(
            "5. Why the NVLink interconnect helps so little",
            &problem.nvlink_explanation,
        ),
        section(
            "6. Texture units against VRAM",
            &format_pair(&problem.texture_units_vs_vram),
        ),
    ]
    .join("\n\n")
}
