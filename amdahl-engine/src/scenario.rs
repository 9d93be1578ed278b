// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The complete GPU optimization exercise over the predefined dataset.

use crate::analysis::{Analysis, Comparator, PairComparison, TargetRecommendation};
use crate::dataset::GpuComponents;
use crate::evaluator::Evaluate;
use crate::result::SpeedupResult;
use crate::types::AmdahlResult;

/// Every answer of the exercise.
#[derive(Clone, Debug)]
pub struct WorkedProblem {
    /// Speedup and ceiling of each predefined component, in dataset order.
    pub results: Vec<SpeedupResult>,

    /// The CUDA cores result applied to the original frame time.
    pub cuda_cores_timing: SpeedupResult,

    pub target_speedup: f64,
    pub target: TargetRecommendation,

    pub analysis: Analysis,

    /// Why NVLink, despite having the largest factor, helps so little.
    pub nvlink_explanation: String,

    pub texture_units_vs_vram: PairComparison,
}

/// Solve the exercise for a frame taking `original_duration` and the given
/// `target_speedup`.
pub fn solve_worked_problem<E: Evaluate>(
    comparator: &Comparator<E>,
    original_duration: f64,
    target_speedup: f64,
) -> AmdahlResult<WorkedProblem> {
    let gpu = GpuComponents::new();
    let components = gpu.all();

    let results = components
        .iter()
        .map(|c| comparator.evaluate(c))
        .collect::<AmdahlResult<Vec<_>>>()?;

    let cuda_cores_timing = SpeedupResult::evaluate_with_timing(
        comparator.evaluator(),
        &gpu.cuda_cores,
        original_duration,
    )?;

    Ok(WorkedProblem {
        results,
        cuda_cores_timing,
        target_speedup,
        target: comparator.recommend_for_target(&components, target_speedup),
        analysis: comparator.evaluate_all(&components),
        nvlink_explanation: comparator.limited_impact_explanation(&gpu.nvlink)?,
        texture_units_vs_vram: comparator.compare_pair(&gpu.texture_units, &gpu.vram),
    })
}
