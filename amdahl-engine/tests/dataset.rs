// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::Arc;

use amdahl_engine::dataset::{
    CUDA_CORES, GpuComponents, NVLINK, ORIGINAL_RENDER_TIME_MS, TARGET_SPEEDUP, TEXTURE_UNITS,
    VRAM, predefined_components,
};

#[test]
fn four_components_in_order() {
    let components = predefined_components();
    let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec![CUDA_CORES, VRAM, TEXTURE_UNITS, NVLINK]);
}

#[test]
fn predefined_values() {
    let gpu = GpuComponents::new();
    let expected = [
        (&gpu.cuda_cores, 0.35, 5.0),
        (&gpu.vram, 0.20, 3.0),
        (&gpu.texture_units, 0.25, 7.0),
        (&gpu.nvlink, 0.20, 10.0),
    ];
    for (component, fraction, factor) in expected {
        assert_eq!(component.improvable_fraction(), fraction);
        assert_eq!(component.improvement_factor(), factor);
    }
}

#[test]
fn stable_across_calls() {
    assert_eq!(predefined_components(), predefined_components());
    assert_eq!(GpuComponents::default(), GpuComponents::new());
}

#[test]
fn all_shares_components() {
    let gpu = GpuComponents::new();
    let all = gpu.all();
    assert!(Arc::ptr_eq(&all[0], &gpu.cuda_cores));
    assert!(Arc::ptr_eq(&all[3], &gpu.nvlink));
}

#[test]
fn scenario_constants() {
    assert_eq!(ORIGINAL_RENDER_TIME_MS, 50.0);
    assert_eq!(TARGET_SPEEDUP, 1.30);
}
