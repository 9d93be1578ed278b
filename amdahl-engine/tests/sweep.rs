// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use amdahl_engine::dataset::predefined_components;
use amdahl_engine::evaluator::Evaluator;
use amdahl_engine::sweep::{
    DEFAULT_FACTOR_SWEEP_FRACTIONS, DEFAULT_FRACTION_SWEEP_FACTORS, ceiling_curve,
    component_bars, factor_range, fraction_range, speedup_vs_factor, speedup_vs_fraction,
};

#[test]
fn ranges() {
    let factors = factor_range();
    assert_eq!(factors.len(), 20);
    assert_eq!(factors[0], 1.0);
    assert_eq!(factors[19], 20.0);

    let fractions = fraction_range();
    assert_eq!(fractions.len(), 19);
    assert_eq!(fractions[0], 0.05);
    assert_eq!(fractions[18], 0.95);
}

#[test]
fn factor_sweep_drops_invalid_factor() {
    let series = speedup_vs_factor(&DEFAULT_FACTOR_SWEEP_FRACTIONS, &factor_range());
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label, "f = 0.25");
    assert_eq!(series[1].label, "f = 0.35");
    for s in &series {
        assert_eq!(s.points.len(), 19);
        assert_eq!(s.points[0].0, 2.0);
        for pair in s.points.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
    }
    assert!(series[1].points.contains(&(5.0, 1.3889)));
}

#[test]
fn fraction_sweep() {
    let series = speedup_vs_fraction(&DEFAULT_FRACTION_SWEEP_FACTORS, &fraction_range());
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label, "k = 4");
    assert_eq!(series[1].label, "k = 8");
    assert_eq!(series[0].points.len(), 19);

    // A larger factor always helps at the same fraction
    for (low, high) in series[0].points.iter().zip(&series[1].points) {
        assert_eq!(low.0, high.0);
        assert!(low.1 < high.1);
    }
}

#[test]
fn ceiling_curve_is_capped() {
    let curve = ceiling_curve(&[0.5, 0.8, 0.99, 0.995, 1.0]);
    assert_eq!(curve.label, "A_max = 1/(1-f)");
    assert_eq!(curve.points, vec![(0.5, 2.0), (0.8, 5.0)]);
}

#[test]
fn bars_follow_component_order() {
    let bars = component_bars(&Evaluator, &predefined_components());
    let values: Vec<(&str, f64)> = bars.iter().map(|b| (b.name.as_str(), b.speedup)).collect();
    assert_eq!(
        values,
        vec![
            ("CUDA cores", 1.3889),
            ("VRAM", 1.1538),
            ("Texture units", 1.2727),
            ("NVLink interconnect", 1.2195),
        ]
    );
}

#[test]
fn series_serialize() {
    let series = speedup_vs_factor(&[0.5], &[2.0]);
    let yaml = serde_yaml_ng::to_string(&series).unwrap();
    assert!(yaml.contains("f = 0.50"));
    assert!(yaml.contains("1.3333"));
}
