// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::Arc;

use amdahl_engine::component::Component;
use amdahl_engine::evaluator::Evaluator;
use amdahl_engine::result::SpeedupResult;
use amdahl_engine::types::{AmdahlError, InvalidParameter};
use approx::assert_abs_diff_eq;

#[test]
fn valid_component() {
    let component = Component::new("Shader cores", 0.4, 6.0).unwrap();
    assert_eq!(component.name(), "Shader cores");
    assert_eq!(component.improvable_fraction(), 0.4);
    assert_eq!(component.improvement_factor(), 6.0);
}

#[test]
fn bounds_are_inclusive() {
    assert!(Component::new("none", 0.0, 2.0).is_ok());
    assert!(Component::new("all", 1.0, 2.0).is_ok());
}

#[test]
#[should_panic(expected = "FractionOutOfRange(1.5)")]
fn fraction_too_large() {
    Component::new("Test", 1.5, 2.0).unwrap();
}

#[test]
#[should_panic(expected = "FractionOutOfRange(-0.1)")]
fn fraction_negative() {
    Component::new("Test", -0.1, 2.0).unwrap();
}

#[test]
#[should_panic(expected = "FactorNotAboveOne(0.5)")]
fn factor_too_small() {
    Component::new("Test", 0.5, 0.5).unwrap();
}

#[test]
fn factor_of_one_is_rejected() {
    assert_eq!(
        Component::new("Test", 0.5, 1.0),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::FactorNotAboveOne(1.0)
        ))
    );
}

#[test]
fn empty_name_is_rejected() {
    assert_eq!(
        Component::new("  ", 0.5, 2.0),
        Err(AmdahlError::InvalidParameter(InvalidParameter::EmptyName))
    );
}

#[test]
fn from_percent() {
    let component = Component::from_percent("Cache", 25.0, 4.0).unwrap();
    assert_eq!(component.improvable_fraction(), 0.25);
    assert!(Component::from_percent("Cache", 150.0, 4.0).is_err());
}

#[test]
fn value_equality() {
    let a = Component::new("L2", 0.3, 4.0).unwrap();
    assert_eq!(a, Component::new("L2", 0.3, 4.0).unwrap());
    assert_ne!(a, Component::new("L2", 0.3, 5.0).unwrap());
    assert_ne!(a, Component::new("L3", 0.3, 4.0).unwrap());
}

#[test]
fn deserialize_validates() {
    let component: Component = serde_yaml_ng::from_str(
        "
name: L2
improvable_fraction: 0.3
improvement_factor: 4
",
    )
    .unwrap();
    assert_eq!(component, Component::new("L2", 0.3, 4.0).unwrap());

    let error = serde_yaml_ng::from_str::<Component>(
        "
name: L2
improvable_fraction: 1.3
improvement_factor: 4
",
    )
    .unwrap_err();
    assert!(error.to_string().contains("not within [0, 1]"));
}

#[test]
fn display() {
    let component = Component::new("VRAM", 0.2, 3.0).unwrap();
    assert_eq!(component.to_string(), "VRAM (f=20.0%, k=3)");
}

#[test]
fn result_shares_component() {
    let component = Arc::new(Component::new("CUDA", 0.35, 5.0).unwrap());
    let result = SpeedupResult::evaluate(&Evaluator, &component).unwrap();
    assert!(Arc::ptr_eq(result.component(), &component));
    assert_eq!(result.speedup(), 1.3889);
    assert_eq!(result.theoretical_ceiling(), 1.5385);
    assert!(result.speedup() <= result.theoretical_ceiling());
    assert_eq!(result.original_duration(), None);
    assert_eq!(result.total_improvement_percent(), None);
}

#[test]
fn result_with_timing() {
    let component = Arc::new(Component::new("CUDA", 0.35, 5.0).unwrap());
    let result = SpeedupResult::evaluate_with_timing(&Evaluator, &component, 50.0).unwrap();
    assert_eq!(result.original_duration(), Some(50.0));
    assert_abs_diff_eq!(result.optimized_duration().unwrap(), 36.0, epsilon = 1e-3);
    assert_abs_diff_eq!(
        result.total_improvement_percent().unwrap(),
        28.0,
        epsilon = 1e-2
    );
}

#[test]
fn result_for_fully_improvable_component_fails() {
    let component = Arc::new(Component::new("All", 1.0, 4.0).unwrap());
    assert_eq!(
        SpeedupResult::evaluate(&Evaluator, &component),
        Err(AmdahlError::DivisionUndefined { fraction: 1.0 })
    );
}

#[test]
fn efficiency_report() {
    let component = Arc::new(Component::new("CUDA", 0.35, 5.0).unwrap());
    let report = SpeedupResult::evaluate(&Evaluator, &component)
        .unwrap()
        .efficiency_report();
    assert_eq!(report.speedup, 1.3889);
    assert_eq!(report.theoretical_ceiling, 1.5385);
    assert_eq!(report.efficiency_percent, 90.28);
    assert_eq!(report.improvement_margin, 0.1496);
    assert_eq!(report.scalability_factor, 3.6);
}
