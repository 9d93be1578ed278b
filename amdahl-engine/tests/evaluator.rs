// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use amdahl_engine::evaluator::{
    optimized_duration, required_factor, speedup, theoretical_ceiling,
};
use amdahl_engine::types::{AmdahlError, InvalidParameter};
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn speedup_basic() {
    // 1 / (0.5 + 0.25) = 1.3333
    assert_abs_diff_eq!(speedup(0.5, 2.0).unwrap(), 1.3333, epsilon = 1e-4);
}

#[test]
fn speedup_gpu_components() {
    assert_eq!(speedup(0.35, 5.0).unwrap(), 1.3889);
    assert_eq!(speedup(0.20, 3.0).unwrap(), 1.1538);
    assert_eq!(speedup(0.25, 7.0).unwrap(), 1.2727);
    assert_eq!(speedup(0.20, 10.0).unwrap(), 1.2195);
}

#[test]
fn nothing_improvable_gives_no_speedup() {
    for k in [1.5, 2.0, 10.0, 1000.0] {
        assert_eq!(speedup(0.0, k).unwrap(), 1.0);
    }
}

#[test]
fn everything_improvable_gives_factor() {
    assert_eq!(speedup(1.0, 8.0).unwrap(), 8.0);
}

#[test]
fn speedup_below_ceiling() {
    for f in [0.05, 0.2, 0.35, 0.5, 0.8, 0.95] {
        let ceiling = theoretical_ceiling(f).unwrap();
        for k in [1.5, 2.0, 5.0, 20.0, 100.0] {
            let a = speedup(f, k).unwrap();
            assert!(a > 1.0, "f={f} k={k} gave {a}");
            assert!(a < ceiling, "f={f} k={k} gave {a} >= {ceiling}");
        }
    }
}

#[test]
fn huge_factor_rounds_to_ceiling() {
    let ceiling = theoretical_ceiling(0.2).unwrap();
    assert!(speedup(0.2, 100.0).unwrap() < ceiling);
    assert_eq!(speedup(0.2, 100_000.0).unwrap(), ceiling);

    // Without rounding the speedup stays below the ceiling
    let exact = 1.0 / (0.8 + 0.2 / 100_000.0);
    assert!(exact < 1.0 / 0.8);
}

#[test]
fn speedup_increases_with_fraction_and_factor() {
    assert!(speedup(0.3, 4.0).unwrap() < speedup(0.4, 4.0).unwrap());
    assert!(speedup(0.3, 4.0).unwrap() < speedup(0.3, 5.0).unwrap());
}

#[test]
fn ceiling_values() {
    assert_eq!(theoretical_ceiling(0.20).unwrap(), 1.25);
    assert_eq!(theoretical_ceiling(0.35).unwrap(), 1.5385);
    assert_eq!(theoretical_ceiling(0.8).unwrap(), 5.0);
    assert_eq!(theoretical_ceiling(0.99).unwrap(), 100.0);
    assert_eq!(theoretical_ceiling(0.0).unwrap(), 1.0);
}

#[test]
fn ceiling_strictly_increasing() {
    let mut previous = theoretical_ceiling(0.0).unwrap();
    for step in 1..100 {
        let ceiling = theoretical_ceiling(f64::from(step) / 100.0).unwrap();
        assert!(ceiling > previous);
        previous = ceiling;
    }
}

#[test]
fn ceiling_undefined_at_one() {
    assert_eq!(
        theoretical_ceiling(1.0),
        Err(AmdahlError::DivisionUndefined { fraction: 1.0 })
    );
}

#[test]
#[should_panic(expected = "DivisionUndefined")]
fn ceiling_at_one_is_not_infinity() {
    theoretical_ceiling(1.0).unwrap();
}

#[test]
fn optimized_duration_values() {
    assert_eq!(optimized_duration(100.0, 2.0).unwrap(), 50.0);
    assert_abs_diff_eq!(
        optimized_duration(50.0, 1.3889).unwrap(),
        36.0,
        epsilon = 1e-3
    );
}

#[test]
fn optimized_duration_inverts_speedup() {
    for (t, a) in [(50.0, 1.3889), (12.5, 2.0), (1000.0, 1.1538)] {
        let optimized = optimized_duration(t, a).unwrap();
        assert_relative_eq!(optimized * a, t, max_relative = 1e-4);
    }
}

#[test]
fn optimized_duration_rejects_bad_speedup() {
    assert_eq!(
        optimized_duration(50.0, 0.0),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::SpeedupNotPositive(0.0)
        ))
    );
    assert!(optimized_duration(50.0, -1.0).is_err());
}

#[test]
fn optimized_duration_rejects_bad_duration() {
    assert_eq!(
        optimized_duration(0.0, 1.5),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::DurationNotPositive(0.0)
        ))
    );
    assert!(optimized_duration(-10.0, 1.5).is_err());
}

#[test]
fn required_factor_reaches_target() {
    let k = required_factor(0.5, 1.6).unwrap();
    assert_abs_diff_eq!(k, 4.0, epsilon = 1e-4);
    assert_abs_diff_eq!(speedup(0.5, k).unwrap(), 1.6, epsilon = 1e-4);
}

#[test]
fn required_factor_round_trip() {
    for (f, k) in [(0.35, 5.0), (0.25, 7.0), (0.5, 3.0), (0.8, 10.0), (0.6, 2.5)] {
        let a = speedup(f, k).unwrap();
        assert_relative_eq!(required_factor(f, a).unwrap(), k, max_relative = 1e-2);
    }
}

#[test]
fn required_factor_unreachable() {
    assert_eq!(
        required_factor(0.2, 1.3),
        Err(AmdahlError::Unreachable {
            target: 1.3,
            ceiling: 1.25
        })
    );
    // Exactly the ceiling is still out of reach for a finite factor
    assert!(matches!(
        required_factor(0.5, 2.0),
        Err(AmdahlError::Unreachable { .. })
    ));
    // Nothing improvable means nothing is reachable
    assert!(matches!(
        required_factor(0.0, 1.01),
        Err(AmdahlError::Unreachable { .. })
    ));
}

#[test]
fn required_factor_rejects_low_target() {
    assert_eq!(
        required_factor(0.5, 1.0),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::TargetNotAboveOne(1.0)
        ))
    );
    assert!(required_factor(0.5, 0.5).is_err());
}

#[test]
fn invalid_fraction_and_factor_are_distinct() {
    assert_eq!(
        speedup(1.5, 2.0),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::FractionOutOfRange(1.5)
        ))
    );
    assert_eq!(
        speedup(0.5, 1.0),
        Err(AmdahlError::InvalidParameter(
            InvalidParameter::FactorNotAboveOne(1.0)
        ))
    );
}

#[test]
#[should_panic(expected = "FractionOutOfRange(-0.1)")]
fn negative_fraction() {
    speedup(-0.1, 2.0).unwrap();
}

#[test]
fn error_messages() {
    assert_eq!(
        format!("{}", speedup(0.5, 0.5).unwrap_err()),
        "Error: invalid parameter: improvement factor 0.5 must be greater than 1"
    );
    assert_eq!(
        format!("{}", required_factor(0.2, 1.3).unwrap_err()),
        "Error: target speedup 1.3000x is unreachable, the ceiling is 1.2500x"
    );
}
