// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The closed-form Amdahl's Law evaluator.
//!
//! For a component where a fraction `f` of the work becomes `k` times faster
//! the overall speedup is
//!
//! ```text
//! A = 1 / ((1 - f) + f / k)
//! ```
//!
//! and as `k` grows without bound `A` approaches the theoretical ceiling
//! `1 / (1 - f)`. The ceiling depends only on `f`, so a large `k` applied to a
//! small fraction of the work buys very little.
//!
//! All functions here are pure. Numeric results are rounded to
//! [DECIMAL_PRECISION] decimal places so that displayed values and test
//! comparisons are stable.
//!
//! # Example
//!
//! ```rust
//! use amdahl_engine::evaluator::{speedup, theoretical_ceiling};
//!
//! let a = speedup(0.35, 5.0).unwrap();
//! assert_eq!(a, 1.3889);
//! assert!(a < theoretical_ceiling(0.35).unwrap());
//! ```

use crate::component::Component;
use crate::parameter_error;
use crate::types::{AmdahlError, AmdahlResult, InvalidParameter};

/// Number of decimal places every numeric result is rounded to.
pub const DECIMAL_PRECISION: i32 = 4;

/// Round to [DECIMAL_PRECISION] decimal places.
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    round_to(value, DECIMAL_PRECISION)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Check that `fraction` lies in `[0, 1]`.
pub fn check_fraction(fraction: f64) -> AmdahlResult<()> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        parameter_error!(InvalidParameter::FractionOutOfRange(fraction))
    }
}

/// Check that `factor` is finite and strictly greater than 1.
pub fn check_factor(factor: f64) -> AmdahlResult<()> {
    if factor.is_nan() || factor <= 1.0 {
        return parameter_error!(InvalidParameter::FactorNotAboveOne(factor));
    }
    if factor.is_infinite() {
        return parameter_error!(InvalidParameter::FactorNotFinite(factor));
    }
    Ok(())
}

fn amdahl(fraction: f64, factor: f64) -> f64 {
    round_to_precision(1.0 / ((1.0 - fraction) + fraction / factor))
}

/// Overall speedup `A = 1 / ((1 - f) + f / k)`.
///
/// Exactly `1.0` when `fraction` is `0`, greater than `1.0` otherwise.
///
/// The unrounded speedup is always below [theoretical_ceiling] for a finite
/// factor, but once `k` is large enough the two agree to
/// [DECIMAL_PRECISION] places and the rounded values are equal. For example
/// `speedup(0.2, 100000.0)` and `theoretical_ceiling(0.2)` are both `1.25`.
pub fn speedup(fraction: f64, factor: f64) -> AmdahlResult<f64> {
    check_fraction(fraction)?;
    check_factor(factor)?;
    Ok(amdahl(fraction, factor))
}

/// The limit of [speedup] as the factor tends to infinity: `1 / (1 - f)`.
///
/// Fails with [AmdahlError::DivisionUndefined] when `fraction` is `1` as the
/// ceiling is unbounded.
pub fn theoretical_ceiling(fraction: f64) -> AmdahlResult<f64> {
    check_fraction(fraction)?;
    if fraction == 1.0 {
        return Err(AmdahlError::DivisionUndefined { fraction });
    }
    Ok(round_to_precision(1.0 / (1.0 - fraction)))
}

/// Duration after applying `speedup` to an `original` duration.
///
/// Both arguments must be greater than `0`. A zero `original` duration is
/// rejected with [InvalidParameter::DurationNotPositive] rather than giving
/// `0`, as there is nothing to optimize and the improvement percentage of a
/// [Timing](crate::result::Timing) would divide by zero.
pub fn optimized_duration(original: f64, speedup: f64) -> AmdahlResult<f64> {
    if speedup.is_nan() || speedup <= 0.0 {
        return parameter_error!(InvalidParameter::SpeedupNotPositive(speedup));
    }
    if original.is_nan() || original <= 0.0 {
        return parameter_error!(InvalidParameter::DurationNotPositive(original));
    }
    Ok(round_to_precision(original / speedup))
}

/// Solve the formula for the factor that reaches `target` speedup:
/// `k = f / (1 / A - (1 - f))`.
///
/// A target at or above the ceiling for `fraction` cannot be reached with any
/// finite factor and is reported as [AmdahlError::Unreachable].
pub fn required_factor(fraction: f64, target: f64) -> AmdahlResult<f64> {
    check_fraction(fraction)?;
    if target.is_nan() || target <= 1.0 {
        return parameter_error!(InvalidParameter::TargetNotAboveOne(target));
    }

    if fraction < 1.0 {
        let ceiling = 1.0 / (1.0 - fraction);
        if target >= ceiling {
            return Err(AmdahlError::Unreachable {
                target,
                ceiling: round_to_precision(ceiling),
            });
        }
    }

    Ok(round_to_precision(
        fraction / (1.0 / target - (1.0 - fraction)),
    ))
}

/// Speedup as a percentage of the theoretical ceiling.
#[must_use]
pub fn efficiency_percent(speedup: f64, ceiling: f64) -> f64 {
    speedup / ceiling * 100.0
}

/// The operations the comparator needs from an evaluator.
///
/// Components are validated on construction so the per-component speedup
/// cannot fail. The ceiling still can, for a fraction of exactly `1`.
pub trait Evaluate {
    fn speedup(&self, component: &Component) -> f64;

    fn theoretical_ceiling(&self, component: &Component) -> AmdahlResult<f64>;

    fn optimized_duration(&self, original: f64, speedup: f64) -> AmdahlResult<f64>;

    fn required_factor(&self, fraction: f64, target: f64) -> AmdahlResult<f64>;
}

/// The closed-form evaluator. Holds no state so it can be shared freely
/// between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluate for Evaluator {
    fn speedup(&self, component: &Component) -> f64 {
        amdahl(
            component.improvable_fraction(),
            component.improvement_factor(),
        )
    }

    fn theoretical_ceiling(&self, component: &Component) -> AmdahlResult<f64> {
        theoretical_ceiling(component.improvable_fraction())
    }

    fn optimized_duration(&self, original: f64, speedup: f64) -> AmdahlResult<f64> {
        optimized_duration(original, speedup)
    }

    fn required_factor(&self, fraction: f64, target: f64) -> AmdahlResult<f64> {
        required_factor(fraction, target)
    }
}
