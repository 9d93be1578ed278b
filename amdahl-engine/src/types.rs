// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Shared types.

use std::error::Error;
use std::fmt;

#[macro_export]
/// Build an `Err` holding an [AmdahlError::InvalidParameter] from an
/// [InvalidParameter] variant.
macro_rules! parameter_error {
    ($variant:expr) => {
        Err($crate::types::AmdahlError::InvalidParameter($variant))
    };
}

/// The parameter check that failed.
///
/// Each bound is reported separately so that callers can tell a bad fraction
/// from a bad factor without parsing the message.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidParameter {
    EmptyName,
    FractionOutOfRange(f64),
    FactorNotAboveOne(f64),
    FactorNotFinite(f64),
    TargetNotAboveOne(f64),
    SpeedupNotPositive(f64),
    DurationNotPositive(f64),
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidParameter::EmptyName => write!(f, "component name must not be empty"),
            InvalidParameter::FractionOutOfRange(value) => {
                write!(f, "improvable fraction {value} is not within [0, 1]")
            }
            InvalidParameter::FactorNotAboveOne(value) => {
                write!(f, "improvement factor {value} must be greater than 1")
            }
            InvalidParameter::FactorNotFinite(value) => {
                write!(f, "improvement factor {value} must be finite")
            }
            InvalidParameter::TargetNotAboveOne(value) => {
                write!(f, "target speedup {value} must be greater than 1")
            }
            InvalidParameter::SpeedupNotPositive(value) => {
                write!(f, "speedup {value} must be greater than 0")
            }
            InvalidParameter::DurationNotPositive(value) => {
                write!(f, "duration {value} must be greater than 0")
            }
        }
    }
}

/// The `AmdahlError` is returned by any calculation that cannot produce an
/// ordinary number.
#[derive(Clone, Debug, PartialEq)]
pub enum AmdahlError {
    /// An argument broke one of the formula's preconditions.
    InvalidParameter(InvalidParameter),

    /// The theoretical ceiling `1 / (1 - f)` was requested for `f == 1`.
    DivisionUndefined { fraction: f64 },

    /// No finite improvement factor reaches `target`, because it is at or
    /// above the `ceiling` set by the improvable fraction.
    Unreachable { target: f64, ceiling: f64 },
}

impl fmt::Display for AmdahlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AmdahlError::InvalidParameter(parameter) => {
                write!(f, "Error: invalid parameter: {parameter}")
            }
            AmdahlError::DivisionUndefined { fraction } => {
                write!(
                    f,
                    "Error: theoretical ceiling is undefined for improvable fraction {fraction}"
                )
            }
            AmdahlError::Unreachable { target, ceiling } => {
                write!(
                    f,
                    "Error: target speedup {target:.4}x is unreachable, the ceiling is {ceiling:.4}x"
                )
            }
        }
    }
}

impl Error for AmdahlError {}

impl From<InvalidParameter> for AmdahlError {
    fn from(parameter: InvalidParameter) -> Self {
        AmdahlError::InvalidParameter(parameter)
    }
}

/// The return type for any calculation that can fail.
pub type AmdahlResult<T> = Result<T, AmdahlError>;
