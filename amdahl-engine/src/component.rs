// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The description of one optimizable unit of a system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evaluator::{check_factor, check_fraction};
use crate::parameter_error;
use crate::types::{AmdahlError, AmdahlResult, InvalidParameter};

/// An optimizable unit: the share of the work it covers and how much faster
/// that share becomes.
///
/// A `Component` can only be built through [Component::new] (or
/// deserialization, which goes through the same checks) so every instance
/// satisfies `0 <= improvable_fraction <= 1` and `improvement_factor > 1`.
/// Out-of-range values are rejected, never clamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentSection")]
pub struct Component {
    name: String,
    improvable_fraction: f64,
    improvement_factor: f64,
}

/// Unchecked field layout used when deserializing a [Component].
#[derive(Deserialize)]
struct ComponentSection {
    name: String,
    improvable_fraction: f64,
    improvement_factor: f64,
}

impl TryFrom<ComponentSection> for Component {
    type Error = AmdahlError;

    fn try_from(section: ComponentSection) -> Result<Self, Self::Error> {
        Component::new(
            section.name,
            section.improvable_fraction,
            section.improvement_factor,
        )
    }
}

impl Component {
    /// Create a component, validating all three fields.
    pub fn new(
        name: impl Into<String>,
        improvable_fraction: f64,
        improvement_factor: f64,
    ) -> AmdahlResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return parameter_error!(InvalidParameter::EmptyName);
        }
        check_fraction(improvable_fraction)?;
        check_factor(improvement_factor)?;

        Ok(Self {
            name,
            improvable_fraction,
            improvement_factor,
        })
    }

    /// Create a component from a percentage (0-100) of improvable work, which
    /// is how users enter it.
    pub fn from_percent(
        name: impl Into<String>,
        improvable_percent: f64,
        improvement_factor: f64,
    ) -> AmdahlResult<Self> {
        Self::new(name, improvable_percent / 100.0, improvement_factor)
    }

    /// Build a component from literals that are known to be in range.
    pub(crate) fn from_literal(
        name: &str,
        improvable_fraction: f64,
        improvement_factor: f64,
    ) -> Self {
        debug_assert!(check_fraction(improvable_fraction).is_ok());
        debug_assert!(check_factor(improvement_factor).is_ok());
        Self {
            name: name.to_string(),
            improvable_fraction,
            improvement_factor,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `f` in the formula.
    #[must_use]
    pub fn improvable_fraction(&self) -> f64 {
        self.improvable_fraction
    }

    /// `k` in the formula.
    #[must_use]
    pub fn improvement_factor(&self) -> f64 {
        self.improvement_factor
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (f={:.1}%, k={})",
            self.name,
            self.improvable_fraction * 100.0,
            self.improvement_factor
        )
    }
}
