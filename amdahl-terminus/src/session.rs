// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Components entered by the user.
//!
//! A [Session] is an append-only log: new components are added at the end
//! and comparisons of "the last N" look at the tail of it. Components come
//! either from the text fields of the explorer or from a YAML file holding a
//! list of [ComponentEntry] values, for example:
//!
//! ```yaml
//! - name: Shader cores
//!   percent: 40
//!   factor: 6
//! - name: L2 cache
//!   percent: 15
//!   factor: 3
//! ```

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use amdahl_engine::analysis::{Comparator, Comparison};
use amdahl_engine::component::Component;
use amdahl_engine::evaluator::Evaluate;
use amdahl_engine::types::AmdahlError;
use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Logger;

/// A component as written by a user, with the improvable share as a
/// percentage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ComponentEntry {
    pub name: String,
    pub percent: f64,
    pub factor: f64,
}

impl ComponentEntry {
    pub fn to_component(&self) -> Result<Component, AmdahlError> {
        Component::from_percent(self.name.as_str(), self.percent, self.factor)
    }
}

/// Why text typed by the user could not be turned into a component.
#[derive(Clone, Debug, PartialEq)]
pub enum EntryError {
    NotANumber { field: &'static str, value: String },
    Invalid(AmdahlError),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntryError::NotANumber { field, value } => {
                write!(f, "Error: {field} '{value}' is not a number")
            }
            EntryError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EntryError {}

impl From<AmdahlError> for EntryError {
    fn from(e: AmdahlError) -> Self {
        EntryError::Invalid(e)
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, EntryError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| EntryError::NotANumber {
            field,
            value: value.to_string(),
        })
}

/// Build a component from the three text fields of an entry form.
pub fn parse_component(name: &str, percent: &str, factor: &str) -> Result<Component, EntryError> {
    let percent = parse_number("percent", percent)?;
    let factor = parse_number("factor", factor)?;
    Ok(Component::from_percent(name.trim(), percent, factor)?)
}

/// Read a YAML list of [ComponentEntry] values.
///
/// A file with no entries gives an empty list.
pub fn load_entries(path: &Path) -> Result<Vec<ComponentEntry>> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml_ng::from_str::<Option<Vec<ComponentEntry>>>(&contents)
        .map(Option::unwrap_or_default)
        .wrap_err_with(|| format!("Failed to parse contents of {}", path.display()))
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    components: Vec<Arc<Component>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every valid entry of a component file.
    ///
    /// An invalid entry is reported to `logger`, naming its position, and
    /// left out. Only a file that cannot be read or parsed is an error.
    pub fn from_file(path: &Path, logger: &mut impl Logger) -> Result<Self> {
        let mut session = Session::new();
        for (index, entry) in load_entries(path)?.iter().enumerate() {
            match entry.to_component() {
                Ok(component) => {
                    session.push(component);
                }
                Err(e) => logger.error(&format!(
                    "Invalid entry {} ('{}') in {}. {e}",
                    index + 1,
                    entry.name,
                    path.display()
                )),
            }
        }
        Ok(session)
    }

    pub fn push(&mut self, component: Component) -> Arc<Component> {
        let component = Arc::new(component);
        self.components.push(component.clone());
        component
    }

    /// Parse and append a component typed by the user.
    pub fn enter(
        &mut self,
        name: &str,
        percent: &str,
        factor: &str,
    ) -> Result<Arc<Component>, EntryError> {
        let component = parse_component(name, percent, factor)?;
        Ok(self.push(component))
    }

    /// All components, oldest first.
    #[must_use]
    pub fn components(&self) -> &[Arc<Component>] {
        &self.components
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn clear(&mut self) {
        self.components.clear();
    }

    /// Compare the `n` most recent components.
    pub fn compare_last_n<E: Evaluate>(&self, comparator: &Comparator<E>, n: usize) -> Comparison {
        comparator.evaluate_last_n(&self.components, n)
    }
}
