// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

#![doc(test(attr(warn(unused))))]

//! Amdahl's Law speedup predictions for hardware-component optimizations.
//!
//! The crate is a small closed-form engine:
//!  - [component]: the validated description of one optimizable unit.
//!  - [evaluator]: speedup, theoretical ceiling, optimized duration and the
//!    inverse solve for the factor needed to reach a target.
//!  - [result]: a component paired with its computed values.
//!  - [analysis]: ranking of several components and the justification of
//!    which one to optimize.
//!  - [dataset]: the predefined GPU workload.
//!  - [sweep]: sample grids for plotting.
//!  - [scenario]: the complete worked GPU exercise.
//!
//! Nothing in here holds mutable state, so every value can be shared between
//! threads.
//!
//! # Simple Application
//!
//! ```rust
//! use amdahl_engine::analysis::Comparator;
//! use amdahl_engine::dataset::predefined_components;
//! use amdahl_engine::evaluator::Evaluator;
//!
//! let comparator = Comparator::new(Evaluator);
//! let analysis = comparator.evaluate_all(&predefined_components());
//! assert_eq!(analysis.best_component().unwrap().name(), "CUDA cores");
//! println!("{}", analysis.justification());
//! ```

pub mod analysis;
pub mod component;
pub mod dataset;
pub mod evaluator;
pub mod result;
pub mod scenario;
pub mod sweep;
pub mod types;
