// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Interactive terminal explorer.
//!
//! Shows the predefined GPU components, lets the user enter their own
//! components and compares the most recent of them. The complete worked
//! problem is solved on a [worker] thread so the interface stays responsive.

pub mod app;
pub mod handler;
pub mod ui;
pub mod worker;
