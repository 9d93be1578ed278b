// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use amdahl_engine::analysis::Comparator;
use amdahl_engine::scenario::{WorkedProblem, solve_worked_problem};
use amdahl_engine::types::AmdahlResult;
use log::debug;

pub type WorkedProblemReceiver = Receiver<AmdahlResult<WorkedProblem>>;

/// Solve the worked problem on a new thread. The outcome is sent on the
/// returned channel once it is ready.
pub fn spawn_worked_problem(
    comparator: Comparator,
    original_duration: f64,
    target_speedup: f64,
) -> WorkedProblemReceiver {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        debug!("Solving worked problem for {original_duration} ms, target {target_speedup}x");
        let result = solve_worked_problem(&comparator, original_duration, target_speedup);

        // The explorer may have exited while this was running
        if sender.send(result).is_err() {
            debug!("Worked problem finished after the explorer closed");
        }
    });
    receiver
}
