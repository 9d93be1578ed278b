// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Front-end for the [amdahl_engine] crate.
//!
//! The `amdahl` binary offers one-shot subcommands that print plain-text
//! reports as well as an interactive terminal explorer. Both share the
//! layered [config], the user [session] and the [report] formatting.

use amdahl_engine::analysis::Analysis;
use log::{error, info};
use ratatui::style::{Color, Style};

pub mod config;
pub mod event;
pub mod explorer;
pub mod input_field;
pub mod report;
pub mod scroll_list;
pub mod session;
pub mod tui;

/// Destination for messages produced while handling user requests.
pub trait Logger {
    fn error(&mut self, message: &str);
    fn info(&mut self, message: &str);
}

/// Forwards messages to the `log` crate.
pub struct CliLogger;

impl Logger for CliLogger {
    fn error(&mut self, message: &str) {
        error!("{message}");
    }
    fn info(&mut self, message: &str) {
        info!("{message}");
    }
}

pub trait Draw {
    fn draw(&self, frame: &mut ratatui::Frame);
}

/// Report every component an analysis had to leave out.
pub fn report_skipped(analysis: &Analysis, logger: &mut impl Logger) {
    for skipped in analysis.skipped() {
        logger.error(&format!(
            "{} was left out of the comparison. {}",
            skipped.component.name(),
            skipped.error
        ));
    }
}

fn block_style(current_block: bool) -> Style {
    if current_block {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
