// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::{io, panic};

use color_eyre::Result;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::Draw;
use crate::event::EventHandler;

/// The terminal in raw mode along with its event source.
///
/// The terminal is restored by [Tui::exit], or by the panic hook installed in
/// [Tui::init] if the application panics.
pub struct Tui<B: Backend> {
    terminal: Terminal<B>,
    pub events: EventHandler,
}

impl<B: Backend> Tui<B> {
    pub fn new(terminal: Terminal<B>, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    pub fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen)?;

        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic| {
            if let Err(e) = reset_terminal() {
                eprintln!("Failed to reset the terminal: {e}");
            }
            panic_hook(panic);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &impl Draw) -> Result<()> {
        self.terminal.draw(|frame| app.draw(frame))?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        reset_terminal()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Leave raw mode and the alternate screen.
fn reset_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(io::stderr(), LeaveAlternateScreen)?;
    Ok(())
}
