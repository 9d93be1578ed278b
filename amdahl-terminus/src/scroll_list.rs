// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Number of rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// A list of rows with a selected row that can be moved with the keyboard.
pub struct ScrollList<T> {
    rows: Vec<T>,

    selected: usize,

    /// Keep the selection on the newest row until the user moves it
    follow_tail: bool,
}

impl<T> ScrollList<T> {
    #[must_use]
    pub fn new(follow_tail: bool) -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            follow_tail,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: T) {
        self.rows.push(row);
        if self.follow_tail {
            self.selected = self.rows.len() - 1;
        }
    }

    /// Replace every row, keeping the selection where possible.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.selected = if self.follow_tail {
            self.rows.len().saturating_sub(1)
        } else {
            self.clamp(self.selected)
        };
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = 0;
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = self.clamp(index);
        self.follow_tail = false;
    }

    pub fn move_up(&mut self, n: usize) {
        self.select(self.selected.saturating_sub(n));
    }

    pub fn move_down(&mut self, n: usize) {
        self.select(self.selected.saturating_add(n));
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.rows.len().saturating_sub(1))
    }

    /// First row to show so that the selection sits in the middle of a pane
    /// `height` rows tall.
    #[must_use]
    pub fn window_start(&self, height: u16) -> usize {
        self.selected.saturating_sub(usize::from(height / 2))
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.modifiers == KeyModifiers::CONTROL {
            match key_event.code {
                KeyCode::Char('f') => self.move_down(PAGE_SIZE),
                KeyCode::Char('u') => self.move_up(PAGE_SIZE),
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(PAGE_SIZE),
            KeyCode::PageDown => self.move_down(PAGE_SIZE),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.rows.len()),
            _ => {}
        }
    }
}

impl<T> Default for ScrollList<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_tail_until_moved() {
        let mut list = ScrollList::new(true);
        list.push("a");
        list.push("b");
        assert_eq!(list.selected(), Some(&"b"));

        list.move_up(1);
        list.push("c");
        assert_eq!(list.selected(), Some(&"a"));
    }

    #[test]
    fn movement_is_clamped() {
        let mut list = ScrollList::default();
        list.set_rows(vec![1, 2, 3]);
        list.move_down(10);
        assert_eq!(list.index(), 2);
        list.move_up(10);
        assert_eq!(list.index(), 0);
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list: ScrollList<u8> = ScrollList::default();
        list.move_down(1);
        assert_eq!(list.selected(), None);
        assert_eq!(list.index(), 0);
    }

    #[test]
    fn window_centres_selection() {
        let mut list = ScrollList::default();
        list.set_rows((0..50).collect());
        list.select(30);
        assert_eq!(list.window_start(10), 25);
        list.select(2);
        assert_eq!(list.window_start(10), 0);
    }
}
