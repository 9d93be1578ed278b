// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! A single-line text field with a cursor.

use std::fmt::Display;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputField {
    /// Title shown on the field's border
    label: &'static str,

    value: String,

    /// Cursor position counted in characters, not bytes
    cursor: usize,
}

impl InputField {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the contents and leave the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.char_count();
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let offset = self.byte_offset(self.cursor);
            self.value.remove(offset);
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.modifiers == KeyModifiers::CONTROL {
            match key_event.code {
                KeyCode::Char('a') => self.move_home(),
                KeyCode::Char('e') => self.move_end(),
                KeyCode::Char('u') => self.clear(),
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
    }
}

impl Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_editing() {
        let mut field = InputField::new("Name");
        for c in "VRM".chars() {
            field.handle_key_event(key(KeyCode::Char(c)));
        }
        field.handle_key_event(key(KeyCode::Left));
        field.handle_key_event(key(KeyCode::Char('A')));
        assert_eq!(field.value(), "VRAM");
        assert_eq!(field.cursor(), 3);

        field.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(field.value(), "VRM");
        field.handle_key_event(key(KeyCode::Delete));
        assert_eq!(field.value(), "VR");
    }

    #[test]
    fn multi_byte_characters() {
        let mut field = InputField::new("Name");
        field.set_value("núcleos");
        assert_eq!(field.cursor(), 7);
        field.move_home();
        field.move_right();
        field.move_right();
        field.backspace();
        assert_eq!(field.value(), "ncleos");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = InputField::new("Factor");
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.set_value("5");
        field.move_right();
        field.move_right();
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn control_clears() {
        let mut field = InputField::new("Percent");
        field.set_value("35");
        field.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);
    }
}
