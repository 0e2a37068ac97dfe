// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Concrete [`LineBuffer`]: a byte vector plus cursor, with dirty-tracked rendering.
//!
//! Rendering is a full-line repaint: carriage return, erase to end of line, prompt,
//! contents, then a cursor park. There is no damage tracking; a dirty flag gates
//! [`LineBuffer::draw`] so unchanged frames are skipped.

use crate::{InlineString, LineStorage, Terminal};

use super::LineBuffer;

#[derive(Debug, Default)]
pub struct EditBuffer {
    prompt: InlineString,
    line: LineStorage,
    cursor: usize,
    dirty: bool,
}

impl EditBuffer {
    #[must_use]
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: InlineString::from_str(prompt),
            line: LineStorage::new(),
            cursor: 0,
            dirty: false,
        }
    }

    fn paint(&mut self, terminal: &mut dyn Terminal) {
        let mut frame: Vec<u8> = Vec::with_capacity(
            self.prompt.len() + self.line.len() + 16,
        );
        frame.extend_from_slice(b"\r\x1b[K");
        frame.extend_from_slice(self.prompt.as_bytes());
        frame.extend_from_slice(&self.line);

        // Park the terminal cursor on the logical cursor column.
        frame.push(b'\r');
        let column = self.prompt.len() + self.cursor;
        if column > 0 {
            frame.extend_from_slice(format!("\x1b[{column}C").as_bytes());
        }

        terminal.write(&frame);
        self.dirty = false;
    }
}

impl LineBuffer for EditBuffer {
    fn begin_line(&mut self) {
        self.line.clear();
        self.cursor = 0;
        self.dirty = true;
    }

    fn end_line(&mut self) {
        // Contents stay readable for the driver's final snapshot.
    }

    fn get_buffer(&self) -> &[u8] { &self.line }

    fn get_cursor(&self) -> usize { self.cursor }

    fn set_cursor(&mut self, position: usize) {
        let position = position.min(self.line.len());
        if position != self.cursor {
            self.cursor = position;
            self.dirty = true;
        }
    }

    fn insert(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let cursor = self.cursor.min(self.line.len());
        self.line.insert_from_slice(cursor, bytes);
        self.cursor = cursor + bytes.len();
        self.dirty = true;
    }

    fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.line.len());
        let start = start.min(end);
        if start == end {
            return;
        }
        self.line.drain(start..end);
        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        self.dirty = true;
    }

    fn draw(&mut self, terminal: &mut dyn Terminal) {
        if self.dirty {
            self.paint(terminal);
        }
    }

    fn redraw(&mut self, terminal: &mut dyn Terminal) { self.paint(terminal); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestTerminal;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_at_cursor_advances_it() {
        let mut buffer = EditBuffer::new("> ");
        buffer.begin_line();
        buffer.insert(b"hello");
        buffer.set_cursor(2);
        buffer.insert(b"y ");

        assert_eq!(buffer.get_buffer(), b"hey llo");
        assert_eq!(buffer.get_cursor(), 4);
    }

    #[test]
    fn remove_adjusts_the_cursor() {
        let mut buffer = EditBuffer::new("");
        buffer.begin_line();
        buffer.insert(b"abcdef");

        // Cursor past the removed range shifts left.
        buffer.remove(1, 3);
        assert_eq!(buffer.get_buffer(), b"adef");
        assert_eq!(buffer.get_cursor(), 4);

        // Cursor inside the removed range collapses to its start.
        buffer.set_cursor(2);
        buffer.remove(1, 4);
        assert_eq!(buffer.get_buffer(), b"a");
        assert_eq!(buffer.get_cursor(), 1);
    }

    #[test]
    fn out_of_range_arguments_are_clamped() {
        let mut buffer = EditBuffer::new("");
        buffer.begin_line();
        buffer.insert(b"ab");

        buffer.set_cursor(99);
        assert_eq!(buffer.get_cursor(), 2);

        buffer.remove(1, 99);
        assert_eq!(buffer.get_buffer(), b"a");
    }

    #[test]
    fn draw_only_paints_when_dirty_but_redraw_always_does() {
        let mut terminal = TestTerminal::default();
        let mut buffer = EditBuffer::new("> ");
        buffer.begin_line();
        buffer.insert(b"ok");

        buffer.draw(&mut terminal);
        let first_frame = terminal.output();
        assert!(!first_frame.is_empty());

        buffer.draw(&mut terminal);
        assert_eq!(terminal.output(), first_frame);

        buffer.redraw(&mut terminal);
        assert!(terminal.output().len() > first_frame.len());
    }

    #[test]
    fn frame_contains_prompt_contents_and_cursor_park() {
        let mut terminal = TestTerminal::default();
        let mut buffer = EditBuffer::new("> ");
        buffer.begin_line();
        buffer.insert(b"hi");
        buffer.set_cursor(1);
        buffer.draw(&mut terminal);

        assert_eq!(terminal.output(), b"\r\x1b[K> hi\r\x1b[3C");
    }
}
