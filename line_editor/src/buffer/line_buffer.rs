// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Terminal;

/// Mutable text with a cursor, consumed by the driver and by editing backends (through
/// the editor context).
///
/// The buffer is byte transparent: it stores whatever bytes are inserted and imposes no
/// encoding. Drawing goes through the terminal sink the driver passes in, so the buffer
/// carries no output handle of its own.
pub trait LineBuffer {
    /// Start of a new line: clear contents, cursor to zero.
    fn begin_line(&mut self);

    /// End of the line. Contents remain readable afterwards so the driver can snapshot
    /// the finished line.
    fn end_line(&mut self);

    fn get_buffer(&self) -> &[u8];

    fn get_cursor(&self) -> usize;

    /// Move the cursor, clamped to the buffer length.
    fn set_cursor(&mut self, position: usize);

    /// Insert at the cursor; the cursor ends up after the inserted bytes.
    fn insert(&mut self, bytes: &[u8]);

    /// Remove `start..end`. A cursor inside the range collapses to `start`; a cursor
    /// past it shifts left by the removed length.
    fn remove(&mut self, start: usize, end: usize);

    /// Repaint if anything changed since the last draw.
    fn draw(&mut self, terminal: &mut dyn Terminal);

    /// Unconditional full repaint.
    fn redraw(&mut self, terminal: &mut dyn Terminal);
}
