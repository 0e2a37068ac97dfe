// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The default readline-style backend: basic cursor motion, deletion, completion, and
//! line termination. It is always registered first, so it also receives every byte
//! sequence that resolves to no binding (pass-through), which it treats as self-insert.

use crate::{BinderView, EditorBackend, EditorContext, InlineString, InputResult};

/// Binding ids registered by [`BasicBackend`].
mod bind_id {
    pub const DONE: u8 = 1;
    pub const EOF: u8 = 2;
    pub const BACKSPACE: u8 = 3;
    pub const CURSOR_LEFT: u8 = 4;
    pub const CURSOR_RIGHT: u8 = 5;
    pub const CURSOR_HOME: u8 = 6;
    pub const CURSOR_END: u8 = 7;
    pub const KILL_LINE: u8 = 8;
    pub const KILL_TO_END: u8 = 9;
    pub const COMPLETE: u8 = 10;
}

#[derive(Debug)]
pub struct BasicBackend {
    /// Host shell tag, for diagnostics only.
    shell_name: InlineString,
}

impl BasicBackend {
    #[must_use]
    pub fn new(shell_name: &str) -> Self {
        Self {
            shell_name: InlineString::from_str(shell_name),
        }
    }
}

impl EditorBackend for BasicBackend {
    fn bind_input(&mut self, binder: &mut BinderView<'_>) {
        let bindings: &[(&str, u8)] = &[
            ("\\r", bind_id::DONE),
            ("\\n", bind_id::DONE),
            ("\\C-d", bind_id::EOF),
            ("\x7f", bind_id::BACKSPACE),
            ("\\C-h", bind_id::BACKSPACE),
            ("\\e[D", bind_id::CURSOR_LEFT),
            ("\\e[C", bind_id::CURSOR_RIGHT),
            ("\\e[H", bind_id::CURSOR_HOME),
            ("\\e[F", bind_id::CURSOR_END),
            ("\\C-a", bind_id::CURSOR_HOME),
            ("\\C-e", bind_id::CURSOR_END),
            ("\\C-u", bind_id::KILL_LINE),
            ("\\C-k", bind_id::KILL_TO_END),
            ("\\t", bind_id::COMPLETE),
        ];
        for (chord, id) in bindings {
            if let Err(error) = binder.bind(chord, *id) {
                tracing::warn!("failed to bind {chord:?}: {error}");
            }
        }
    }

    fn on_begin_line(&mut self, _prompt: &str, _context: &mut EditorContext<'_>) {
        tracing::debug!(shell = %self.shell_name, "basic backend: begin line");
    }

    fn on_input(
        &mut self,
        keys: &[u8],
        id: Option<u8>,
        context: &mut EditorContext<'_>,
    ) -> InputResult {
        let buffer = &mut *context.buffer;
        let cursor = buffer.get_cursor();
        let length = buffer.get_buffer().len();

        match id {
            // Pass-through: insert anything printable (and any byte with the high bit
            // set, for byte transparent UTF-8 input); drop stray control bytes.
            None => {
                for &byte in keys {
                    if byte >= 0x20 && byte != 0x7f {
                        buffer.insert(&[byte]);
                    }
                }
                InputResult::Next
            }
            Some(bind_id::DONE) => InputResult::Done,
            Some(bind_id::EOF) => InputResult::Eof,
            Some(bind_id::BACKSPACE) => {
                if cursor > 0 {
                    buffer.remove(cursor - 1, cursor);
                }
                InputResult::Next
            }
            Some(bind_id::CURSOR_LEFT) => {
                buffer.set_cursor(cursor.saturating_sub(1));
                InputResult::Next
            }
            Some(bind_id::CURSOR_RIGHT) => {
                buffer.set_cursor(cursor + 1);
                InputResult::Next
            }
            Some(bind_id::CURSOR_HOME) => {
                buffer.set_cursor(0);
                InputResult::Next
            }
            Some(bind_id::CURSOR_END) => {
                buffer.set_cursor(length);
                InputResult::Next
            }
            Some(bind_id::KILL_LINE) => {
                buffer.remove(0, length);
                InputResult::Next
            }
            Some(bind_id::KILL_TO_END) => {
                buffer.remove(cursor, length);
                InputResult::Next
            }
            Some(bind_id::COMPLETE) => {
                if context.matches.match_count() > 0 {
                    InputResult::AcceptMatch(0)
                } else {
                    InputResult::Next
                }
            }
            Some(other) => {
                tracing::warn!("basic backend: unexpected binding id {other}");
                InputResult::Next
            }
        }
    }
}
