// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The pluggable editing-command provider contract.
//!
//! A backend registers key chords during initialisation, then receives each resolved
//! chord (or unresolved pass-through) via [`EditorBackend::on_input`] together with a
//! context exposing the terminal, the line buffer, an immutable line snapshot, and the
//! current matches.

use crate::{BinderView, LineBuffer, LineState, Matches, Terminal};

/// What a backend tells the driver to do after consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InputResult {
    /// Continue; the driver resets the resolver.
    Next,
    /// Keep the resolver latched on this backend with the given sub id; the next input
    /// byte routes directly back to this backend without consulting the binder. The sub
    /// id shares the 8 bit id space with bound ids.
    MoreInput(u8),
    /// Force a full buffer redraw; the driver resets the resolver.
    Redraw,
    /// Apply the match at this index to the buffer (quoting and path aware); the driver
    /// resets the resolver. An out of range index is silently ignored.
    AcceptMatch(u16),
    /// End editing normally.
    Done,
    /// End editing and latch end-of-file: the session cannot be re-entered.
    Eof,
}

/// Everything a backend may touch while handling input. The buffer is deliberately
/// mutable here: editing commands mutate it directly rather than going through the
/// driver.
#[allow(missing_debug_implementations)]
pub struct EditorContext<'a> {
    pub terminal: &'a mut dyn Terminal,
    pub buffer: &'a mut dyn LineBuffer,
    pub line: &'a LineState,
    pub matches: &'a Matches,
}

/// A pluggable editing-command provider (cursor motion, completion keys, etc).
pub trait EditorBackend {
    /// Called once during driver initialisation; register chords by calling
    /// [`BinderView::bind`].
    fn bind_input(&mut self, binder: &mut BinderView<'_>);

    /// Start-of-line lifecycle hook.
    fn on_begin_line(&mut self, _prompt: &str, _context: &mut EditorContext<'_>) {}

    /// End-of-line lifecycle hook. Called in reverse registration order.
    fn on_end_line(&mut self) {}

    /// Observer: the visible match set changed.
    fn on_matches_changed(&mut self, _context: &mut EditorContext<'_>) {}

    /// Handle a resolved chord. `keys` holds the raw bytes consumed since the last
    /// dispatch; `id` is the binding id the backend registered, or `None` when the
    /// bytes matched no binding (pass-through, only ever seen by the default backend).
    fn on_input(
        &mut self,
        keys: &[u8],
        id: Option<u8>,
        context: &mut EditorContext<'_>,
    ) -> InputResult;
}
