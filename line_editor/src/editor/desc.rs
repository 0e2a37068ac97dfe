// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InlineString, Terminal, DEFAULT_BINDER_CAPACITY};

/// Construction options for [`LineEditor`]. Only [`Self::terminal`] is required;
/// everything else has a sensible default.
///
/// [`LineEditor`]: super::LineEditor
#[allow(missing_debug_implementations)]
pub struct LineEditorDesc {
    /// Required: where input bytes come from and display output goes.
    pub terminal: Option<Box<dyn Terminal>>,

    /// Host shell tag passed to the default backend, for diagnostics.
    pub shell_name: InlineString,

    /// Shown at the start of the line.
    pub prompt: InlineString,

    /// Bytes that split command segments, eg `&|`. Empty means the whole line up to
    /// the cursor is one command.
    pub command_delims: InlineString,

    /// Bytes that split words, eg ` \t`.
    pub word_delims: InlineString,

    /// Bytes that subdivide a word for partial completion, eg `/\:`.
    pub partial_delims: InlineString,

    /// 1-2 byte quote pair, eg `""` (one byte opens and closes) or `()`. Empty
    /// disables quote handling.
    pub quote_pair: InlineString,

    /// Matches containing any of these bytes get their auto-quote flag set.
    pub auto_quote_chars: InlineString,

    /// Node arena capacity for the key chord binder.
    pub binder_capacity: usize,
}

impl Default for LineEditorDesc {
    fn default() -> Self {
        Self {
            terminal: None,
            shell_name: InlineString::new(),
            prompt: InlineString::new(),
            command_delims: InlineString::new(),
            word_delims: InlineString::from_str(" \t"),
            partial_delims: InlineString::new(),
            quote_pair: InlineString::from_str("\""),
            auto_quote_chars: InlineString::from_str(" "),
            binder_capacity: DEFAULT_BINDER_CAPACITY,
        }
    }
}
