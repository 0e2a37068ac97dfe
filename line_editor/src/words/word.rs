// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// One token of the active command, as positions into the line buffer.
///
/// Offsets are 16 bit: the line under edit is a single interactive command, and the
/// completion refresh key packs these fields into a 32 bit word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Word {
    /// Byte offset of the word in the line buffer. Excludes the opening quote when
    /// [`Self::quoted`] is set.
    pub offset: u16,
    /// Byte length of the word. The end word is truncated to its last partial
    /// delimiter; see [`collect_words`].
    ///
    /// [`collect_words`]: super::collect_words()
    pub length: u16,
    /// Whether the token began with the opening quote byte (stripped from
    /// `offset`/`length`).
    pub quoted: bool,
    /// The delimiter byte that terminated this token, or `0` at end of input.
    pub delim: u8,
}

impl Word {
    /// One past the last byte of the word.
    #[must_use]
    pub fn end(&self) -> usize { self.offset as usize + self.length as usize }
}
