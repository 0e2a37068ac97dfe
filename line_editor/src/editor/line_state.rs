// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InlineVec, LineStorage, Word};

/// Immutable snapshot of the line under edit, handed to backends and generators.
///
/// Owns a copy of the buffer contents so it stays valid while the receiver mutates the
/// real buffer through the editor context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState {
    line: LineStorage,
    cursor: usize,
    command_offset: usize,
    words: InlineVec<Word>,
}

impl LineState {
    #[must_use]
    pub(crate) fn new(
        line: &[u8],
        cursor: usize,
        command_offset: usize,
        words: InlineVec<Word>,
    ) -> Self {
        Self {
            line: LineStorage::from_slice(line),
            cursor,
            command_offset,
            words,
        }
    }

    #[must_use]
    pub fn line(&self) -> &[u8] { &self.line }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Where the active command starts in [`Self::line`].
    #[must_use]
    pub fn command_offset(&self) -> usize { self.command_offset }

    /// The words of the active command. The last entry, when present, is the (possibly
    /// empty) end word.
    #[must_use]
    pub fn words(&self) -> &[Word] { &self.words }

    #[must_use]
    pub fn end_word(&self) -> Option<Word> { self.words.last().copied() }

    /// The text of a word. Quotes are already stripped from the word's bounds.
    #[must_use]
    pub fn word_text(&self, word: &Word) -> &[u8] {
        self.line
            .get(word.offset as usize..word.end())
            .unwrap_or(&[])
    }

    /// The end word's stem: everything up to its last partial delimiter. This is what
    /// file style generators expand (`c:/usr/` for `c:/usr/loc`).
    #[must_use]
    pub fn end_word_text(&self) -> &[u8] {
        match self.end_word() {
            Some(word) => self.word_text(&word),
            None => &[],
        }
    }

    /// The bytes between the end word's stem and the cursor, used to filter matches
    /// (`loc` for `c:/usr/loc`).
    #[must_use]
    pub fn needle(&self) -> &[u8] {
        let start = self.end_word().map_or(0, |word| word.end());
        self.line.get(start..self.cursor).unwrap_or(&[])
    }
}
