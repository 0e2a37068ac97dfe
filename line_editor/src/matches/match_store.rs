// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Holds the current completion candidate set together with its filter and sort state.
//!
//! The store keeps every candidate the generators produced for the current word, plus a
//! *selection*: the subset (in display order) that survives the current needle. Keeping
//! the full set around is what lets a shrinking needle (backspace) re-widen the visible
//! matches without re-running the generators.

use crate::InlineString;

/// Per-match metadata computed by the pipeline's `fill_info` stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchInfo {
    /// The match contains at least one configured auto-quote byte. On accept, such a
    /// match is wrapped in the quote pair unless the word it completes is already
    /// quoted.
    pub auto_quote: bool,
}

#[derive(Debug, Clone)]
struct MatchEntry {
    text: InlineString,
    info: MatchInfo,
}

/// Completion candidate store. Grows on demand; cleared whenever the word under the
/// cursor changes identity.
#[derive(Debug, Default)]
pub struct Matches {
    entries: Vec<MatchEntry>,
    /// Indices into `entries` for the currently visible matches, in display order.
    selection: Vec<u32>,
}

impl Matches {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selection.clear();
    }

    /// Number of visible (selected) matches.
    #[must_use]
    pub fn match_count(&self) -> usize { self.selection.len() }

    /// The visible match at `index`, if any.
    #[must_use]
    pub fn get_match(&self, index: usize) -> Option<&str> {
        let entry_index = *self.selection.get(index)?;
        Some(self.entries[entry_index as usize].text.as_str())
    }

    /// Metadata for the visible match at `index`, if any.
    #[must_use]
    pub fn get_info(&self, index: usize) -> Option<MatchInfo> {
        let entry_index = *self.selection.get(index)?;
        Some(self.entries[entry_index as usize].info)
    }

    pub(crate) fn add_entry(&mut self, text: &str) {
        self.selection.push(self.entries.len() as u32);
        self.entries.push(MatchEntry {
            text: InlineString::from_str(text),
            info: MatchInfo::default(),
        });
    }

    /// Rebuild the selection: every candidate with `needle` as a case insensitive
    /// prefix (byte-wise ASCII fold), in generation order.
    pub(crate) fn select(&mut self, needle: &str) {
        let needle = needle.as_bytes();
        self.selection.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            let starts_with_needle = entry
                .text
                .as_bytes()
                .get(..needle.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(needle));
            if starts_with_needle {
                self.selection.push(index as u32);
            }
        }
    }

    /// Sort the selection lexicographically ascending, ASCII case insensitive. The sort
    /// is stable: candidates equal under the fold keep their generation order.
    pub(crate) fn sort_selection(&mut self) {
        let entries = &self.entries;
        self.selection.sort_by(|&left, &right| {
            let left = entries[left as usize].text.as_bytes();
            let right = entries[right as usize].text.as_bytes();
            let left = left.iter().map(u8::to_ascii_lowercase);
            let right = right.iter().map(u8::to_ascii_lowercase);
            left.cmp(right)
        });
    }

    /// Annotate every candidate with whether it contains any of `auto_quote_chars`.
    pub(crate) fn fill_info(&mut self, auto_quote_chars: &[u8]) {
        for entry in &mut self.entries {
            entry.info.auto_quote = entry
                .text
                .as_bytes()
                .iter()
                .any(|byte| auto_quote_chars.contains(byte));
        }
    }
}
