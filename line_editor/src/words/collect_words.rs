// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Splits the line buffer up to the cursor into the active command and its words.
//!
//! The pipeline is: find the active command segment (the last one that reaches the
//! cursor), tokenize it into words, append an empty end word when the cursor sits past
//! the last token, strip quotes, and finally truncate the end word to its last partial
//! delimiter. After that truncation the end word is the *stem* completion operates on
//! (`c:/usr/` for `c:/usr/loc`) and the bytes between the stem and the cursor are the
//! needle used to filter matches.

use crate::InlineVec;

use super::{ByteTokenizer, QuotePair, Word};

/// Delimiter configuration for [`collect_words`], borrowed from the editor desc.
#[derive(Debug, Clone, Copy)]
pub struct WordBreakerConfig<'a> {
    /// Bytes that split command segments (eg `&|`). Empty means the whole line up to
    /// the cursor is one command.
    pub command_delims: &'a [u8],
    /// Bytes that split words (eg ` \t`).
    pub word_delims: &'a [u8],
    /// Bytes that subdivide a word for partial completion (eg `/\:`).
    pub partial_delims: &'a [u8],
    pub quote_pair: Option<QuotePair>,
}

/// Result of [`collect_words`]: where the active command starts, and its words. The
/// word list always ends with the (possibly empty) end word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedWords {
    pub command_offset: usize,
    pub words: InlineVec<Word>,
}

/// Find the active command segment in `buffer[..cursor]`. The last segment that ends
/// exactly at the cursor is active; a trailing separator means an empty command at the
/// cursor.
fn find_command_bounds(
    buffer: &[u8],
    cursor: usize,
    config: &WordBreakerConfig<'_>,
) -> (usize, usize) {
    let (mut start, mut length) = (0, cursor);

    if !config.command_delims.is_empty() {
        let tokenizer =
            ByteTokenizer::new(&buffer[..cursor], config.command_delims, config.quote_pair);
        for token in tokenizer {
            start = token.offset;
            length = token.length;
        }
    }

    if start + length == cursor {
        (start, length)
    } else {
        (cursor, 0)
    }
}

/// Tokenize the active command into [`Word`]s. See the [module docs](self) for the
/// stages involved.
#[must_use]
pub fn collect_words(
    buffer: &[u8],
    cursor: usize,
    config: &WordBreakerConfig<'_>,
) -> CollectedWords {
    let (command_start, command_length) = find_command_bounds(buffer, cursor, config);

    let mut words: InlineVec<Word> = InlineVec::new();
    let command = &buffer[command_start..command_start + command_length];
    for token in ByteTokenizer::new(command, config.word_delims, config.quote_pair) {
        words.push(Word {
            offset: (command_start + token.offset) as u16,
            length: token.length as u16,
            quoted: false,
            delim: token.delim,
        });
    }

    // Add an empty word if the cursor is at the beginning of one.
    let cursor_past_last_word = match words.last() {
        Some(last) => last.end() < cursor,
        None => true,
    };
    if cursor_past_last_word {
        words.push(Word {
            offset: cursor as u16,
            length: 0,
            quoted: false,
            delim: 0,
        });
    }

    // Adjust for quotes.
    if let Some(quote) = config.quote_pair {
        for word in words.iter_mut() {
            if word.length == 0 {
                continue;
            }
            let start = word.offset as usize;
            let start_quoted = buffer[start] == quote.open;
            let end_quoted =
                word.length > 1 && buffer[start + word.length as usize - 1] == quote.open;
            if start_quoted {
                word.offset += 1;
                word.quoted = true;
            }
            word.length -= u16::from(start_quoted) + u16::from(end_quoted);
        }
    }

    // Truncate the end word to one past its last partial delimiter (or to nothing),
    // leaving the stem the match generators expand.
    if let Some(end_word) = words.last_mut() {
        let start = end_word.offset as usize;
        let mut partial = 0;
        for index in (0..end_word.length as usize).rev() {
            if config.partial_delims.contains(&buffer[start + index]) {
                partial = index + 1;
                break;
            }
        }
        end_word.length = partial as u16;
    }

    CollectedWords {
        command_offset: command_start,
        words,
    }
}
