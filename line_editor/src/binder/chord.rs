// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Translates human readable key chord notation into the raw byte sequence a terminal
//! produces. The notation is a small superset of the readline `bind` syntax:
//!
//! - `\M-x`           = alt-x (`ESC` prefix)
//! - `\C-x` or `^x`   = ctrl-x
//! - `\e[A`           = `ESC [ A` (aka `CSI A`)
//! - `abc`            = abc
//!
//! Escape processing continues after `\M-`, so `\M-\C-a` translates to `{0x1B, 0x01}`.

use miette::Diagnostic;
use thiserror::Error;

use crate::{ok, ChordStorage};

/// Upper bound on the length of a translated chord. Notation that would translate to
/// more bytes than this is truncated silently.
pub const MAX_CHORD_LEN: usize = 64;

/// Ways in which chord notation can be rejected by [`translate_chord`].
#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum ChordError {
    /// Chords are sequences of bytes in `0..=127`; the high bit is reserved.
    #[error("chord notation contains non-ASCII byte 0x{0:02x}")]
    NonAscii(u8),

    #[error("`\\{0}` must be followed by `-` in chord notation")]
    MissingDash(char),

    /// `\C-` or `^` appeared at the end of the notation with no key to modify.
    #[error("control prefix is missing the key it modifies")]
    MissingControlKey,

    #[error("chord notation ends with a lone `\\`")]
    TrailingBackslash,
}

/// Translate chord notation into raw key bytes.
///
/// # Errors
///
/// Fails on non-ASCII bytes in the notation, a `\M`/`\C` not followed by `-`, a control
/// prefix with no key, or a trailing lone backslash.
pub fn translate_chord(chord: &str) -> Result<ChordStorage, ChordError> {
    let bytes = chord.as_bytes();
    if let Some(&byte) = bytes.iter().find(|byte| !byte.is_ascii()) {
        return Err(ChordError::NonAscii(byte));
    }

    let mut out = ChordStorage::new();
    let mut index = 0;
    while index < bytes.len() && out.len() < MAX_CHORD_LEN {
        match bytes[index] {
            b'^' => {
                let Some(&key) = bytes.get(index + 1) else {
                    return Err(ChordError::MissingControlKey);
                };
                out.push(key & 0x1f);
                index += 2;
            }
            b'\\' => {
                let Some(&escape) = bytes.get(index + 1) else {
                    return Err(ChordError::TrailingBackslash);
                };
                match escape {
                    b'M' => {
                        if bytes.get(index + 2) != Some(&b'-') {
                            return Err(ChordError::MissingDash('M'));
                        }
                        out.push(0x1b);
                        // The modified key is translated on the next pass, so chained
                        // notation such as `\M-\C-a` works.
                        index += 3;
                    }
                    b'C' => {
                        if bytes.get(index + 2) != Some(&b'-') {
                            return Err(ChordError::MissingDash('C'));
                        }
                        let Some(&key) = bytes.get(index + 3) else {
                            return Err(ChordError::MissingControlKey);
                        };
                        out.push(key & 0x1f);
                        index += 4;
                    }
                    // Some escape sequences for convenience.
                    b'e' => {
                        out.push(0x1b);
                        index += 2;
                    }
                    b't' => {
                        out.push(b'\t');
                        index += 2;
                    }
                    b'n' => {
                        out.push(b'\n');
                        index += 2;
                    }
                    b'r' => {
                        out.push(b'\r');
                        index += 2;
                    }
                    b'0' => {
                        out.push(0);
                        index += 2;
                    }
                    other => {
                        out.push(other);
                        index += 2;
                    }
                }
            }
            other => {
                out.push(other);
                index += 1;
            }
        }
    }

    ok!(out)
}
