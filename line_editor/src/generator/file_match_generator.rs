// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Completion candidates from the filesystem.
//!
//! The end word (after partial-delimiter truncation) is the directory stem to expand:
//! for `c:/usr/loc` the stem is `c:/usr/` and this generator lists that directory. The
//! pipeline's select stage narrows the listing against the needle (`loc`), so no
//! filtering happens here. Candidate names are relative to the stem, which is exactly
//! what the accept-match applier composes back into the buffer; directories get a
//! trailing path separator so accepting one keeps completion going.

use std::fs;
use std::path::Path;

use crate::{LineState, MatchBuilder, MatchGenerator};

#[derive(Debug, Clone, Copy)]
pub struct FileMatchGenerator {
    /// Include dot files in generated lists.
    pub include_hidden: bool,
}

impl Default for FileMatchGenerator {
    fn default() -> Self {
        Self {
            include_hidden: true,
        }
    }
}

impl MatchGenerator for FileMatchGenerator {
    fn generate(&mut self, line: &LineState, builder: &mut dyn MatchBuilder) -> bool {
        let stem = String::from_utf8_lossy(line.end_word_text());
        let directory = if stem.is_empty() {
            Path::new(".")
        } else {
            Path::new(stem.as_ref())
        };

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!("no file matches under {directory:?}: {error}");
                return true;
            }
        };

        for entry in entries.flatten() {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if !self.include_hidden && name.starts_with('.') {
                continue;
            }
            if entry.file_type().is_ok_and(|file_type| file_type.is_dir()) {
                name.push(std::path::MAIN_SEPARATOR);
            }
            builder.add_match(&name);
        }

        true
    }
}
