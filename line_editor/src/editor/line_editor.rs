// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editor driver: the main loop coupling the terminal, the binder/resolver,
//! the editing backends, and the match pipeline.
//!
//! Data flow per keystroke: read one byte → advance the resolver through the binder
//! trie → when resolved, dispatch to the owning backend (or the default backend for
//! unbound bytes) → interpret the result → redraw → refresh matches when the chord
//! completed. See [`LineEditor::edit`] for the entry point.

use miette::Diagnostic;
use thiserror::Error;

use crate::{collect_words, ok, BasicBackend, BindResolver, Binder, BinderView,
            CommonResult, CompletionKey, EditBuffer, EditorBackend, EditorContext,
            InlineString, InlineVec, InputResult, LineBuffer, LineEditorDesc, LineState,
            LineStorage, MatchGenerator, MatchPipeline, Matches, QuotePair,
            ResolvedBinding, Terminal, Word, WordBreakerConfig};

/// Capacity of the scratch that accumulates the bytes of one unresolved chord. Bytes
/// past this are dropped silently; chords are never longer than the trie is deep, so
/// this only guards against pathological bindings.
const KEY_SCRATCH_SIZE: usize = 8;

/// Construction failures for [`LineEditor::try_new`].
#[derive(Debug, Error, Diagnostic)]
pub enum LineEditorError {
    #[error("line editor construction requires a terminal")]
    MissingTerminal,
}

#[derive(Debug, Clone, Copy, Default)]
struct SessionFlags {
    /// Backends have been bound into the binder. Sticky.
    init: bool,
    /// A line is being edited (between `begin_line` and `end_line`).
    editing: bool,
    /// End of file reached. Latched: once set, no session can be re-entered.
    eof: bool,
}

/// The line editor driver. Owns the terminal, buffer, binder, match store, backends,
/// and generators for the lifetime of the session; all mutation is serial on the
/// caller's thread.
#[allow(missing_debug_implementations)]
pub struct LineEditor {
    terminal: Box<dyn Terminal>,
    buffer: EditBuffer,
    binder: Binder,
    resolver: BindResolver,
    backends: Vec<Box<dyn EditorBackend>>,
    generators: Vec<Box<dyn MatchGenerator>>,
    matches: Matches,

    words: InlineVec<Word>,
    command_offset: usize,
    keys: InlineVec<u8>,
    prev_key: CompletionKey,
    flags: SessionFlags,

    prompt: InlineString,
    command_delims: InlineString,
    word_delims: InlineString,
    partial_delims: InlineString,
    quote_pair: Option<QuotePair>,
    auto_quote_chars: InlineString,
}

impl LineEditor {
    /// Build a driver from `desc`. The default readline-style backend is always
    /// registered first, so unbound input has somewhere to go.
    ///
    /// # Errors
    ///
    /// Fails when `desc.terminal` is `None`.
    pub fn try_new(desc: LineEditorDesc) -> CommonResult<Self> {
        let LineEditorDesc {
            terminal,
            shell_name,
            prompt,
            command_delims,
            word_delims,
            partial_delims,
            quote_pair,
            auto_quote_chars,
            binder_capacity,
        } = desc;

        let Some(terminal) = terminal else {
            return Err(miette::Report::new(LineEditorError::MissingTerminal));
        };

        let default_backend: Box<dyn EditorBackend> =
            Box::new(BasicBackend::new(shell_name.as_str()));

        ok!(Self {
            terminal,
            buffer: EditBuffer::new(prompt.as_str()),
            binder: Binder::new(binder_capacity),
            resolver: BindResolver::default(),
            backends: vec![default_backend],
            generators: Vec::new(),
            matches: Matches::default(),
            words: InlineVec::new(),
            command_offset: 0,
            keys: InlineVec::new(),
            prev_key: CompletionKey::UNSET,
            flags: SessionFlags::default(),
            prompt,
            command_delims,
            word_delims,
            partial_delims,
            quote_pair: QuotePair::from_desc(quote_pair.as_str()),
            auto_quote_chars,
        })
    }

    /// Register an editing backend. Must happen before the first [`Self::edit`] call;
    /// backends added later never get their chords bound.
    pub fn add_backend(&mut self, backend: Box<dyn EditorBackend>) {
        if self.flags.init {
            tracing::warn!("backend added after initialisation will never receive bindings");
        }
        debug_assert!(self.backends.len() < usize::from(u8::MAX));
        self.backends.push(backend);
    }

    /// Register a completion candidate generator. Generators are tried in registration
    /// order; the first that reports handled wins.
    pub fn add_generator(&mut self, generator: Box<dyn MatchGenerator>) {
        self.generators.push(generator);
    }

    /// Drive the editing loop until the line is finished. Returns the finished line,
    /// or `None` on end of file.
    pub fn edit(&mut self) -> Option<InlineString> {
        // Run an update first so the init state goes through.
        while self.update() {
            self.terminal.select();
        }
        self.get_line()
    }

    /// Snapshot the current line, ending the editing session if one is active. `None`
    /// once end of file has been latched.
    pub fn get_line(&mut self) -> Option<InlineString> {
        if self.flags.editing {
            self.end_line();
        }
        if self.flags.eof {
            return None;
        }
        let text = String::from_utf8_lossy(self.buffer.get_buffer());
        Some(InlineString::from_str(&text))
    }

    /// One iteration of the edit loop. Returns whether editing continues.
    fn update(&mut self) -> bool {
        if !self.flags.init {
            self.initialise();
        }

        // End of file is latched: never re-enter editing.
        if self.flags.eof {
            return false;
        }

        if !self.flags.editing {
            self.begin_line();
            self.update_internal();
            return true;
        }

        let Some(key) = self.terminal.read() else {
            // The input source closed underneath us.
            self.flags.eof = true;
            self.end_line();
            return false;
        };
        self.record_input(key);

        if !self.resolver.is_resolved() {
            self.binder.update_resolver(key, &mut self.resolver);
        }

        self.dispatch();

        {
            let Self { buffer, terminal, .. } = self;
            buffer.draw(terminal.as_mut());
        }

        if !self.flags.editing {
            return false;
        }

        // Refresh matches only when no chord is in flight: a resolver mid-walk is
        // waiting for more bytes, and a resolver latched by `more input` is owned by a
        // backend.
        if self.resolver.is_idle() {
            self.update_internal();
        }

        true
    }

    fn initialise(&mut self) {
        for (index, backend) in self.backends.iter_mut().enumerate() {
            let mut view = BinderView::new(&mut self.binder, index as u8);
            backend.bind_input(&mut view);
        }
        self.flags.init = true;
    }

    fn begin_line(&mut self) {
        tracing::debug!("begin line");
        self.flags.editing = true;

        self.resolver.reset();
        self.command_offset = 0;
        self.keys.clear();
        self.prev_key = CompletionKey::UNSET;
        self.words.clear();
        MatchPipeline::new(&mut self.matches).reset();

        self.terminal.begin();
        self.buffer.begin_line();

        let line = self.line_state();
        {
            let Self { terminal, buffer, backends, matches, prompt, .. } = self;
            for backend in backends.iter_mut() {
                let mut context = EditorContext {
                    terminal: &mut **terminal,
                    buffer: &mut *buffer,
                    line: &line,
                    matches,
                };
                backend.on_begin_line(prompt.as_str(), &mut context);
            }
        }

        let Self { buffer, terminal, .. } = self;
        buffer.draw(terminal.as_mut());
    }

    fn end_line(&mut self) {
        tracing::debug!("end line");
        for backend in self.backends.iter_mut().rev() {
            backend.on_end_line();
        }

        self.buffer.end_line();
        self.terminal.write(b"\r\n");
        self.terminal.end();

        self.flags.editing = false;
    }

    fn record_input(&mut self, key: u8) {
        if self.keys.len() < KEY_SCRATCH_SIZE {
            self.keys.push(key);
        }
    }

    /// When the resolver has a resolution, hand the accumulated bytes to the owning
    /// backend (or the default backend for unbound bytes) and act on its result.
    fn dispatch(&mut self) {
        let Some(resolution) = self.resolver.resolution() else {
            return;
        };

        let keys = core::mem::take(&mut self.keys);

        let (backend_index, id) = match resolution {
            ResolvedBinding::Bound { backend, id } => (usize::from(backend), Some(id)),
            ResolvedBinding::Unbound => (0, None),
        };
        // Fall back to the default backend if the resolution points past the table.
        let backend_index = if backend_index < self.backends.len() {
            backend_index
        } else {
            0
        };

        let line = self.line_state();
        let result = {
            let Self { terminal, buffer, backends, matches, .. } = self;
            let mut context = EditorContext {
                terminal: &mut **terminal,
                buffer: &mut *buffer,
                line: &line,
                matches,
            };
            backends[backend_index].on_input(&keys, id, &mut context)
        };
        tracing::trace!("dispatch -> {result} (id {id:?})");

        match result {
            InputResult::Eof => {
                self.flags.eof = true;
                self.end_line();
            }
            InputResult::Done => self.end_line(),
            InputResult::AcceptMatch(index) => {
                self.accept_match(usize::from(index));
                self.resolver.reset();
            }
            InputResult::Redraw => {
                let Self { buffer, terminal, .. } = self;
                buffer.redraw(terminal.as_mut());
                self.resolver.reset();
            }
            InputResult::Next => self.resolver.reset(),
            InputResult::MoreInput(sub_id) => {
                self.resolver.latch_more_input(backend_index as u8, sub_id);
            }
        }
    }

    /// Apply the visible match at `index` to the buffer: compose the end word's stem
    /// with the match, clean it when it probes as a filesystem path, splice it over
    /// `stem_start..cursor` (opening a quote first when the match carries the
    /// auto-quote flag and the word is not already quoted), and close off completed
    /// words with the closing quote and a trailing space.
    fn accept_match(&mut self, index: usize) {
        let matched: InlineString = match self.matches.get_match(index) {
            Some(text) => InlineString::from_str(text),
            None => return,
        };
        if matched.is_empty() {
            return;
        }
        let needs_quoting = self
            .matches
            .get_info(index)
            .is_some_and(|info| info.auto_quote);
        let Some(end_word) = self.words.last().copied() else {
            return;
        };

        let word_start = end_word.offset as usize;
        let cursor = self.buffer.get_cursor();
        if word_start > cursor {
            return;
        }

        let word_end = end_word.end().min(cursor);
        let mut word =
            LineStorage::from_slice(&self.buffer.get_buffer()[word_start..word_end]);
        word.extend_from_slice(matched.as_bytes());

        // Clean the word if it is a valid file system path.
        if probes_as_path(&word) {
            word = clean_path(&word);
        }

        // A match carrying an auto-quote byte gets surrounding quotes, unless the word
        // already sits inside an open quote.
        let wrap_quote = if needs_quoting && !end_word.quoted {
            self.quote_pair
        } else {
            None
        };

        self.buffer.remove(word_start, cursor);
        self.buffer.set_cursor(word_start);
        if let Some(quote) = wrap_quote {
            self.buffer.insert(&[quote.open]);
        }
        self.buffer.insert(&word);

        // If this match doesn't make a new partial word, close it off.
        let last_byte = *matched.as_bytes().last().expect("match is non-empty");
        if !self.partial_delims.as_bytes().contains(&last_byte) {
            // Closing quote?
            if let Some(quote) = wrap_quote {
                self.buffer.insert(&[quote.close]);
            } else if word_start > 0 {
                if let Some(quote) = self.quote_pair {
                    if self.buffer.get_buffer()[word_start - 1] == quote.open {
                        self.buffer.insert(&[quote.close]);
                    }
                }
            }
            self.buffer.insert(b" ");
        }
    }

    fn line_state(&self) -> LineState {
        LineState::new(
            self.buffer.get_buffer(),
            self.buffer.get_cursor(),
            self.command_offset,
            self.words.clone(),
        )
    }

    /// Two stage match refresh, keyed on the end word and the cursor: regenerate
    /// candidates only when the end word changes identity, re-select and re-sort
    /// whenever the cursor moves within already generated results.
    fn update_internal(&mut self) {
        let config = WordBreakerConfig {
            command_delims: self.command_delims.as_bytes(),
            word_delims: self.word_delims.as_bytes(),
            partial_delims: self.partial_delims.as_bytes(),
            quote_pair: self.quote_pair,
        };
        let collected =
            collect_words(self.buffer.get_buffer(), self.buffer.get_cursor(), &config);
        self.command_offset = collected.command_offset;
        self.words = collected.words;

        let end_word = *self
            .words
            .last()
            .expect("collect_words always yields an end word");

        // Should we generate new matches?
        let next_key = CompletionKey::from_word(end_word);
        if next_key != self.prev_key.without_cursor() {
            let line = self.line_state();
            let Self { matches, generators, auto_quote_chars, .. } = self;
            let mut pipeline = MatchPipeline::new(matches);
            pipeline.reset();
            pipeline.generate(&line, generators);
            pipeline.fill_info(auto_quote_chars.as_bytes());
        }

        // Should we select and sort matches?
        let next_key = next_key.with_cursor(self.buffer.get_cursor());
        if next_key != self.prev_key {
            let cursor = self.buffer.get_cursor();
            let needle_bytes = self
                .buffer
                .get_buffer()
                .get(end_word.end()..cursor)
                .unwrap_or(&[]);
            let needle = String::from_utf8_lossy(needle_bytes).into_owned();

            {
                let mut pipeline = MatchPipeline::new(&mut self.matches);
                pipeline.select(&needle);
                pipeline.sort();
            }
            self.prev_key = next_key;

            // Tell all the backends that the matches changed.
            let line = self.line_state();
            let Self { terminal, buffer, backends, matches, .. } = self;
            for backend in backends.iter_mut() {
                let mut context = EditorContext {
                    terminal: &mut **terminal,
                    buffer: &mut *buffer,
                    line: &line,
                    matches,
                };
                backend.on_matches_changed(&mut context);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer_cursor(&self) -> usize { self.buffer.get_cursor() }

    #[cfg(test)]
    pub(crate) fn visible_matches(&self) -> Vec<String> {
        (0..self.matches.match_count())
            .map(|index| self.matches.get_match(index).unwrap().to_string())
            .collect()
    }
}

impl Drop for LineEditor {
    fn drop(&mut self) {
        // Every `begin_line` is paired with an `end_line`, on every exit path.
        if self.flags.editing {
            self.end_line();
        }
    }
}

/// Host probe: does `word` name something that exists on the filesystem?
fn probes_as_path(word: &[u8]) -> bool {
    std::str::from_utf8(word).is_ok_and(|text| std::fs::metadata(text).is_ok())
}

/// Collapse runs of `/` and `\` into the host path separator.
fn clean_path(word: &[u8]) -> LineStorage {
    let separator = std::path::MAIN_SEPARATOR as u8;
    let mut cleaned = LineStorage::new();
    let mut previous_was_separator = false;
    for &byte in word {
        let is_separator = byte == b'/' || byte == b'\\';
        if is_separator {
            if !previous_was_separator {
                cleaned.push(separator);
            }
        } else {
            cleaned.push(byte);
        }
        previous_was_separator = is_separator;
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn construction_without_a_terminal_fails() {
        let result = LineEditor::try_new(LineEditorDesc::default());
        assert!(result.is_err());
    }

    #[test]
    fn clean_path_collapses_separator_runs() {
        let separator = std::path::MAIN_SEPARATOR as u8;
        let cleaned = clean_path(b"a//b\\\\c\\/d");
        let expected: Vec<u8> =
            vec![b'a', separator, b'b', separator, b'c', separator, b'd'];
        assert_eq!(cleaned.to_vec(), expected);
    }

    #[test]
    fn clean_path_keeps_plain_words_untouched() {
        assert_eq!(clean_path(b"plain").to_vec(), b"plain".to_vec());
    }
}
