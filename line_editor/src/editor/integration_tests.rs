// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end scenarios driving [`LineEditor`] through a scripted terminal: typed
//! bytes flow through the binder, backends, match pipeline, and accept-match applier
//! exactly as they would interactively.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use crate::{BinderView, EditorBackend, EditorContext, InlineString, InputResult,
            LineEditor, LineEditorDesc, LineState, MatchBuilder, MatchGenerator,
            TestTerminal};

/// Always handles the line, appending a fixed candidate list and counting invocations.
struct FixedGenerator {
    candidates: Vec<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl MatchGenerator for FixedGenerator {
    fn generate(&mut self, _line: &LineState, builder: &mut dyn MatchBuilder) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for candidate in &self.candidates {
            builder.add_match(candidate);
        }
        true
    }
}

/// Binds one chord and records every `on_input` call; results are scripted, defaulting
/// to [`InputResult::Next`] once the script runs out.
struct RecordingBackend {
    chord: &'static str,
    id: u8,
    results: VecDeque<InputResult>,
    calls: Arc<Mutex<Vec<(Vec<u8>, Option<u8>)>>>,
}

impl EditorBackend for RecordingBackend {
    fn bind_input(&mut self, binder: &mut BinderView<'_>) {
        binder.bind(self.chord, self.id).unwrap();
    }

    fn on_input(
        &mut self,
        keys: &[u8],
        id: Option<u8>,
        _context: &mut EditorContext<'_>,
    ) -> InputResult {
        self.calls.lock().unwrap().push((keys.to_vec(), id));
        self.results.pop_front().unwrap_or(InputResult::Next)
    }
}

fn desc_with(terminal: &TestTerminal) -> LineEditorDesc {
    LineEditorDesc {
        terminal: Some(Box::new(terminal.clone())),
        word_delims: InlineString::from_str(" "),
        partial_delims: InlineString::from_str("/\\"),
        ..LineEditorDesc::default()
    }
}

fn counting_generator(
    candidates: Vec<&'static str>,
) -> (Box<FixedGenerator>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let generator = Box::new(FixedGenerator {
        candidates,
        calls: calls.clone(),
    });
    (generator, calls)
}

#[test]
fn simple_completion_inserts_the_sorted_first_match_and_a_space() {
    let terminal = TestTerminal::with_input(b"foo\t\r");
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();
    let (generator, _) = counting_generator(vec!["foobaz", "foobar"]);
    editor.add_generator(generator);

    let line = editor.edit().unwrap();

    assert_eq!(line.as_str(), "foobar ");
    assert_eq!(editor.buffer_cursor(), 7);
}

#[test]
fn path_partial_accept_extends_the_stem_without_a_trailing_space() {
    let terminal = TestTerminal::with_input(b"c:/usr/loc\t\r");
    let mut desc = desc_with(&terminal);
    desc.partial_delims = InlineString::from_str("/\\:");
    let mut editor = LineEditor::try_new(desc).unwrap();
    let (generator, _) = counting_generator(vec!["local/"]);
    editor.add_generator(generator);

    let line = editor.edit().unwrap();

    // `local/` ends in a partial delimiter: the completed word is still partial, so no
    // closing space is added and completion can keep drilling down.
    assert_eq!(line.as_str(), "c:/usr/local/");
    assert_eq!(editor.buffer_cursor(), 13);
}

#[test]
fn accepting_inside_an_open_quote_closes_it_before_the_space() {
    let terminal = TestTerminal::with_input(b"\"hello wo\t\r");
    let mut desc = desc_with(&terminal);
    // With the space as a partial delimiter, the quoted word's stem is `hello ` and
    // the needle is `wo`.
    desc.partial_delims = InlineString::from_str(" ");
    let mut editor = LineEditor::try_new(desc).unwrap();
    let (generator, _) = counting_generator(vec!["world"]);
    editor.add_generator(generator);

    let line = editor.edit().unwrap();

    assert_eq!(line.as_str(), "\"hello world\" ");
    assert_eq!(editor.buffer_cursor(), 14);
}

#[test]
fn match_carrying_an_auto_quote_byte_is_wrapped_in_quotes() {
    let terminal = TestTerminal::with_input(b"my\t\r");
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();
    // `my file` contains the default auto-quote byte (space), so accepting it into an
    // unquoted word wraps it in the quote pair.
    let (generator, _) = counting_generator(vec!["my file"]);
    editor.add_generator(generator);

    let line = editor.edit().unwrap();

    assert_eq!(line.as_str(), "\"my file\" ");
    assert_eq!(editor.buffer_cursor(), 10);
}

#[test]
fn bound_chord_dispatches_with_accumulated_keys_and_misses_pass_through() {
    let terminal = TestTerminal::with_input(&[0x1b, b'[', b'A', 0x1b, b'Z', b'\r']);
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    editor.add_backend(Box::new(RecordingBackend {
        chord: "\\e[A",
        id: 7,
        results: VecDeque::new(),
        calls: calls.clone(),
    }));

    let line = editor.edit().unwrap();

    // The bound chord arrived as one dispatch with all three bytes.
    assert_eq!(
        calls.lock().unwrap().clone(),
        vec![(vec![0x1b, b'[', b'A'], Some(7))]
    );
    // `ESC Z` matched nothing: the default backend got it as a pass-through and
    // inserted the printable byte.
    assert_eq!(line.as_str(), "Z");
}

#[test]
fn more_input_routes_the_next_byte_straight_back_to_the_backend() {
    let terminal = TestTerminal::with_input(&[0x1b, b'[', b'A', b'b', b'\r']);
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    editor.add_backend(Box::new(RecordingBackend {
        chord: "\\e[A",
        id: 7,
        results: VecDeque::from([InputResult::MoreInput(42)]),
        calls: calls.clone(),
    }));

    editor.edit().unwrap();

    // The byte after the latch bypassed the trie and reached the same backend with
    // the sub id.
    assert_eq!(
        calls.lock().unwrap().clone(),
        vec![
            (vec![0x1b, b'[', b'A'], Some(7)),
            (vec![b'b'], Some(42)),
        ]
    );
}

#[test]
fn eof_is_latched_and_editing_is_never_re_entered() {
    let terminal = TestTerminal::with_input(b"\x04"); // ctrl-d
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    assert_eq!(editor.edit(), None);
    assert_eq!(editor.get_line(), None);
    assert_eq!(editor.edit(), None);

    // One session only: begin/end bracketed exactly once.
    assert_eq!(terminal.begin_count(), 1);
    assert_eq!(terminal.end_count(), 1);
}

#[test]
fn exhausted_input_surfaces_as_eof() {
    let terminal = TestTerminal::with_input(b"ab");
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    assert_eq!(editor.edit(), None);
    assert_eq!(terminal.end_count(), 1);
}

#[test]
fn generators_rerun_only_when_the_word_identity_changes() {
    let terminal = TestTerminal::with_input(b"ab \r");
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();
    let (generator, calls) = counting_generator(vec!["abc"]);
    editor.add_generator(generator);

    editor.edit().unwrap();

    // Once for the empty line at begin, once when the space started a new (empty) end
    // word. Typing `a` and `b` only moved the cursor within the same word identity.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn cursor_motion_reselects_without_regenerating() {
    let mut input = b"ab".to_vec();
    input.extend_from_slice(&[0x1b, b'[', b'D']); // left arrow
    input.push(b'\r');
    let terminal = TestTerminal::with_input(&input);

    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();
    let (generator, calls) = counting_generator(vec!["alpha", "abc"]);
    editor.add_generator(generator);

    editor.edit().unwrap();

    // Only the initial generation ran; the left arrow re-filtered with the shorter
    // needle (`a`), re-widening the visible matches.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(editor.visible_matches(), vec!["abc", "alpha"]);
}

#[test]
fn out_of_range_accept_match_is_silently_ignored() {
    let terminal = TestTerminal::with_input(&[0x07, b'x', b'\r']); // ctrl-g
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    editor.add_backend(Box::new(RecordingBackend {
        chord: "\\C-g",
        id: 1,
        results: VecDeque::from([InputResult::AcceptMatch(999)]),
        calls: Arc::new(Mutex::new(Vec::new())),
    }));

    let line = editor.edit().unwrap();
    assert_eq!(line.as_str(), "x");
}

#[test]
fn redraw_result_repaints_and_editing_continues() {
    let terminal = TestTerminal::with_input(&[0x0c, b'a', b'\r']); // ctrl-l
    let mut editor = LineEditor::try_new(desc_with(&terminal)).unwrap();

    editor.add_backend(Box::new(RecordingBackend {
        chord: "\\C-l",
        id: 1,
        results: VecDeque::from([InputResult::Redraw]),
        calls: Arc::new(Mutex::new(Vec::new())),
    }));

    let line = editor.edit().unwrap();
    assert_eq!(line.as_str(), "a");
    assert!(!terminal.output().is_empty());
}
