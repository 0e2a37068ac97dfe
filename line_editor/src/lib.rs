// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Synchronous line editing engine
//!
//! This crate is the core of an interactive command line input library: it ingests raw
//! terminal key events one byte at a time, matches them against a trie of configured
//! key chords, dispatches resolved bindings to pluggable editing backends, collects
//! completion candidates from pluggable generators, and applies accepted completions
//! back into the line buffer with quoting and path aware cleanup.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Architecture](#architecture)
//! - [How to use this crate](#how-to-use-this-crate)
//! - [Concurrency model](#concurrency-model)
//!
//! <!-- /TOC -->
//!
//! # Architecture
//!
//! Three mechanisms compose per keystroke:
//!
//! 1. The **binder** ([`Binder`]): a packed trie keyed by byte sequences written in
//!    escape notation (`\M-x`, `\C-x`, `^x`, `\e[…`), shared by every backend. A
//!    per-session [`BindResolver`] walks it as bytes arrive, supporting chords of any
//!    length.
//! 2. The **dispatch loop** ([`LineEditor`]): couples the resolver to the registered
//!    [`EditorBackend`]s. A backend consumes the chord and answers with an
//!    [`InputResult`]: continue, request more input, force a redraw, accept a
//!    completion match, or terminate editing.
//! 3. The **match pipeline** ([`MatchPipeline`] over [`Matches`]): re-runs the
//!    registered [`MatchGenerator`]s when the word under the cursor changes identity,
//!    then filters and sorts the candidates against the needle as the cursor moves.
//!
//! # How to use this crate
//!
//! ```no_run
//! use r3bl_line_editor::{CrosstermTerminal, FileMatchGenerator, InlineString,
//!                        LineEditor, LineEditorDesc};
//!
//! let desc = LineEditorDesc {
//!     terminal: Some(Box::new(CrosstermTerminal::new())),
//!     prompt: InlineString::from_str("> "),
//!     word_delims: InlineString::from_str(" \t"),
//!     partial_delims: InlineString::from_str("/\\"),
//!     ..LineEditorDesc::default()
//! };
//! let mut editor = LineEditor::try_new(desc).expect("terminal is set");
//! editor.add_generator(Box::new(FileMatchGenerator::default()));
//!
//! while let Some(line) = editor.edit() {
//!     println!("got: {line}");
//! }
//! ```
//!
//! # Concurrency model
//!
//! The engine is strictly single threaded and synchronous. The one suspension point is
//! the blocking byte read from the [`Terminal`]; every structure is owned by the driver
//! and mutated serially on the caller's thread. Closing the terminal surfaces as end of
//! file, which is latched: no editing session can be re-entered afterwards.

// Attach.
pub mod backend;
pub mod binder;
pub mod buffer;
pub mod core_types;
pub mod editor;
pub mod generator;
pub mod matches;
pub mod terminal;
pub mod words;

// Re-export.
pub use backend::*;
pub use binder::*;
pub use buffer::*;
pub use core_types::*;
pub use editor::*;
pub use generator::*;
pub use matches::*;
pub use terminal::*;
pub use words::*;
