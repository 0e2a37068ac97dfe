// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scripted [`Terminal`] for tests: reads come from a pre-loaded byte script, writes
//! are captured. Cloning shares the underlying state, so a test can hand one clone to
//! the editor and keep another to inspect output and session bracket counts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::Terminal;

#[derive(Debug, Default)]
struct TestTerminalData {
    input: VecDeque<u8>,
    output: Vec<u8>,
    begin_count: usize,
    end_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TestTerminal {
    data: Arc<Mutex<TestTerminalData>>,
}

impl TestTerminal {
    /// A terminal whose reads will yield `bytes` then report end-of-input.
    #[must_use]
    pub fn with_input(bytes: &[u8]) -> Self {
        let terminal = Self::default();
        terminal.push_input(bytes);
        terminal
    }

    /// Append more scripted input.
    pub fn push_input(&self, bytes: &[u8]) {
        self.data.lock().unwrap().input.extend(bytes.iter().copied());
    }

    /// A copy of everything written so far.
    #[must_use]
    pub fn output(&self) -> Vec<u8> { self.data.lock().unwrap().output.clone() }

    #[must_use]
    pub fn begin_count(&self) -> usize { self.data.lock().unwrap().begin_count }

    #[must_use]
    pub fn end_count(&self) -> usize { self.data.lock().unwrap().end_count }
}

impl Terminal for TestTerminal {
    fn begin(&mut self) { self.data.lock().unwrap().begin_count += 1; }

    fn end(&mut self) { self.data.lock().unwrap().end_count += 1; }

    fn select(&mut self) {}

    fn read(&mut self) -> Option<u8> { self.data.lock().unwrap().input.pop_front() }

    fn write(&mut self, bytes: &[u8]) {
        self.data.lock().unwrap().output.extend_from_slice(bytes);
    }
}
