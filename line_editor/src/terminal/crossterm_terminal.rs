// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Terminal`] implementation over stdin/stdout using crossterm for raw mode.
//!
//! Raw mode makes stdin deliver bytes as they are typed (no line buffering, no echo),
//! which is exactly the byte-at-a-time contract the driver needs. Reads block, so
//! [`Terminal::select`] is a no-op here.

use std::io::{Read, Stdin, Stdout, Write};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::Terminal;

#[derive(Debug)]
pub struct CrosstermTerminal {
    stdin: Stdin,
    stdout: Stdout,
    raw_mode: bool,
}

impl Default for CrosstermTerminal {
    fn default() -> Self { Self::new() }
}

impl CrosstermTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
            raw_mode: false,
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn begin(&mut self) {
        match enable_raw_mode() {
            Ok(()) => self.raw_mode = true,
            Err(error) => tracing::warn!("failed to enable raw mode: {error}"),
        }
    }

    fn end(&mut self) {
        if self.raw_mode {
            if let Err(error) = disable_raw_mode() {
                tracing::warn!("failed to disable raw mode: {error}");
            }
            self.raw_mode = false;
        }
        if let Err(error) = self.stdout.flush() {
            tracing::warn!("failed to flush stdout: {error}");
        }
    }

    fn select(&mut self) {
        // `read` blocks; nothing to wait for separately.
    }

    fn read(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.stdin.read(&mut byte) {
            Ok(0) => None,
            Ok(_) => Some(byte[0]),
            Err(error) => {
                tracing::warn!("stdin read failed: {error}");
                None
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if let Err(error) = self.stdout.write_all(bytes).and_then(|()| self.stdout.flush()) {
            tracing::warn!("stdout write failed: {error}");
        }
    }
}
