// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod crossterm_terminal;
pub mod terminal;
pub mod test_terminal;

// Re-export.
pub use crossterm_terminal::*;
pub use terminal::*;
pub use test_terminal::*;
