// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Blocking byte source and display sink consumed by the line editor driver.
///
/// The driver brackets every editing session with [`Self::begin`] / [`Self::end`], and
/// between updates parks in [`Self::select`] waiting for input. Implementations absorb
/// their own I/O failures (log and carry on); the one condition that must surface is
/// end-of-input, reported as `None` from [`Self::read`], which the driver latches as
/// EOF.
pub trait Terminal {
    /// Start of an editing session (eg enter raw mode).
    fn begin(&mut self);

    /// End of an editing session (eg leave raw mode).
    fn end(&mut self);

    /// Block until a byte is available. Implementations whose [`Self::read`] already
    /// blocks can make this a no-op.
    fn select(&mut self);

    /// The next input byte, or `None` once the input source is closed.
    fn read(&mut self) -> Option<u8>;

    /// Send bytes to the display.
    fn write(&mut self, bytes: &[u8]);
}
