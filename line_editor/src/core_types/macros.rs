// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given value in an `Ok(..)`. It is just syntactic sugar that helps having to
/// write `Ok(())` repeatedly at the end of functions that return a `Result`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
