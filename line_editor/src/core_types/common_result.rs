// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Type alias to make it easy to work with [`core::result::Result`] and
/// [`miette::Report`], which wrap any [`std::error::Error`].
///
/// Works hand in hand with the typed errors in this crate ([`BindError`],
/// [`ChordError`], etc) and any other error type.
///
/// [`BindError`]: crate::BindError
/// [`ChordError`]: crate::ChordError
pub type CommonResult<T> = miette::Result<T>;
