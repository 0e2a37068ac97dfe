// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Be very careful when adjusting these tuning parameters. The rule of thumb is that
//! smaller static allocation sizes are better than larger. There is a tradeoff between
//! pre-allocating large amounts of memory and allocating small amounts (on the heap) as
//! you need it.

use smallstr::SmallString;
use smallvec::SmallVec;

/// Stack allocated string storage for small strings. When this gets larger than
/// [`DEFAULT_STRING_STORAGE_SIZE`], it will be [`smallvec::SmallVec::spilled`] on the
/// heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;
pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;

/// Stack allocated list, that can [`smallvec::SmallVec::spilled`] into the heap if it
/// gets larger than [`INLINE_VEC_SIZE`].
pub type InlineVec<T> = SmallVec<[T; INLINE_VEC_SIZE]>;
pub const INLINE_VEC_SIZE: usize = 8;

/// Stack allocated byte storage for the contents of a single line being edited. A
/// typical interactive command fits without spilling; longer lines spill to the heap
/// transparently.
pub type LineStorage = SmallVec<[u8; DEFAULT_LINE_STORAGE_SIZE]>;
pub const DEFAULT_LINE_STORAGE_SIZE: usize = 64;

/// Stack allocated byte storage for a translated key chord. Real chords are a handful
/// of bytes (`ESC [ A` is three); anything longer, up to the translator's
/// [`MAX_CHORD_LEN`] cap, spills to the heap.
///
/// [`MAX_CHORD_LEN`]: crate::binder::MAX_CHORD_LEN
pub type ChordStorage = SmallVec<[u8; DEFAULT_CHORD_STORAGE_SIZE]>;
pub const DEFAULT_CHORD_STORAGE_SIZE: usize = 8;
