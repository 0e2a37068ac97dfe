// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte level tokenizer used for both command segmentation and word splitting.
//!
//! Delimiters split the input; a quoted region (opened by the quote pair's open byte,
//! closed by its close byte) suppresses delimiters until it closes. An unterminated
//! quote runs to the end of input. Quote bytes stay part of the token text; stripping
//! them is the word collector's job.

/// A configured pair of quote bytes. When the pair is a single byte (`"`), it both
/// opens and closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub open: u8,
    pub close: u8,
}

impl QuotePair {
    /// Build from a 1-2 byte descriptor string, eg `"\"\""` or `"()"`. A single byte
    /// opens and closes; an empty descriptor means no quoting.
    #[must_use]
    pub fn from_desc(pair: &str) -> Option<Self> {
        match pair.as_bytes() {
            [] => None,
            [only] => Some(Self { open: *only, close: *only }),
            [open, close, ..] => Some(Self { open: *open, close: *close }),
        }
    }
}

/// A token yielded by [`ByteTokenizer`], as positions into its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub offset: usize,
    pub length: usize,
    /// The delimiter byte that terminated the token, or `0` at end of input.
    pub delim: u8,
}

#[derive(Debug)]
pub struct ByteTokenizer<'a> {
    input: &'a [u8],
    position: usize,
    delims: &'a [u8],
    quote_pair: Option<QuotePair>,
}

impl<'a> ByteTokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a [u8], delims: &'a [u8], quote_pair: Option<QuotePair>) -> Self {
        Self {
            input,
            position: 0,
            delims,
            quote_pair,
        }
    }
}

impl Iterator for ByteTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.position < self.input.len()
            && self.delims.contains(&self.input[self.position])
        {
            self.position += 1;
        }
        if self.position >= self.input.len() {
            return None;
        }

        let start = self.position;
        let mut in_quote = false;
        while self.position < self.input.len() {
            let byte = self.input[self.position];
            if in_quote {
                if self.quote_pair.is_some_and(|pair| pair.close == byte) {
                    in_quote = false;
                }
            } else if self.quote_pair.is_some_and(|pair| pair.open == byte) {
                in_quote = true;
            } else if self.delims.contains(&byte) {
                let token = Token {
                    offset: start,
                    length: self.position - start,
                    delim: byte,
                };
                self.position += 1;
                return Some(token);
            }
            self.position += 1;
        }

        Some(Token {
            offset: start,
            length: self.position - start,
            delim: 0,
        })
    }
}
