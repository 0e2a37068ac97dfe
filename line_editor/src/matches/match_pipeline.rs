// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Orchestrates candidate generation, selection, and sorting against a [`Matches`]
//! store. The driver runs `reset` → `generate` → `fill_info` when the word under the
//! cursor changes identity, and `select` → `sort` whenever the cursor moves within the
//! already generated results.

use crate::{LineState, MatchGenerator};

use super::Matches;

#[derive(Debug)]
pub struct MatchPipeline<'a> {
    matches: &'a mut Matches,
}

impl<'a> MatchPipeline<'a> {
    #[must_use]
    pub fn new(matches: &'a mut Matches) -> Self { Self { matches } }

    pub fn reset(&mut self) { self.matches.clear(); }

    /// Invoke `generators` in registration order. Each generator appends candidates
    /// through the [`MatchBuilder`] seam and returns whether it handled the line; the
    /// pipeline stops at the first that does (first wins). When none do, the candidate
    /// set stays empty.
    ///
    /// [`MatchBuilder`]: super::MatchBuilder
    pub fn generate(
        &mut self,
        line: &LineState,
        generators: &mut [Box<dyn MatchGenerator>],
    ) {
        for generator in generators.iter_mut() {
            if generator.generate(line, self.matches) {
                break;
            }
        }
    }

    /// Retain only matches with `needle` as a case insensitive prefix.
    pub fn select(&mut self, needle: &str) { self.matches.select(needle); }

    /// Order the retained matches lexicographically, ASCII case insensitive, stable.
    pub fn sort(&mut self) { self.matches.sort_selection(); }

    /// Annotate matches that contain any of `auto_quote_chars`.
    pub fn fill_info(&mut self, auto_quote_chars: &[u8]) {
        self.matches.fill_info(auto_quote_chars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InlineVec, MatchBuilder};
    use pretty_assertions::assert_eq;

    /// Appends fixed candidates; reports handled / not handled per its config.
    struct ScriptedGenerator {
        candidates: Vec<&'static str>,
        handles: bool,
    }

    impl MatchGenerator for ScriptedGenerator {
        fn generate(&mut self, _line: &LineState, builder: &mut dyn MatchBuilder) -> bool {
            for candidate in &self.candidates {
                builder.add_match(candidate);
            }
            self.handles
        }
    }

    fn empty_line() -> LineState { LineState::new(b"", 0, 0, InlineVec::new()) }

    fn visible(matches: &Matches) -> Vec<&str> {
        (0..matches.match_count())
            .map(|index| matches.get_match(index).unwrap())
            .collect()
    }

    #[test]
    fn generation_stops_at_the_first_generator_that_handles() {
        let mut generators: Vec<Box<dyn MatchGenerator>> = vec![
            Box::new(ScriptedGenerator { candidates: vec![], handles: false }),
            Box::new(ScriptedGenerator {
                candidates: vec!["alpha", "beta"],
                handles: true,
            }),
            Box::new(ScriptedGenerator {
                candidates: vec!["never"],
                handles: true,
            }),
        ];

        let mut matches = Matches::default();
        let mut pipeline = MatchPipeline::new(&mut matches);
        pipeline.reset();
        pipeline.generate(&empty_line(), &mut generators);

        assert_eq!(visible(&matches), vec!["alpha", "beta"]);
    }

    #[test]
    fn no_generator_handling_leaves_the_set_empty() {
        let mut generators: Vec<Box<dyn MatchGenerator>> = vec![Box::new(
            ScriptedGenerator { candidates: vec![], handles: false },
        )];

        let mut matches = Matches::default();
        let mut pipeline = MatchPipeline::new(&mut matches);
        pipeline.generate(&empty_line(), &mut generators);

        assert_eq!(matches.match_count(), 0);
    }

    #[test]
    fn select_then_sort_narrows_and_orders() {
        let mut matches = Matches::default();
        for text in ["Foobaz", "foobar", "other"] {
            matches.add_match(text);
        }

        let mut pipeline = MatchPipeline::new(&mut matches);
        pipeline.select("foo");
        pipeline.sort();

        assert_eq!(visible(&matches), vec!["foobar", "Foobaz"]);
    }
}
