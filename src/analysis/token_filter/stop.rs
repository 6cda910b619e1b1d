//! Stop filter implementation.
//!
//! This module provides a filter that removes common words (stop words) that
//! typically don't contribute to search relevance. Positions of removed words
//! are kept: their increments move onto the next surviving token.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::char_array_set::CharArraySet;
//! use stemma::analysis::token_filter::stop::StopFilter;
//! use stemma::analysis::token_stream::{collect_tokens, TokenStream, VecTokenStream};
//! use std::sync::Arc;
//!
//! let stop_words = Arc::new(CharArraySet::from_words(["the", "a"], false).unmodifiable());
//! let inner = VecTokenStream::from_terms(["the", "quick", "a", "fox"]);
//! let mut filter = StopFilter::new(inner, stop_words);
//! filter.reset().unwrap();
//!
//! let output = collect_tokens(&mut filter).unwrap();
//! assert_eq!(output.terms(), vec!["quick", "fox"]);
//! assert_eq!(output.increments(), vec![2, 2]);
//! ```

use std::sync::Arc;

use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token::TokenBuffer;
use crate::analysis::token_filter::filtering::{finish_with_skipped, next_accepted, SkippedPositions};
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

/// A filter that removes stop words from the token stream.
///
/// Case sensitivity follows the set: build it with `ignore_case` to match
/// regardless of case.
pub struct StopFilter<S> {
    inner: S,
    /// The set of stop words to remove
    stop_words: Arc<CharArraySet>,
    skipped: SkippedPositions,
}

impl<S: TokenStream> StopFilter<S> {
    /// Create a new stop filter over the given set.
    pub fn new(inner: S, stop_words: Arc<CharArraySet>) -> Self {
        StopFilter {
            inner,
            stop_words,
            skipped: SkippedPositions::new(true),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the stop word set.
    pub fn stop_words(&self) -> &Arc<CharArraySet> {
        &self.stop_words
    }
}

impl<S: TokenStream> TokenStream for StopFilter<S> {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.inner.set_input(input)
    }

    fn reset(&mut self) -> Result<()> {
        self.skipped.reset();
        self.inner.reset()
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        let stop_words = &self.stop_words;
        next_accepted(&mut self.inner, token, &mut self.skipped, |t| {
            !stop_words.contains(t.term())
        })
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        finish_with_skipped(&mut self.inner, token, &mut self.skipped)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
