//! Length filter implementation.
//!
//! Keeps tokens whose term length, in characters, lies within `[min, max]`.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token_filter::length::LengthFilter;
//! use stemma::analysis::token_stream::{collect_tokens, TokenStream, VecTokenStream};
//!
//! let inner = VecTokenStream::from_terms(["a", "ab", "abcdefgh", "abc"]);
//! let mut filter = LengthFilter::new(inner, 2, 4, true).unwrap();
//! filter.reset().unwrap();
//!
//! let output = collect_tokens(&mut filter).unwrap();
//! assert_eq!(output.terms(), vec!["ab", "abc"]);
//! assert_eq!(output.increments(), vec![2, 2]);
//! ```

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_filter::filtering::{finish_with_skipped, next_accepted, SkippedPositions};
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::{Result, StemmaError};

/// A filter that drops tokens shorter than `min` or longer than `max`
/// characters.
///
/// With `preserve_increments`, a surviving token's position increment also
/// counts the increments of every token dropped before it, so absolute
/// positions match the unfiltered stream. Without it (legacy behaviour),
/// every survivor reports an increment of 1 and dropped positions are lost.
pub struct LengthFilter<S> {
    inner: S,
    min: usize,
    max: usize,
    skipped: SkippedPositions,
}

impl<S: TokenStream> LengthFilter<S> {
    /// Create a length filter. Fails if `min > max`.
    pub fn new(inner: S, min: usize, max: usize, preserve_increments: bool) -> Result<Self> {
        if min > max {
            return Err(StemmaError::invalid_argument(format!(
                "length filter: min ({min}) must not be greater than max ({max})"
            )));
        }
        Ok(LengthFilter {
            inner,
            min,
            max,
            skipped: SkippedPositions::new(preserve_increments),
        })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn preserves_increments(&self) -> bool {
        self.skipped.preserves()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TokenStream> TokenStream for LengthFilter<S> {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.inner.set_input(input)
    }

    fn reset(&mut self) -> Result<()> {
        self.skipped.reset();
        self.inner.reset()
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        let (min, max) = (self.min, self.max);
        next_accepted(&mut self.inner, token, &mut self.skipped, |t| {
            let len = t.term_char_len();
            min <= len && len <= max
        })
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        finish_with_skipped(&mut self.inner, token, &mut self.skipped)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::token_stream::{collect_tokens, VecTokenStream};

    const TERMS: [&str; 7] = ["short", "toolong", "evenmuchlongertext", "a", "ab", "toolong", "foo"];

    fn run(filter: &mut LengthFilter<VecTokenStream>) -> crate::analysis::token_stream::StreamOutput {
        filter.reset().unwrap();
        collect_tokens(filter).unwrap()
    }

    #[test]
    fn test_legacy_mode() {
        let mut filter = LengthFilter::new(VecTokenStream::from_terms(TERMS), 2, 6, false).unwrap();
        let output = run(&mut filter);

        assert_eq!(output.terms(), vec!["short", "ab", "foo"]);
        assert_eq!(output.increments(), vec![1, 1, 1]);
    }

    #[test]
    fn test_preserving_mode() {
        let mut filter = LengthFilter::new(VecTokenStream::from_terms(TERMS), 2, 6, true).unwrap();
        let output = run(&mut filter);

        assert_eq!(output.terms(), vec!["short", "ab", "foo"]);
        assert_eq!(output.increments(), vec![1, 4, 2]);
    }

    #[test]
    fn test_legacy_mode_reports_unit_increments() {
        let inner = VecTokenStream::new(vec![
            Token::new("ab"),
            Token::new("x"),
            Token::new("cd").with_position_increment(3),
        ]);
        let mut filter = LengthFilter::new(inner, 2, 6, false).unwrap();
        let output = run(&mut filter);

        assert_eq!(output.terms(), vec!["ab", "cd"]);
        assert_eq!(output.increments(), vec![1, 1]);
    }

    #[test]
    fn test_legacy_mode_lifts_stacked_first_token() {
        let inner = VecTokenStream::new(vec![Token::new("x"), Token::new("cd").with_position_increment(0)]);
        let mut filter = LengthFilter::new(inner, 2, 6, false).unwrap();
        let output = run(&mut filter);

        assert_eq!(output.terms(), vec!["cd"]);
        assert_eq!(output.increments(), vec![1]);
        assert_eq!(output.final_position_increment, 0);
    }

    #[test]
    fn test_preserving_mode_adds_to_upstream_increments() {
        let inner = VecTokenStream::new(vec![
            Token::new("ab"),
            Token::new("x"),
            Token::new("cd").with_position_increment(3),
        ]);
        let mut filter = LengthFilter::new(inner, 2, 6, true).unwrap();
        assert_eq!(run(&mut filter).increments(), vec![1, 4]);
    }

    #[test]
    fn test_trailing_skips_reach_finish() {
        let inner = VecTokenStream::from_terms(["keep", "x", "y"]);
        let mut filter = LengthFilter::new(inner, 2, 10, true).unwrap();
        let output = run(&mut filter);

        assert_eq!(output.terms(), vec!["keep"]);
        assert_eq!(output.final_position_increment, 2);
    }

    #[test]
    fn test_length_counts_characters() {
        let inner = VecTokenStream::new(vec![Token::new("été"), Token::new("étaient")]);
        let mut filter = LengthFilter::new(inner, 0, 3, false).unwrap();
        assert_eq!(run(&mut filter).terms(), vec!["été"]);
    }

    #[test]
    fn test_zero_length_term_within_bounds() {
        let inner = VecTokenStream::new(vec![Token::new("")]);
        let mut filter = LengthFilter::new(inner, 0, 5, false).unwrap();
        assert_eq!(run(&mut filter).terms(), vec![""]);
    }

    #[test]
    fn test_min_greater_than_max_is_rejected() {
        let err = LengthFilter::new(VecTokenStream::default(), 5, 2, false).err().unwrap();
        assert!(matches!(err, StemmaError::InvalidArgument(_)));
        assert!(err.to_string().contains("min (5)"));
    }

    #[test]
    fn test_reset_clears_pending_skips() {
        let mut filter = LengthFilter::new(VecTokenStream::from_terms(["x", "keep"]), 2, 10, true).unwrap();
        let mut buffer = TokenBuffer::new();

        // stop after the first token, leaving nothing pending
        filter.reset().unwrap();
        assert!(filter.produce_next(&mut buffer).unwrap());
        assert_eq!(buffer.position_increment(), 2);

        let output = run(&mut filter);
        assert_eq!(output.increments(), vec![2]);
    }
}
