//! Lowercase filter implementation.
//!
//! This module provides a filter that converts all token text to lowercase,
//! which is essential for case-insensitive search. ASCII terms are lowered in
//! place; other terms go through a scratch buffer the filter keeps between
//! tokens, so neither path allocates once warmed up.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token_filter::lowercase::LowercaseFilter;
//! use stemma::analysis::token_stream::{collect_tokens, TokenStream, VecTokenStream};
//!
//! let mut filter = LowercaseFilter::new(VecTokenStream::from_terms(["Hello", "WORLD", "Éclair"]));
//! filter.reset().unwrap();
//!
//! let output = collect_tokens(&mut filter).unwrap();
//! assert_eq!(output.terms(), vec!["hello", "world", "éclair"]);
//! ```

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Keyword tokens are lowercased too; the flag only exempts from stemming.
/// Offsets and positions are preserved.
pub struct LowercaseFilter<S> {
    inner: S,
    scratch: String,
}

impl<S: TokenStream> LowercaseFilter<S> {
    /// Create a new lowercase filter.
    pub fn new(inner: S) -> Self {
        LowercaseFilter {
            inner,
            scratch: String::new(),
        }
    }
}

/// Lowercase a buffer's term in place, using `scratch` for non-ASCII text.
pub fn lowercase_term(token: &mut TokenBuffer, scratch: &mut String) {
    if token.term().is_ascii() {
        token.term_mut().make_ascii_lowercase();
        return;
    }
    // titlecase letters such as 'ǅ' are not uppercase but still change
    if !token.term().chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
        return;
    }
    scratch.clear();
    for c in token.term().chars() {
        scratch.extend(c.to_lowercase());
    }
    token.set_term(scratch);
}

impl<S: TokenStream> TokenStream for LowercaseFilter<S> {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.inner.set_input(input)
    }

    fn reset(&mut self) -> Result<()> {
        self.inner.reset()
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        if !self.inner.produce_next(token)? {
            return Ok(false);
        }
        lowercase_term(token, &mut self.scratch);
        Ok(true)
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.inner.finish(token)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::token_stream::{collect_tokens, VecTokenStream};

    #[test]
    fn test_lowercase_filter() {
        let inner = VecTokenStream::new(vec![
            Token::new("Hello"),
            Token::new("WORLD"),
            Token::new("Test").with_keyword(true),
            Token::new("ÉTÉ"),
            Token::new("straße"),
        ]);
        let mut filter = LowercaseFilter::new(inner);
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["hello", "world", "test", "été", "straße"]);
        assert!(output.tokens[2].keyword);
    }

    #[test]
    fn test_titlecase_letters_are_lowered() {
        let mut filter = LowercaseFilter::new(VecTokenStream::from_terms(["ǅemal", "ǈubav", "ǆ"]));
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["ǆemal", "ǉubav", "ǆ"]);
    }

    #[test]
    fn test_buffer_reuse() {
        let mut buffer = TokenBuffer::with_capacity(32);
        let mut scratch = String::new();
        buffer.clear_attributes();
        buffer.set_term("ÇA");
        lowercase_term(&mut buffer, &mut scratch);
        assert_eq!(buffer.term(), "ça");

        let capacity = buffer.capacity();
        buffer.set_term("DÉJÀ");
        lowercase_term(&mut buffer, &mut scratch);
        assert_eq!(buffer.term(), "déjà");
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new(VecTokenStream::default()).name(), "lowercase");
    }
}
