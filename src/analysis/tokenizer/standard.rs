//! Standard tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29) and keeps only the
//! segments that contain a letter or digit, so punctuation and whitespace
//! never become tokens.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token_stream::{collect_tokens, text_input, TokenStream};
//! use stemma::analysis::tokenizer::standard::StandardTokenizer;
//!
//! let mut tokenizer = StandardTokenizer::new();
//! tokenizer.set_input(text_input("Hello, world! l'avion")).unwrap();
//! tokenizer.reset().unwrap();
//!
//! let output = collect_tokens(&mut tokenizer).unwrap();
//! assert_eq!(output.terms(), vec!["Hello", "world", "l'avion"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{TokenBuffer, TokenType};
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::analysis::tokenizer::TokenizerInput;
use crate::error::{Result, StemmaError};

/// Default maximum token length, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

/// Upper bound accepted for `max_token_length`.
pub const MAX_TOKEN_LENGTH_LIMIT: usize = 1024 * 1024;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Tokens longer than `max_token_length` characters are dropped and their
/// position is carried onto the next token's increment.
pub struct StandardTokenizer {
    input: TokenizerInput,
    max_token_length: usize,
    skipped_positions: u32,
}

impl StandardTokenizer {
    /// Create a standard tokenizer with the default maximum token length.
    pub fn new() -> Self {
        StandardTokenizer {
            input: TokenizerInput::new(),
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            skipped_positions: 0,
        }
    }

    /// Create a standard tokenizer with a custom maximum token length.
    pub fn with_max_token_length(max_token_length: usize) -> Result<Self> {
        if max_token_length == 0 || max_token_length > MAX_TOKEN_LENGTH_LIMIT {
            return Err(StemmaError::invalid_argument(format!(
                "max_token_length must be in 1..={MAX_TOKEN_LENGTH_LIMIT}, got {max_token_length}"
            )));
        }
        let mut tokenizer = Self::new();
        tokenizer.max_token_length = max_token_length;
        Ok(tokenizer)
    }

    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    fn segment(text: &str, spans: &mut Vec<(usize, usize)>) {
        spans.extend(
            text.split_word_bound_indices()
                .filter(|(_, segment)| segment.chars().any(char::is_alphanumeric))
                .map(|(start, segment)| (start, start + segment.len())),
        );
    }
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream for StandardTokenizer {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.input.set_input(input);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.skipped_positions = 0;
        self.input.reset(self.name(), Self::segment)
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        self.input.begin(self.name())?;
        while let Some(span) = self.input.next_span() {
            if span.char_len() > self.max_token_length {
                self.skipped_positions += 1;
                continue;
            }
            self.input.emit(span, 1 + self.skipped_positions, token);
            self.skipped_positions = 0;
            token.set_token_type(TokenType::detect(&self.input.text()[span.start..span.end]));
            return Ok(true);
        }
        self.input.exhaust(token);
        Ok(false)
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.input.finish(self.name(), self.skipped_positions, token)
    }

    fn close(&mut self) -> Result<()> {
        self.input.close();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_stream::{collect_tokens, text_input};

    fn tokenize(tokenizer: &mut StandardTokenizer, text: &str) -> crate::analysis::token_stream::StreamOutput {
        tokenizer.set_input(text_input(text)).unwrap();
        tokenizer.reset().unwrap();
        collect_tokens(tokenizer).unwrap()
    }

    #[test]
    fn test_standard_tokenizer() {
        let mut tokenizer = StandardTokenizer::new();
        let output = tokenize(&mut tokenizer, "Hello, world! Test 123.");

        assert_eq!(output.terms(), vec!["Hello", "world", "Test", "123"]);
        assert_eq!(output.increments(), vec![1, 1, 1, 1]);
        assert_eq!(output.tokens[1].start_offset, 7);
        assert_eq!(output.tokens[1].end_offset, 12);
        assert_eq!(output.tokens[3].token_type, TokenType::Num);
        assert_eq!(output.final_offset, 23);
    }

    #[test]
    fn test_character_offsets_for_non_ascii() {
        let mut tokenizer = StandardTokenizer::new();
        let output = tokenize(&mut tokenizer, "café résumé");

        assert_eq!(output.terms(), vec!["café", "résumé"]);
        assert_eq!(output.tokens[1].start_offset, 5);
        assert_eq!(output.tokens[1].end_offset, 11);
    }

    #[test]
    fn test_long_tokens_are_skipped_with_position_gap() {
        let mut tokenizer = StandardTokenizer::with_max_token_length(5).unwrap();
        let output = tokenize(&mut tokenizer, "short overlylong word");

        assert_eq!(output.terms(), vec!["short", "word"]);
        assert_eq!(output.increments(), vec![1, 2]);

        let output = tokenize(&mut tokenizer, "word overlylong");
        assert_eq!(output.terms(), vec!["word"]);
        assert_eq!(output.final_position_increment, 1);
    }

    #[test]
    fn test_invalid_max_token_length() {
        assert!(StandardTokenizer::with_max_token_length(0).is_err());
        assert!(StandardTokenizer::with_max_token_length(MAX_TOKEN_LENGTH_LIMIT + 1).is_err());
    }

    #[test]
    fn test_reuse_across_inputs() {
        let mut tokenizer = StandardTokenizer::new();
        assert_eq!(tokenize(&mut tokenizer, "first document").terms(), vec!["first", "document"]);
        assert_eq!(tokenize(&mut tokenizer, "second").terms(), vec!["second"]);
        assert!(tokenize(&mut tokenizer, "  ... ").tokens.is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(StandardTokenizer::new().name(), "standard");
    }
}
