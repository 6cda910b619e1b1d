//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::analysis::tokenizer::TokenizerInput;
use crate::error::{Result, StemmaError};

/// Default pattern: runs of word characters.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// A tokenizer that extracts tokens using a regular expression.
///
/// In gaps mode the text between matches becomes the tokens instead.
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
    input: TokenizerInput,
}

impl RegexTokenizer {
    /// Create a regex tokenizer with the default pattern `\w+`.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(Arc::new(compile(pattern)?), false))
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(Arc::new(compile(pattern)?), true))
    }

    /// Create a tokenizer sharing an already compiled pattern.
    pub fn from_regex(pattern: Arc<Regex>, gaps: bool) -> Self {
        RegexTokenizer {
            pattern,
            gaps,
            input: TokenizerInput::new(),
        }
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn gaps(&self) -> bool {
        self.gaps
    }
}

/// Compile a tokenizer pattern, reporting a bad pattern as an invalid argument.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| StemmaError::invalid_argument(format!("Invalid regex pattern: {e}")))
}

impl TokenStream for RegexTokenizer {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.input.set_input(input);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let pattern = Arc::clone(&self.pattern);
        let gaps = self.gaps;
        self.input.reset(self.name(), |text, spans| {
            if gaps {
                let mut last_end = 0;
                for mat in pattern.find_iter(text) {
                    if mat.start() > last_end {
                        spans.push((last_end, mat.start()));
                    }
                    last_end = mat.end();
                }
                if last_end < text.len() {
                    spans.push((last_end, text.len()));
                }
            } else {
                // empty matches carry no text
                spans.extend(
                    pattern
                        .find_iter(text)
                        .filter(|mat| !mat.is_empty())
                        .map(|mat| (mat.start(), mat.end())),
                );
            }
        })
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        self.input.begin(self.name())?;
        match self.input.next_span() {
            Some(span) => {
                self.input.emit(span, 1, token);
                Ok(true)
            }
            None => {
                self.input.exhaust(token);
                Ok(false)
            }
        }
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.input.finish(self.name(), 0, token)
    }

    fn close(&mut self) -> Result<()> {
        self.input.close();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_stream::{collect_tokens, text_input};

    #[test]
    fn test_regex_tokenizer() {
        let mut tokenizer = RegexTokenizer::new().unwrap();
        tokenizer.set_input(text_input("hello world")).unwrap();
        tokenizer.reset().unwrap();
        let output = collect_tokens(&mut tokenizer).unwrap();

        assert_eq!(output.terms(), vec!["hello", "world"]);
        assert_eq!(output.tokens[0].start_offset, 0);
        assert_eq!(output.tokens[0].end_offset, 5);
        assert_eq!(output.tokens[1].start_offset, 6);
        assert_eq!(output.tokens[1].end_offset, 11);
    }

    #[test]
    fn test_regex_tokenizer_with_gaps() {
        let mut tokenizer = RegexTokenizer::with_gaps(r"\s*,\s*").unwrap();
        tokenizer.set_input(text_input("red, green ,blue")).unwrap();
        tokenizer.reset().unwrap();
        let output = collect_tokens(&mut tokenizer).unwrap();

        assert_eq!(output.terms(), vec!["red", "green", "blue"]);
        assert_eq!(output.tokens[2].start_offset, 12);
        assert_eq!(output.final_offset, 16);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegexTokenizer::with_pattern("(unclosed").err().unwrap();
        assert!(matches!(err, StemmaError::InvalidArgument(_)));
    }

    #[test]
    fn test_custom_pattern() {
        let mut tokenizer = RegexTokenizer::with_pattern(r"\d+").unwrap();
        assert_eq!(tokenizer.pattern(), r"\d+");
        assert!(!tokenizer.gaps());

        tokenizer.set_input(text_input("a1 b22 c333")).unwrap();
        tokenizer.reset().unwrap();
        let output = collect_tokens(&mut tokenizer).unwrap();
        assert_eq!(output.terms(), vec!["1", "22", "333"]);
    }
}
