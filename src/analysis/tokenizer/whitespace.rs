//! Whitespace tokenizer implementation.

use crate::analysis::token::{TokenBuffer, TokenType};
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::analysis::tokenizer::TokenizerInput;
use crate::error::Result;

/// A tokenizer that splits text on Unicode whitespace.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    input: TokenizerInput,
}

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer {
            input: TokenizerInput::new(),
        }
    }

    fn segment(text: &str, spans: &mut Vec<(usize, usize)>) {
        // ASCII text never carries multi-byte whitespace
        if text.is_ascii() {
            let bytes = text.as_bytes();
            let mut start = None;
            for (i, b) in bytes.iter().enumerate() {
                match (b.is_ascii_whitespace(), start) {
                    (true, Some(s)) => {
                        spans.push((s, i));
                        start = None;
                    }
                    (false, None) => start = Some(i),
                    _ => {}
                }
            }
            if let Some(s) = start {
                spans.push((s, bytes.len()));
            }
        } else {
            let base = text.as_ptr() as usize;
            spans.extend(text.split_whitespace().map(|word| {
                let start = word.as_ptr() as usize - base;
                (start, start + word.len())
            }));
        }
    }
}

impl TokenStream for WhitespaceTokenizer {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.input.set_input(input);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.input.reset(self.name(), Self::segment)
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        self.input.begin(self.name())?;
        match self.input.next_span() {
            Some(span) => {
                self.input.emit(span, 1, token);
                token.set_token_type(TokenType::detect(&self.input.text()[span.start..span.end]));
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
        "whitespace"
    }
}
