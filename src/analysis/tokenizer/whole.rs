//! Whole tokenizer implementation.

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::analysis::tokenizer::TokenizerInput;
use crate::error::Result;

/// A tokenizer that treats the entire input as a single token.
///
/// This is useful for ID fields or other cases where you don't want to split the text.
/// An empty input still yields one (empty) token.
#[derive(Default)]
pub struct WholeTokenizer {
    input: TokenizerInput,
}

impl WholeTokenizer {
    /// Create a new whole tokenizer.
    pub fn new() -> Self {
        WholeTokenizer {
            input: TokenizerInput::new(),
        }
    }
}

impl TokenStream for WholeTokenizer {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.input.set_input(input);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.input
            .reset(self.name(), |text, spans| spans.push((0, text.len())))
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
        "whole"
    }
}
