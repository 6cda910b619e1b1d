//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the sources of a chain: they read a character input and
//! emit tokens into the shared buffer. Each tokenizer is reused across
//! documents by binding a new input with `set_input` and calling `reset`.
//!
//! # Available Tokenizers
//!
//! - [`standard::StandardTokenizer`] - Unicode word boundaries (UAX #29)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`whole::WholeTokenizer`] - Treats the entire input as a single token
//! - [`regex::RegexTokenizer`] - Regex matches, or the gaps between them
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token_stream::{collect_tokens, text_input, TokenStream};
//! use stemma::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let mut tokenizer = WhitespaceTokenizer::new();
//! tokenizer.set_input(text_input("Hello world")).unwrap();
//! tokenizer.reset().unwrap();
//!
//! let output = collect_tokens(&mut tokenizer).unwrap();
//! assert_eq!(output.terms(), vec!["Hello", "world"]);
//! ```

use std::io::Read;

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, StreamState};
use crate::error::{Result, StemmaError};

pub mod regex;
pub mod standard;
pub mod whitespace;
pub mod whole;

pub use self::regex::RegexTokenizer;
pub use standard::StandardTokenizer;
pub use whitespace::WhitespaceTokenizer;
pub use whole::WholeTokenizer;

/// A token candidate located in the input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Byte range in the input text.
    pub start: usize,
    pub end: usize,
    /// Character range in the input text.
    pub char_start: usize,
    pub char_end: usize,
}

impl Span {
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }
}

/// Input handling shared by the tokenizers.
///
/// Holds the pending input, the text of the current input (its allocation is
/// reused across documents), the byte spans a tokenizer segmented it into,
/// and the protocol state.
#[derive(Default)]
pub struct TokenizerInput {
    pending: Option<CharInput>,
    text: String,
    spans: Vec<(usize, usize)>,
    next_span: usize,
    byte_cursor: usize,
    char_cursor: usize,
    final_offset: usize,
    state: StreamState,
}

impl TokenizerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a new input; read on the next `reset`.
    pub fn set_input(&mut self, input: CharInput) {
        self.pending = Some(input);
    }

    /// Read the pending input and rewind. `segment` fills the byte spans of
    /// the candidate tokens, in order.
    pub fn reset<F>(&mut self, stage: &str, segment: F) -> Result<()>
    where
        F: FnOnce(&str, &mut Vec<(usize, usize)>),
    {
        let mut input = self.pending.take().ok_or_else(|| {
            StemmaError::illegal_state(format!(
                "{stage}: reset() called without an input; call set_input() first"
            ))
        })?;

        self.text.clear();
        input.read_to_string(&mut self.text)?;

        self.spans.clear();
        segment(&self.text, &mut self.spans);
        self.next_span = 0;
        self.byte_cursor = 0;
        self.char_cursor = 0;
        self.final_offset = self.text.chars().count();
        self.state = StreamState::Active;
        Ok(())
    }

    /// Text of the current input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fail unless `produce_next` is allowed right now.
    pub fn begin(&self, stage: &str) -> Result<()> {
        self.state.check_produce(stage)
    }

    /// Next candidate span with its character offsets.
    pub fn next_span(&mut self) -> Option<Span> {
        let (start, end) = *self.spans.get(self.next_span)?;
        self.next_span += 1;

        self.char_cursor += self.text[self.byte_cursor..start].chars().count();
        let char_start = self.char_cursor;
        self.char_cursor += self.text[start..end].chars().count();
        self.byte_cursor = end;

        Some(Span {
            start,
            end,
            char_start,
            char_end: self.char_cursor,
        })
    }

    /// Write a span into the buffer as a fresh token with the given increment.
    pub fn emit(&self, span: Span, increment: u32, token: &mut TokenBuffer) {
        token.clear_attributes();
        token.set_term(&self.text[span.start..span.end]);
        token.set_offsets(span.char_start, span.char_end);
        token.set_position_increment(increment);
    }

    /// Mark the input exhausted and invalidate the buffer.
    pub fn exhaust(&mut self, token: &mut TokenBuffer) {
        self.state = StreamState::Exhausted;
        token.invalidate();
    }

    /// Write the end-of-stream state: both offsets at the end of the input
    /// and the given trailing increment.
    ///
    /// The whole input is read at `reset`, so the final offset is the true
    /// end of input even when the consumer stopped pulling early.
    pub fn finish(&self, stage: &str, trailing_increment: u32, token: &mut TokenBuffer) -> Result<()> {
        self.state.check_finish(stage)?;
        token.clear_attributes();
        token.set_offsets(self.final_offset, self.final_offset);
        token.set_position_increment(trailing_increment);
        Ok(())
    }

    /// Drop the input and its text.
    pub fn close(&mut self) {
        self.pending = None;
        self.text.clear();
        self.spans.clear();
        self.state = StreamState::Closed;
    }
}
