//! The token stream protocol shared by every tokenizer and filter.
//!
//! A chain is driven by pulling: the caller owns one [`TokenBuffer`] and
//! lends it to the outermost stage on each call.
//!
//! ```text
//! set_input(input) → reset() → produce_next()* → false → finish() → close()
//! ```
//!
//! Filters own their inner stream and forward `set_input`, `reset`, `finish`
//! and `close`; only `produce_next` (and `finish`, for filters that track
//! skipped positions) carries their own logic.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token::{Token, TokenBuffer};
//! use stemma::analysis::token_stream::{TokenStream, VecTokenStream};
//!
//! let mut stream = VecTokenStream::new(vec![Token::new("hello"), Token::new("world")]);
//! let mut buffer = TokenBuffer::new();
//!
//! stream.reset().unwrap();
//! let mut terms = Vec::new();
//! while stream.produce_next(&mut buffer).unwrap() {
//!     terms.push(buffer.term().to_string());
//! }
//! stream.finish(&mut buffer).unwrap();
//! stream.close().unwrap();
//!
//! assert_eq!(terms, vec!["hello", "world"]);
//! ```

use std::io::{Cursor, Read};

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenBuffer};
use crate::error::{Result, StemmaError};

/// A character input a tokenizer reads from.
pub type CharInput = Box<dyn Read + Send>;

/// Wrap an in-memory text as a [`CharInput`].
pub fn text_input<S: Into<String>>(text: S) -> CharInput {
    Box::new(Cursor::new(text.into()))
}

/// The lifecycle every analysis stage implements.
pub trait TokenStream {
    /// Bind a new character input. Takes effect on the next [`reset`](Self::reset).
    fn set_input(&mut self, input: CharInput) -> Result<()>;

    /// Reinitialize stage-local state. Required before first use and before reuse.
    fn reset(&mut self) -> Result<()>;

    /// Advance `token` to the next token.
    ///
    /// Returns `Ok(false)` when the stream is exhausted; the buffer is then
    /// invalid until the next successful call after a `reset`.
    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool>;

    /// Called once after the last `produce_next`. Leaves the final offsets and
    /// the position increment of trailing skipped tokens in `token`.
    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()>;

    /// Release the bound input. Idempotent.
    fn close(&mut self) -> Result<()>;

    /// Name of this stage (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A boxed, sendable token stream; the form analyzers hand out.
pub type BoxTokenStream = Box<dyn TokenStream + Send>;

impl<T: TokenStream + ?Sized> TokenStream for Box<T> {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        (**self).set_input(input)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        (**self).produce_next(token)
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        (**self).finish(token)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Protocol state tracked by sources so misuse is reported instead of
/// silently producing garbage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamState {
    /// Constructed, never reset.
    #[default]
    Created,
    /// Reset and producing tokens.
    Active,
    /// `produce_next` returned false.
    Exhausted,
    /// Closed; must be given a new input and reset before reuse.
    Closed,
}

impl StreamState {
    /// Check that `produce_next` may be called.
    pub fn check_produce(self, stage: &str) -> Result<()> {
        match self {
            StreamState::Active => Ok(()),
            StreamState::Created => Err(StemmaError::illegal_state(format!(
                "{stage}: produce_next() called before reset()"
            ))),
            StreamState::Exhausted => Err(StemmaError::illegal_state(format!(
                "{stage}: produce_next() called again after returning false without reset()"
            ))),
            StreamState::Closed => Err(StemmaError::illegal_state(format!(
                "{stage}: produce_next() called on a closed stream"
            ))),
        }
    }

    /// Check that `finish` may be called.
    pub fn check_finish(self, stage: &str) -> Result<()> {
        match self {
            StreamState::Active | StreamState::Exhausted => Ok(()),
            StreamState::Created => Err(StemmaError::illegal_state(format!(
                "{stage}: finish() called before reset()"
            ))),
            StreamState::Closed => Err(StemmaError::illegal_state(format!(
                "{stage}: finish() called on a closed stream"
            ))),
        }
    }
}

/// Everything a full run of a chain produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOutput {
    /// Emitted tokens, in order.
    pub tokens: Vec<Token>,
    /// End character offset reported by `finish`.
    pub final_offset: usize,
    /// Position increment reported by `finish` (positions skipped after the
    /// last emitted token).
    pub final_position_increment: u32,
}

impl StreamOutput {
    /// Terms of the emitted tokens.
    pub fn terms(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Position increments of the emitted tokens.
    pub fn increments(&self) -> Vec<u32> {
        self.tokens.iter().map(|t| t.position_increment).collect()
    }
}

/// Drive a reset stream to exhaustion, then `finish` and `close` it.
pub fn collect_tokens<S: TokenStream + ?Sized>(stream: &mut S) -> Result<StreamOutput> {
    let mut buffer = TokenBuffer::new();
    let mut tokens = Vec::new();
    while stream.produce_next(&mut buffer)? {
        tokens.push(buffer.to_token());
    }
    stream.finish(&mut buffer)?;
    let output = StreamOutput {
        tokens,
        final_offset: buffer.end_offset(),
        final_position_increment: buffer.position_increment(),
    };
    stream.close()?;
    Ok(output)
}

/// A source replaying pre-built tokens.
///
/// Used to feed filters directly and to observe how far a filter pulls from
/// its inner stream ([`pulls`](Self::pulls), [`reached_end`](Self::reached_end)).
#[derive(Clone, Debug, Default)]
pub struct VecTokenStream {
    tokens: Vec<Token>,
    next: usize,
    pulls: usize,
    reached_end: bool,
    final_offset: usize,
    state: StreamState,
}

impl VecTokenStream {
    /// Create a stream over the given tokens. The final offset is the largest
    /// end offset among them.
    pub fn new(tokens: Vec<Token>) -> Self {
        let final_offset = tokens.iter().map(|t| t.end_offset).max().unwrap_or(0);
        VecTokenStream {
            tokens,
            next: 0,
            pulls: 0,
            reached_end: false,
            final_offset,
            state: StreamState::Created,
        }
    }

    /// Create a stream of plain terms, each with increment 1.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut offset = 0;
        let tokens = terms
            .into_iter()
            .map(|term| {
                let text: String = term.into();
                let len = text.chars().count();
                let token = Token::with_offsets(text, offset, offset + len);
                offset += len + 1;
                token
            })
            .collect();
        Self::new(tokens)
    }

    /// Override the offset reported by `finish`.
    pub fn with_final_offset(mut self, final_offset: usize) -> Self {
        self.final_offset = final_offset;
        self
    }

    /// Number of `produce_next` calls since the last reset.
    pub fn pulls(&self) -> usize {
        self.pulls
    }

    /// Whether the stream has returned false since the last reset.
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }
}

impl TokenStream for VecTokenStream {
    fn set_input(&mut self, _input: CharInput) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.next = 0;
        self.pulls = 0;
        self.reached_end = false;
        self.state = StreamState::Active;
        Ok(())
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        self.state.check_produce(self.name())?;
        self.pulls += 1;
        match self.tokens.get(self.next) {
            Some(next) => {
                token.load(next);
                self.next += 1;
                Ok(true)
            }
            None => {
                self.reached_end = true;
                self.state = StreamState::Exhausted;
                token.invalidate();
                Ok(false)
            }
        }
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.state.check_finish(self.name())?;
        token.clear_attributes();
        token.set_offsets(self.final_offset, self.final_offset);
        token.set_position_increment(0);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state = StreamState::Closed;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "vec"
    }
}
