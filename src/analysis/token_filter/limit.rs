//! Token count limit filter implementation.

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::{Result, StemmaError};

/// A filter that emits at most `max_token_count` tokens.
///
/// With `consume_all`, once the limit is reached the inner stream is still
/// drained to its end (tokens are discarded) so its own end-of-input work
/// runs. Without it, the inner stream is not pulled past the limit.
///
/// Either way, `finish` reports the inner stream's end state: tokenizers read
/// their whole input at `reset`, so the final offset is the true end of input
/// and not the end of the last emitted token.
pub struct LimitTokenCountFilter<S> {
    inner: S,
    max_token_count: usize,
    consume_all: bool,
    count: usize,
    done: bool,
}

impl<S: TokenStream> LimitTokenCountFilter<S> {
    /// Create a new limit filter.
    pub fn new(inner: S, max_token_count: usize, consume_all: bool) -> Self {
        LimitTokenCountFilter {
            inner,
            max_token_count,
            consume_all,
            count: 0,
            done: false,
        }
    }

    /// Get the limit.
    pub fn max_token_count(&self) -> usize {
        self.max_token_count
    }

    pub fn consume_all(&self) -> bool {
        self.consume_all
    }

    /// Access the wrapped stream.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TokenStream> TokenStream for LimitTokenCountFilter<S> {
    fn set_input(&mut self, input: CharInput) -> Result<()> {
        self.inner.set_input(input)
    }

    fn reset(&mut self) -> Result<()> {
        self.count = 0;
        self.done = false;
        self.inner.reset()
    }

    fn produce_next(&mut self, token: &mut TokenBuffer) -> Result<bool> {
        if self.done {
            return Err(StemmaError::illegal_state(format!(
                "{}: produce_next() called again after returning false without reset()",
                self.name()
            )));
        }

        if self.count < self.max_token_count {
            if self.inner.produce_next(token)? {
                self.count += 1;
                return Ok(true);
            }
            self.done = true;
            return Ok(false);
        }

        if self.consume_all {
            while self.inner.produce_next(token)? {}
        }
        token.invalidate();
        self.done = true;
        Ok(false)
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.inner.finish(token)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}
