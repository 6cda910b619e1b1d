//! Shared machinery for filters that drop tokens.

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Position increments of dropped tokens, waiting to be carried onto the
/// next emitted token (or onto the end-of-stream state).
///
/// When not preserving, skipped increments are discarded and every survivor
/// reports an increment of 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkippedPositions {
    pending: u32,
    preserve: bool,
}

impl SkippedPositions {
    pub fn new(preserve: bool) -> Self {
        SkippedPositions { pending: 0, preserve }
    }

    pub fn preserves(&self) -> bool {
        self.preserve
    }

    pub fn reset(&mut self) {
        self.pending = 0;
    }

    /// Record a dropped token.
    pub fn skip(&mut self, token: &TokenBuffer) {
        if self.preserve {
            self.pending = self.pending.saturating_add(token.position_increment());
        }
    }

    /// Set the increment of a token about to be emitted.
    pub fn apply(&mut self, token: &mut TokenBuffer) {
        if !self.preserve {
            token.set_position_increment(1);
            return;
        }
        self.apply_final(token);
    }

    /// Add the pending increments to the end-of-stream state.
    pub fn apply_final(&mut self, token: &mut TokenBuffer) {
        if self.pending > 0 {
            token.set_position_increment(token.position_increment().saturating_add(self.pending));
            self.pending = 0;
        }
    }
}

/// Pull from `inner` until a token passes `accept` or the stream is exhausted.
///
/// Dropped tokens are recorded in `skipped`; an accepted token receives the
/// pending increments.
pub fn next_accepted<S, F>(
    inner: &mut S,
    token: &mut TokenBuffer,
    skipped: &mut SkippedPositions,
    mut accept: F,
) -> Result<bool>
where
    S: TokenStream + ?Sized,
    F: FnMut(&TokenBuffer) -> bool,
{
    while inner.produce_next(token)? {
        if accept(token) {
            skipped.apply(token);
            return Ok(true);
        }
        skipped.skip(token);
    }
    Ok(false)
}

/// Forward `finish` to `inner`, then add the increments of trailing dropped
/// tokens to the final state.
pub fn finish_with_skipped<S>(
    inner: &mut S,
    token: &mut TokenBuffer,
    skipped: &mut SkippedPositions,
) -> Result<()>
where
    S: TokenStream + ?Sized,
{
    inner.finish(token)?;
    skipped.apply_final(token);
    Ok(())
}
