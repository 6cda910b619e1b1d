//! Keyword marker filter implementation.

use std::sync::Arc;

use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

/// Marks tokens found in an exclusion set as keywords so stemmers leave them
/// untouched. Terms are never changed or dropped, and a flag set by an
/// earlier stage is never cleared.
pub struct KeywordMarkerFilter<S> {
    inner: S,
    keywords: Arc<CharArraySet>,
}

impl<S: TokenStream> KeywordMarkerFilter<S> {
    pub fn new(inner: S, keywords: Arc<CharArraySet>) -> Self {
        KeywordMarkerFilter { inner, keywords }
    }

    pub fn keywords(&self) -> &Arc<CharArraySet> {
        &self.keywords
    }
}

impl<S: TokenStream> TokenStream for KeywordMarkerFilter<S> {
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
        if !token.is_keyword() && self.keywords.contains(token.term()) {
            token.set_keyword(true);
        }
        Ok(true)
    }

    fn finish(&mut self, token: &mut TokenBuffer) -> Result<()> {
        self.inner.finish(token)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}
