//! English possessive filter implementation.

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

/// Removes a trailing `'s` from English words (`author's` → `author`).
///
/// Straight and typographic apostrophes are recognised, with either case of
/// `s` since this stage runs before lowercasing.
pub struct EnglishPossessiveFilter<S> {
    inner: S,
}

impl<S: TokenStream> EnglishPossessiveFilter<S> {
    pub fn new(inner: S) -> Self {
        EnglishPossessiveFilter { inner }
    }
}

fn possessive_suffix_len(term: &str) -> Option<usize> {
    let mut chars = term.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('s' | 'S'), Some(apostrophe @ ('\'' | '\u{2019}' | '\u{FF07}'))) => {
            Some(1 + apostrophe.len_utf8())
        }
        _ => None,
    }
}

impl<S: TokenStream> TokenStream for EnglishPossessiveFilter<S> {
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
        if let Some(suffix) = possessive_suffix_len(token.term()) {
            let len = token.term_len() - suffix;
            token.truncate_term(len);
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
        "english_possessive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_stream::{collect_tokens, VecTokenStream};

    #[test]
    fn test_strips_possessive() {
        let inner = VecTokenStream::from_terms(["author's", "JOHN'S", "James’s", "its", "'s", "s"]);
        let mut filter = EnglishPossessiveFilter::new(inner);
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["author", "JOHN", "James", "its", "", "s"]);
    }
}
