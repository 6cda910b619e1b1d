//! Elision filter implementation.
//!
//! Removes an elided article from the front of a token, as in French
//! `l'avion` → `avion` or `qu’il` → `il`.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token_filter::elision::ElisionFilter;
//! use stemma::analysis::token_stream::{collect_tokens, TokenStream, VecTokenStream};
//! use stemma::analysis::word_list::DefaultSet;
//!
//! let articles = DefaultSet::FrenchArticles.load().unwrap();
//! let inner = VecTokenStream::from_terms(["L'avion", "jusqu'ici", "aujourd'hui"]);
//! let mut filter = ElisionFilter::new(inner, articles);
//! filter.reset().unwrap();
//!
//! let output = collect_tokens(&mut filter).unwrap();
//! assert_eq!(output.terms(), vec!["avion", "ici", "aujourd'hui"]);
//! ```

use std::sync::Arc;

use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

/// Apostrophe characters that end an elided article.
pub const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Strips a leading article followed by an apostrophe.
///
/// Articles match regardless of case. When several articles could match, the
/// longest one is stripped, and only once per token.
pub struct ElisionFilter<S> {
    inner: S,
    articles: Arc<CharArraySet>,
}

impl<S: TokenStream> ElisionFilter<S> {
    /// Create an elision filter. A case-sensitive article set is copied into
    /// a case-insensitive one.
    pub fn new(inner: S, articles: Arc<CharArraySet>) -> Self {
        let articles = if articles.ignore_case() {
            articles
        } else {
            Arc::new(CharArraySet::from_words(articles.iter(), true).unmodifiable())
        };
        ElisionFilter { inner, articles }
    }

    pub fn articles(&self) -> &Arc<CharArraySet> {
        &self.articles
    }

    /// Byte length of the prefix to strip (article plus apostrophe), if any.
    fn elided_prefix(&self, term: &str) -> Option<usize> {
        term.char_indices()
            .rev()
            .filter(|(_, c)| APOSTROPHES.contains(c))
            .find(|(idx, _)| *idx > 0 && self.articles.contains(&term[..*idx]))
            .map(|(idx, c)| idx + c.len_utf8())
    }
}

impl<S: TokenStream> TokenStream for ElisionFilter<S> {
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
        if let Some(prefix) = self.elided_prefix(token.term()) {
            token.strip_term_prefix(prefix);
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
        "elision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_stream::{collect_tokens, VecTokenStream};

    fn elide(articles: Arc<CharArraySet>, terms: &[&str]) -> Vec<String> {
        let mut filter = ElisionFilter::new(VecTokenStream::from_terms(terms.iter().copied()), articles);
        filter.reset().unwrap();
        let output = collect_tokens(&mut filter).unwrap();
        output.terms().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_strips_articles() {
        let articles = Arc::new(CharArraySet::from_words(["l", "qu", "d"], true));
        let terms = elide(articles, &["l'avion", "Qu’il", "d'", "avion", "'avion"]);
        assert_eq!(terms, vec!["avion", "il", "", "avion", "'avion"]);
    }

    #[test]
    fn test_longest_article_wins_once() {
        let articles = Arc::new(CharArraySet::from_words(["l", "l'l"], true));
        assert_eq!(elide(articles, &["l'l'x"]), vec!["x"]);

        let articles = Arc::new(CharArraySet::from_words(["l"], true));
        // only one article is removed
        assert_eq!(elide(articles, &["l'l'x"]), vec!["l'x"]);
    }

    #[test]
    fn test_case_sensitive_set_is_folded() {
        let articles = Arc::new(CharArraySet::from_words(["l"], false));
        assert_eq!(elide(articles, &["L'Avion"]), vec!["Avion"]);
    }

    #[test]
    fn test_offsets_are_untouched() {
        let articles = Arc::new(CharArraySet::from_words(["l"], true));
        let mut filter = ElisionFilter::new(VecTokenStream::from_terms(["l'avion"]), articles);
        filter.reset().unwrap();
        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.tokens[0].start_offset, 0);
        assert_eq!(output.tokens[0].end_offset, 7);
    }
}
