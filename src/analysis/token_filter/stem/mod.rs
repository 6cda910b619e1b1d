//! Stemming token filter and stemmer implementations.
//!
//! A [`StemFilter`] reduces each token's term to its stem with a [`Stemmer`],
//! leaving tokens flagged as keywords untouched.
//!
//! # Available Stemmers
//!
//! - [`porter::PorterStemmer`] - The classic Porter algorithm for English
//! - [`french_minimal::FrenchMinimalStemmer`] - Light French plural and ending removal
//! - [`snowball::SnowballStemmer`] - Snowball algorithms for many languages

use std::borrow::Cow;

use crate::analysis::token::TokenBuffer;
use crate::analysis::token_stream::{CharInput, TokenStream};
use crate::error::Result;

pub mod french_minimal;
pub mod porter;
pub mod snowball;

pub use french_minimal::FrenchMinimalStemmer;
pub use porter::PorterStemmer;
pub use snowball::{Language, SnowballStemmer};

/// Trait for stemming algorithms.
///
/// Stemming is a pure function of the input word. Implementations return
/// `Cow::Borrowed` when the stem is the word itself or a slice of it.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

impl<T: Stemmer + ?Sized> Stemmer for Box<T> {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        (**self).stem(word)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Filter that applies stemming to tokens not marked as keywords.
pub struct StemFilter<S, T> {
    inner: S,
    /// The stemmer to use.
    stemmer: T,
    scratch: String,
}

impl<S, T> std::fmt::Debug for StemFilter<S, T>
where
    T: Stemmer,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl<S: TokenStream, T: Stemmer> StemFilter<S, T> {
    /// Create a stem filter with the given stemmer.
    pub fn new(inner: S, stemmer: T) -> Self {
        StemFilter {
            inner,
            stemmer,
            scratch: String::new(),
        }
    }

    pub fn stemmer(&self) -> &T {
        &self.stemmer
    }
}

/// How a computed stem is written back into the buffer.
enum Rewrite {
    /// The stem is a prefix of the term.
    Truncate(usize),
    /// The stem is in the scratch buffer.
    Replace,
}

impl<S: TokenStream, T: Stemmer> TokenStream for StemFilter<S, T> {
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
        if token.is_keyword() {
            return Ok(true);
        }

        let term = token.term();
        let rewrite = match self.stemmer.stem(term) {
            Cow::Borrowed(stem) if stem.as_ptr() == term.as_ptr() => Rewrite::Truncate(stem.len()),
            stem => {
                self.scratch.clear();
                self.scratch.push_str(&stem);
                Rewrite::Replace
            }
        };
        match rewrite {
            Rewrite::Truncate(len) => token.truncate_term(len),
            Rewrite::Replace => token.set_term(&self.scratch),
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
        self.stemmer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::token_stream::{collect_tokens, VecTokenStream};

    /// Replaces the whole word, to exercise the owned path.
    struct Upper;

    impl Stemmer for Upper {
        fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
            Cow::Owned(word.to_uppercase())
        }

        fn name(&self) -> &'static str {
            "upper"
        }
    }

    #[test]
    fn test_stem_filter() {
        let inner = VecTokenStream::new(vec![
            Token::new("running"),
            Token::new("flies"),
            Token::new("testing").with_keyword(true),
        ]);
        let mut filter = StemFilter::new(inner, PorterStemmer::new());
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["run", "fli", "testing"]);
        assert!(output.tokens[2].keyword);
    }

    #[test]
    fn test_owned_stems_are_copied_in() {
        let mut filter = StemFilter::new(VecTokenStream::from_terms(["abc", "de"]), Upper);
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["ABC", "DE"]);
        assert_eq!(filter.name(), "upper");
    }

    #[test]
    fn test_boxed_stemmer() {
        let stemmer: Box<dyn Stemmer> = Box::new(FrenchMinimalStemmer::new());
        let mut filter = StemFilter::new(VecTokenStream::from_terms(["chevaux"]), stemmer);
        filter.reset().unwrap();

        let output = collect_tokens(&mut filter).unwrap();
        assert_eq!(output.terms(), vec!["cheval"]);
    }
}
