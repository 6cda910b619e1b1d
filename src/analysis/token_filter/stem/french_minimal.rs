//! Minimal French stemmer.
//!
//! Removes plural markers and a few frequent endings only, which makes it far
//! less aggressive than the Snowball French algorithm:
//!
//! - words shorter than six characters are left alone;
//! - a final `x` is dropped (`-aux` becomes `-al`: `chevaux` → `cheval`);
//! - otherwise a final `s`, then `r`, then `e`, then `é` are dropped in turn;
//! - finally a doubled last letter is reduced to one.

use std::borrow::Cow;

use crate::analysis::token_filter::stem::Stemmer;

const MIN_LENGTH: usize = 6;

/// A light stemmer for French.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchMinimalStemmer;

impl FrenchMinimalStemmer {
    pub fn new() -> Self {
        FrenchMinimalStemmer
    }
}

impl Stemmer for FrenchMinimalStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if word.chars().count() < MIN_LENGTH {
            return Cow::Borrowed(word);
        }

        if let Some(stripped) = word.strip_suffix('x') {
            return match stripped.strip_suffix("au") {
                Some(base) => Cow::Owned(format!("{base}al")),
                None => Cow::Borrowed(stripped),
            };
        }

        let mut stem = word;
        for ending in ['s', 'r', 'e', 'é'] {
            if let Some(rest) = stem.strip_suffix(ending) {
                stem = rest;
            }
        }

        let mut tail = stem.chars().rev();
        if let (Some(last), Some(previous)) = (tail.next(), tail.next()) {
            if last == previous {
                stem = &stem[..stem.len() - last.len_utf8()];
            }
        }
        Cow::Borrowed(stem)
    }

    fn name(&self) -> &'static str {
        "french_minimal_stem"
    }
}
