//! Character-set container used for stop words, exclusions and articles.
//!
//! A [`CharArraySet`] is filled once, optionally folding case, then frozen
//! with [`CharArraySet::unmodifiable`] and shared as `Arc<CharArraySet>`.
//! Lookups take the token buffer's term directly: the hash is computed over
//! the (folded) characters as they are read, so no lowercase copy is made.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::char_array_set::CharArraySet;
//!
//! let set = CharArraySet::from_words(["The", "and"], true).unmodifiable();
//! assert!(set.contains("the"));
//! assert!(set.contains("AND"));
//! assert!(!set.contains("fox"));
//! assert!(set.clone().add("fox").is_err());
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hasher};

use ahash::{AHashMap, RandomState};

use crate::error::{Result, StemmaError};

/// A set of strings with optional case-insensitive membership.
#[derive(Clone)]
pub struct CharArraySet {
    buckets: AHashMap<u64, Vec<Box<str>>>,
    hasher: RandomState,
    len: usize,
    ignore_case: bool,
    read_only: bool,
}

impl CharArraySet {
    /// Create an empty, modifiable set.
    pub fn new(ignore_case: bool) -> Self {
        CharArraySet {
            buckets: AHashMap::new(),
            hasher: RandomState::new(),
            len: 0,
            ignore_case,
            read_only: false,
        }
    }

    /// Create an empty, modifiable set sized for `capacity` entries.
    pub fn with_capacity(capacity: usize, ignore_case: bool) -> Self {
        let mut set = Self::new(ignore_case);
        set.buckets.reserve(capacity);
        set
    }

    /// Create a modifiable set from a list of words.
    pub fn from_words<I, S>(words: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(ignore_case);
        for word in words {
            set.insert(word.as_ref());
        }
        set
    }

    /// An empty, read-only set.
    pub fn empty() -> Self {
        Self::new(false).unmodifiable()
    }

    /// Freeze this set. Every mutator on the result fails.
    pub fn unmodifiable(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// A modifiable copy with the same entries and case mode.
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.read_only = false;
        copy
    }

    /// Add a word. Returns whether it was newly inserted.
    pub fn add(&mut self, word: &str) -> Result<bool> {
        self.check_writable("add")?;
        Ok(self.insert(word))
    }

    /// Add every word of an iterator.
    pub fn add_all<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.check_writable("add_all")?;
        for word in words {
            self.insert(word.as_ref());
        }
        Ok(())
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<()> {
        self.check_writable("clear")?;
        self.buckets.clear();
        self.len = 0;
        Ok(())
    }

    /// Whether `text` is a member, honouring the set's case mode.
    pub fn contains(&self, text: &str) -> bool {
        let hash = self.hash(text);
        match self.buckets.get(&hash) {
            Some(bucket) => bucket.iter().any(|entry| self.equals(entry, text)),
            None => false,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether membership ignores case.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Whether mutators are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Iterate over the stored entries (lowercased when the set ignores case).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buckets.values().flatten().map(|entry| &**entry)
    }

    fn check_writable(&self, operation: &str) -> Result<()> {
        if self.read_only {
            return Err(StemmaError::unsupported(format!(
                "{operation} on an unmodifiable CharArraySet"
            )));
        }
        Ok(())
    }

    fn insert(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        let stored: Box<str> = if self.ignore_case {
            word.chars().flat_map(char::to_lowercase).collect::<String>().into()
        } else {
            word.into()
        };
        let hash = self.hash(word);
        self.buckets.entry(hash).or_default().push(stored);
        self.len += 1;
        true
    }

    fn hash(&self, text: &str) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        if self.ignore_case {
            for c in text.chars().flat_map(char::to_lowercase) {
                hasher.write_u32(c as u32);
            }
        } else {
            for c in text.chars() {
                hasher.write_u32(c as u32);
            }
        }
        hasher.finish()
    }

    fn equals(&self, entry: &str, text: &str) -> bool {
        if self.ignore_case {
            // entries are stored folded
            entry.chars().eq(text.chars().flat_map(char::to_lowercase))
        } else {
            entry == text
        }
    }
}

impl fmt::Debug for CharArraySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharArraySet")
            .field("len", &self.len)
            .field("ignore_case", &self.ignore_case)
            .field("read_only", &self.read_only)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_membership() {
        let set = CharArraySet::from_words(["Foo", "bar"], false);
        assert!(set.contains("Foo"));
        assert!(!set.contains("foo"));
        assert!(set.contains("bar"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_case_insensitive_membership() {
        let set = CharArraySet::from_words(["Élan", "QU"], true);
        assert!(set.contains("élan"));
        assert!(set.contains("ÉLAN"));
        assert!(set.contains("qu"));
        assert!(set.contains("Qu"));
        assert!(!set.contains("que"));

        let mut stored: Vec<&str> = set.iter().collect();
        stored.sort_unstable();
        assert_eq!(stored, vec!["qu", "élan"]);
    }

    #[test]
    fn test_duplicates_are_not_counted() {
        let mut set = CharArraySet::new(true);
        assert!(set.add("word").unwrap());
        assert!(!set.add("WORD").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_copy_and_unmodifiable_round_trip() {
        let words = ["the", "and", "of", "über"];
        let original = CharArraySet::from_words(words, false);
        let frozen = original.copy().unmodifiable();

        assert_eq!(frozen.len(), original.len());
        for word in words {
            assert!(frozen.contains(word));
        }
        assert!(!frozen.contains("fox"));

        let mut frozen = frozen;
        assert!(matches!(
            frozen.add("fox"),
            Err(StemmaError::UnsupportedOperation(_))
        ));
        assert!(frozen.add_all(["fox"]).is_err());
        assert!(frozen.clear().is_err());
        assert_eq!(frozen.len(), 4);
        assert!(!frozen.contains("fox"));

        // a copy of a frozen set is writable again
        let mut thawed = frozen.copy();
        assert!(thawed.add("fox").unwrap());
        assert_eq!(thawed.len(), 5);
    }

    #[test]
    fn test_empty_set() {
        let set = CharArraySet::empty();
        assert!(set.is_empty());
        assert!(set.is_read_only());
        assert!(!set.contains(""));
    }
}
