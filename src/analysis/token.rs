//! Token buffer and token types for text analysis.
//!
//! A single [`TokenBuffer`] is lent mutably to every stage of a chain on each
//! call and reused for every token of a run, so steady-state analysis does not
//! allocate per token. Callers that need a token beyond the next call take an
//! owned [`Token`] snapshot with [`TokenBuffer::to_token`].
//!
//! # Position increments
//!
//! ```text
//! Input: "the quick fox" with "the" removed by a stop filter
//!
//!   "quick" (pos_inc=2)   ← carries the removed token's position
//!   "fox"   (pos_inc=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::token::{TokenBuffer, TokenType};
//!
//! let mut buffer = TokenBuffer::new();
//! buffer.clear_attributes();
//! buffer.set_term("hello");
//! buffer.set_offsets(0, 5);
//!
//! assert_eq!(buffer.term(), "hello");
//! assert_eq!(buffer.position_increment(), 1);
//! assert_eq!(buffer.token_type(), TokenType::Word);
//! assert!(!buffer.is_keyword());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token type classification.
///
/// Tokenizers tag each token with the script class of its text; filters
/// pass the tag through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Generic word (default when a tokenizer does not classify)
    #[default]
    Word,
    /// Alphanumeric text (Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK ideographs
    Cjk,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hangul characters (Korean)
    Hangul,
    /// Anything else
    Other,
}

impl TokenType {
    /// Classify a word by the characters it contains.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2A6DF}'  // CJK Extension B
            )
        }) {
            return TokenType::Cjk;
        }

        if word.chars().all(|c| c.is_alphanumeric() || c == '\'' || c == '’') {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }
}

/// The reusable per-run record carrying one token's attributes.
///
/// The buffer is owned by whoever drives the chain and borrowed by each stage
/// for the duration of one `produce_next`/`finish` call. The term storage only
/// ever grows, so after a warm-up no token allocates.
///
/// Reading an attribute while the buffer is not valid (before the first
/// successful `produce_next`, or after a `false` return) is a protocol
/// violation and trips a debug assertion.
#[derive(Clone, Debug)]
pub struct TokenBuffer {
    term: String,
    start_offset: usize,
    end_offset: usize,
    position_increment: u32,
    position_length: u32,
    token_type: TokenType,
    keyword: bool,
    valid: bool,
}

impl Default for TokenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuffer {
    /// Create an empty, not-yet-valid buffer.
    pub fn new() -> Self {
        TokenBuffer {
            term: String::new(),
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            token_type: TokenType::Word,
            keyword: false,
            valid: false,
        }
    }

    /// Create a buffer whose term storage is pre-sized.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::new();
        buffer.term.reserve(capacity);
        buffer
    }

    /// Reset every attribute to its default and mark the buffer valid.
    ///
    /// Sources call this at the start of each token. Term capacity is kept.
    pub fn clear_attributes(&mut self) {
        self.term.clear();
        self.start_offset = 0;
        self.end_offset = 0;
        self.position_increment = 1;
        self.position_length = 1;
        self.token_type = TokenType::Word;
        self.keyword = false;
        self.valid = true;
    }

    /// Mark the buffer as unreadable (stream exhausted).
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Whether the buffer currently holds a readable token.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    fn check_readable(&self) {
        debug_assert!(
            self.valid,
            "token buffer read without a preceding successful produce_next()"
        );
    }

    /// The current term text.
    pub fn term(&self) -> &str {
        self.check_readable();
        &self.term
    }

    /// Length of the term in bytes.
    pub fn term_len(&self) -> usize {
        self.check_readable();
        self.term.len()
    }

    /// Length of the term in characters.
    pub fn term_char_len(&self) -> usize {
        self.check_readable();
        self.term.chars().count()
    }

    /// Allocated capacity of the term storage.
    pub fn capacity(&self) -> usize {
        self.term.capacity()
    }

    /// Replace the term text, reusing the existing allocation.
    pub fn set_term(&mut self, text: &str) {
        self.term.clear();
        self.term.push_str(text);
    }

    /// Append to the term text.
    pub fn push_str(&mut self, text: &str) {
        self.term.push_str(text);
    }

    /// Shorten the term to `len` bytes. `len` must lie on a char boundary.
    pub fn truncate_term(&mut self, len: usize) {
        self.term.truncate(len);
    }

    /// Remove the first `len` bytes of the term in place.
    pub fn strip_term_prefix(&mut self, len: usize) {
        self.term.drain(..len);
    }

    /// Direct mutable access to the term storage.
    pub fn term_mut(&mut self) -> &mut String {
        &mut self.term
    }

    pub fn start_offset(&self) -> usize {
        self.check_readable();
        self.start_offset
    }

    pub fn end_offset(&self) -> usize {
        self.check_readable();
        self.end_offset
    }

    /// Set start and end character offsets.
    pub fn set_offsets(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end, "start offset {start} > end offset {end}");
        self.start_offset = start;
        self.end_offset = end;
    }

    pub fn position_increment(&self) -> u32 {
        self.check_readable();
        self.position_increment
    }

    pub fn set_position_increment(&mut self, increment: u32) {
        self.position_increment = increment;
    }

    pub fn position_length(&self) -> u32 {
        self.check_readable();
        self.position_length
    }

    pub fn set_position_length(&mut self, length: u32) {
        self.position_length = length;
    }

    pub fn token_type(&self) -> TokenType {
        self.check_readable();
        self.token_type
    }

    pub fn set_token_type(&mut self, token_type: TokenType) {
        self.token_type = token_type;
    }

    /// Whether the token is exempt from stemming.
    pub fn is_keyword(&self) -> bool {
        self.check_readable();
        self.keyword
    }

    pub fn set_keyword(&mut self, keyword: bool) {
        self.keyword = keyword;
    }

    /// Load every attribute from an owned token and mark the buffer valid.
    pub fn load(&mut self, token: &Token) {
        self.set_term(&token.text);
        self.start_offset = token.start_offset;
        self.end_offset = token.end_offset;
        self.position_increment = token.position_increment;
        self.position_length = token.position_length;
        self.token_type = token.token_type;
        self.keyword = token.keyword;
        self.valid = true;
    }

    /// Copy the current attributes out into an owned token.
    pub fn to_token(&self) -> Token {
        self.check_readable();
        Token {
            text: self.term.clone(),
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            position_increment: self.position_increment,
            position_length: self.position_length,
            token_type: self.token_type,
            keyword: self.keyword,
        }
    }
}

/// An owned snapshot of a token.
///
/// # Examples
///
/// ```
/// use stemma::analysis::token::Token;
///
/// let token = Token::with_offsets("world", 6, 11).with_position_increment(2);
/// assert_eq!(token.text, "world");
/// assert_eq!(token.start_offset, 6);
/// assert_eq!(token.position_increment, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// Character offset where this token starts in the original text
    pub start_offset: usize,

    /// Character offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 0: same position as previous token
    /// - 1: next position
    /// - >1: positions were skipped (e.g. removed stop words)
    pub position_increment: u32,

    /// How many positions this token spans (default: 1).
    pub position_length: u32,

    /// Script classification of the text
    pub token_type: TokenType,

    /// Exempt from stemming
    pub keyword: bool,
}

impl Token {
    /// Create a token with default attributes.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            token_type: TokenType::Word,
            keyword: false,
        }
    }

    /// Create a token with character offsets.
    pub fn with_offsets<S: Into<String>>(text: S, start_offset: usize, end_offset: usize) -> Self {
        let mut token = Token::new(text);
        token.start_offset = start_offset;
        token.end_offset = end_offset;
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: u32) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the keyword flag.
    pub fn with_keyword(mut self, keyword: bool) -> Self {
        self.keyword = keyword;
        self
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
