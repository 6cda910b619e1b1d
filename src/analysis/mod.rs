//! Text analysis: turning character input into a stream of index terms.
//!
//! The pieces, from the bottom up:
//!
//! - [`token`]: the reusable token buffer and owned token snapshots
//! - [`char_array_set`] and [`word_list`]: word sets and the bundled defaults
//! - [`token_stream`]: the pull protocol every stage implements
//! - [`tokenizer`] and [`token_filter`]: the stages themselves
//! - [`analyzer`]: version-gated chains of stages
//! - [`factory`]: building stages and pipelines by name
//! - [`version`]: compatibility versions

pub mod analyzer;
pub mod char_array_set;
pub mod factory;
pub mod token;
pub mod token_filter;
pub mod token_stream;
pub mod tokenizer;
pub mod version;
pub mod word_list;

// Re-export commonly used types
pub use analyzer::{Analyzer, ChainPool, EnglishAnalyzer, FrenchAnalyzer, StandardAnalyzer};
pub use char_array_set::CharArraySet;
pub use token::{Token, TokenBuffer, TokenType};
pub use token_stream::{collect_tokens, text_input, BoxTokenStream, CharInput, StreamOutput, TokenStream};
pub use version::Version;
