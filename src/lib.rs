//! # Stemma
//!
//! A composable, version-gated text analysis pipeline for full-text search.
//!
//! ## Features
//!
//! - Pull-based token streams reusing one token buffer per run
//! - Standard, whitespace, whole-input and regex tokenizers
//! - Length, count limit, stop word, keyword, elision, lowercase and
//!   possessive filters
//! - Porter, minimal French and Snowball stemming
//! - Analyzers whose stage sequence follows a compatibility version
//! - Pipelines built by name from string maps or JSON
//!
//! ```
//! use stemma::analysis::{Analyzer, EnglishAnalyzer, Version};
//!
//! let analyzer = EnglishAnalyzer::new(Version::LATEST).unwrap();
//! let tokens = analyzer.analyze("body", "The dogs were running").unwrap();
//! let terms: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(terms, vec!["dog", "run"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
