//! Language-specific analyzers.
//!
//! - [`english`] - possessives, English stop words, Porter or Snowball stemming
//! - [`french`] - elision, French stop words, Snowball or minimal stemming
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::analyzer::analyzer::Analyzer;
//! use stemma::analysis::analyzer::language::english::EnglishAnalyzer;
//! use stemma::analysis::version::Version;
//!
//! let analyzer = EnglishAnalyzer::new(Version::LATEST).unwrap();
//! let tokens = analyzer.analyze("body", "Running the world").unwrap();
//!
//! // "the" is filtered as a stop word
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "run");
//! ```

pub mod english;
pub mod french;
