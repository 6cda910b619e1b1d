//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is a factory of stage chains. It is immutable and shared
//! across threads; every call to [`create_stream`](Analyzer::create_stream)
//! builds a fresh chain that belongs to a single run.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Index
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1
//!             ↓
//!         Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`StandardAnalyzer`](super::standard::StandardAnalyzer) - Unicode words, lowercased, English stop words
//! - [`EnglishAnalyzer`](super::language::english::EnglishAnalyzer) - English stemming
//! - [`FrenchAnalyzer`](super::language::french::FrenchAnalyzer) - French elision and stemming
//! - [`PipelineAnalyzer`](super::pipeline::PipelineAnalyzer) - Any resolved description
//! - [`LimitTokenCountAnalyzer`](super::limit::LimitTokenCountAnalyzer) - Caps another analyzer's output
//! - [`PerFieldAnalyzer`](super::per_field::PerFieldAnalyzer) - Different analyzers per field
//!
//! # Examples
//!
//! Driving a chain by hand:
//!
//! ```
//! use stemma::analysis::analyzer::analyzer::Analyzer;
//! use stemma::analysis::analyzer::standard::StandardAnalyzer;
//! use stemma::analysis::token::TokenBuffer;
//! use stemma::analysis::token_stream::{text_input, TokenStream};
//! use stemma::analysis::version::Version;
//!
//! let analyzer = StandardAnalyzer::new(Version::LATEST).unwrap();
//! let mut stream = analyzer.token_stream("title", text_input("The Quick Fox")).unwrap();
//! let mut token = TokenBuffer::new();
//!
//! let mut terms = Vec::new();
//! while stream.produce_next(&mut token).unwrap() {
//!     terms.push(token.term().to_string());
//! }
//! stream.finish(&mut token).unwrap();
//! stream.close().unwrap();
//!
//! assert_eq!(terms, vec!["quick", "fox"]);
//! assert_eq!(token.end_offset(), 13);
//! ```

use crate::analysis::token::Token;
use crate::analysis::token_stream::{collect_tokens, text_input, BoxTokenStream, CharInput, StreamOutput};
use crate::error::Result;

/// Trait for analyzers that build token stream chains.
///
/// The trait requires `Send + Sync` so one analyzer can serve concurrent
/// indexing threads; the chains it hands out are `Send` but never shared.
pub trait Analyzer: Send + Sync {
    /// Build a fresh, unbound chain for `field`.
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream>;

    /// Build a chain for `field`, bind `input` and reset it, ready for
    /// `produce_next`.
    fn token_stream(&self, field: &str, input: CharInput) -> Result<BoxTokenStream> {
        let mut stream = self.create_stream(field)?;
        stream.set_input(input)?;
        stream.reset()?;
        Ok(stream)
    }

    /// Run `text` through a whole chain, including `finish` and `close`.
    fn analyze_output(&self, field: &str, text: &str) -> Result<StreamOutput> {
        let mut stream = self.token_stream(field, text_input(text))?;
        collect_tokens(&mut stream)
    }

    /// Convenience for tests and tools: the tokens `text` analyzes to.
    fn analyze(&self, field: &str, text: &str) -> Result<Vec<Token>> {
        Ok(self.analyze_output(field, text)?.tokens)
    }

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}
