//! Standard analyzer that provides good defaults for most use cases.
//!
//! # Pipeline
//!
//! 1. StandardTokenizer (Unicode word boundaries)
//! 2. LengthFilter (0..=255)
//! 3. LowercaseFilter
//! 4. StopFilter (English stop words)
//!
//! Before 1.5 the length stage ran in legacy mode and the stop set was the
//! short legacy list.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::analyzer::analyzer::Analyzer;
//! use stemma::analysis::analyzer::standard::StandardAnalyzer;
//! use stemma::analysis::version::Version;
//!
//! let analyzer = StandardAnalyzer::new(Version::LATEST).unwrap();
//! let tokens = analyzer.analyze("body", "Hello the world and test").unwrap();
//!
//! // "the" and "and" are filtered out as stop words
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[1].position_increment, 2);
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::{PipelineAnalyzer, PipelineDescription};
use crate::analysis::analyzer::template::{template, AnalyzerKind};
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token_stream::BoxTokenStream;
use crate::analysis::version::Version;
use crate::error::Result;

/// A standard analyzer: Unicode words, lowercased, with English stop words removed.
#[derive(Clone, Debug)]
pub struct StandardAnalyzer {
    version: Version,
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a standard analyzer with the default stop words of `version`.
    pub fn new(version: Version) -> Result<Self> {
        Self::build(version, None)
    }

    /// Create a standard analyzer with a custom stop word set.
    pub fn with_stop_words(version: Version, stop_words: Arc<CharArraySet>) -> Result<Self> {
        Self::build(version, Some(stop_words))
    }

    fn build(version: Version, stop_words: Option<Arc<CharArraySet>>) -> Result<Self> {
        let template = template(AnalyzerKind::Standard, version);
        let description = PipelineDescription::resolve(template, stop_words, None)?;
        Ok(StandardAnalyzer {
            version,
            inner: PipelineAnalyzer::new(description),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream> {
        self.inner.create_stream(field)
    }

    fn name(&self) -> &'static str {
        "standard"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_analyzer() {
        let analyzer = StandardAnalyzer::new(Version::LATEST).unwrap();
        let output = analyzer.analyze_output("body", "The Quick fox").unwrap();

        assert_eq!(output.terms(), vec!["quick", "fox"]);
        assert_eq!(output.increments(), vec![2, 1]);
        assert_eq!(output.tokens[0].start_offset, 4);
        assert_eq!(output.tokens[0].end_offset, 9);
        assert_eq!(output.final_offset, 13);
    }

    #[test]
    fn test_legacy_stop_set() {
        // "because" is only in the current English list
        let legacy = StandardAnalyzer::new(Version::V1_0).unwrap();
        let terms: Vec<_> = legacy
            .analyze("body", "because of you")
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(terms, vec!["because", "you"]);

        let current = StandardAnalyzer::new(Version::V1_5).unwrap();
        assert!(current.analyze("body", "because of you").unwrap().is_empty());
    }

    #[test]
    fn test_overlong_token_gap_by_version() {
        let text = format!("alpha {} beta", "x".repeat(300));

        let legacy = StandardAnalyzer::new(Version::V1_0).unwrap();
        let output = legacy.analyze_output("body", &text).unwrap();
        assert_eq!(output.terms(), vec!["alpha", "beta"]);
        assert_eq!(output.increments(), vec![1, 1]);

        let current = StandardAnalyzer::new(Version::V1_5).unwrap();
        let output = current.analyze_output("body", &text).unwrap();
        assert_eq!(output.terms(), vec!["alpha", "beta"]);
        assert_eq!(output.increments(), vec![1, 2]);
    }

    #[test]
    fn test_custom_stop_words() {
        let stop_words = Arc::new(CharArraySet::from_words(["hello"], false));
        let analyzer = StandardAnalyzer::with_stop_words(Version::LATEST, stop_words).unwrap();
        let tokens = analyzer.analyze("body", "Hello the world").unwrap();
        let terms: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(terms, vec!["the", "world"]);
    }

    #[test]
    fn test_standard_analyzer_name() {
        let analyzer = StandardAnalyzer::new(Version::V1_0).unwrap();
        assert_eq!(analyzer.name(), "standard");
        assert_eq!(analyzer.version(), Version::V1_0);
        assert_eq!(analyzer.inner().description().stage_names(), vec!["length", "lowercase", "stop"]);
    }
}
