use std::fmt::Debug;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::{PipelineAnalyzer, PipelineDescription};
use crate::analysis::analyzer::template::{template, AnalyzerKind};
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token_stream::BoxTokenStream;
use crate::analysis::version::Version;
use crate::error::Result;

/// English analyzer: possessive stripping, lowercasing, stop words and
/// stemming. Words in the exclusion set are marked as keywords and left
/// unstemmed.
#[derive(Clone, Debug)]
pub struct EnglishAnalyzer {
    version: Version,
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    pub fn new(version: Version) -> Result<Self> {
        Self::with_sets(version, None, None)
    }

    /// `None` for `stop_words` means the default set of `version`; `None` or
    /// an empty set for `exclusions` means no keyword marking.
    pub fn with_sets(
        version: Version,
        stop_words: Option<Arc<CharArraySet>>,
        exclusions: Option<Arc<CharArraySet>>,
    ) -> Result<Self> {
        let template = template(AnalyzerKind::English, version);
        let description = PipelineDescription::resolve(template, stop_words, exclusions)?;
        Ok(Self {
            version,
            inner: PipelineAnalyzer::new(description),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for EnglishAnalyzer {
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream> {
        self.inner.create_stream(field)
    }

    fn name(&self) -> &'static str {
        "english"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(analyzer: &EnglishAnalyzer, text: &str) -> Vec<String> {
        analyzer
            .analyze("body", text)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_english_analyzer() {
        let analyzer = EnglishAnalyzer::new(Version::LATEST).unwrap();
        assert_eq!(
            terms(&analyzer, "The dog's running quickly"),
            vec!["dog", "run", "quick"]
        );
    }

    #[test]
    fn test_stemmer_by_version() {
        let porter = EnglishAnalyzer::new(Version::V1_5).unwrap();
        assert_eq!(terms(&porter, "quickly"), vec!["quickli"]);

        let snowball = EnglishAnalyzer::new(Version::V2_0).unwrap();
        assert_eq!(terms(&snowball, "quickly"), vec!["quick"]);
    }

    #[test]
    fn test_possessive_only_from_1_5() {
        let legacy = EnglishAnalyzer::new(Version::V1_0).unwrap();
        assert_eq!(terms(&legacy, "dog's"), vec!["dog's"]);

        let current = EnglishAnalyzer::new(Version::V1_5).unwrap();
        assert_eq!(terms(&current, "dog's"), vec!["dog"]);
    }

    #[test]
    fn test_exclusions_are_not_stemmed() {
        let exclusions = Arc::new(CharArraySet::from_words(["running"], false));
        let analyzer = EnglishAnalyzer::with_sets(Version::LATEST, None, Some(exclusions)).unwrap();

        let tokens = analyzer.analyze("body", "running jumping").unwrap();
        assert_eq!(tokens[0].text, "running");
        assert!(tokens[0].keyword);
        assert_eq!(tokens[1].text, "jump");
        assert!(!tokens[1].keyword);
    }

    #[test]
    fn test_english_analyzer_name() {
        let analyzer = EnglishAnalyzer::new(Version::V1_0).unwrap();
        assert_eq!(analyzer.name(), "english");
        assert_eq!(analyzer.version(), Version::V1_0);
    }
}
