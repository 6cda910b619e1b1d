//! Analyzer wrapper that caps the number of tokens per field.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token_filter::LimitTokenCountFilter;
use crate::analysis::token_stream::BoxTokenStream;
use crate::error::Result;

/// Wraps the chains of another analyzer in a [`LimitTokenCountFilter`].
///
/// ```
/// use std::sync::Arc;
///
/// use stemma::analysis::analyzer::analyzer::Analyzer;
/// use stemma::analysis::analyzer::limit::LimitTokenCountAnalyzer;
/// use stemma::analysis::analyzer::standard::StandardAnalyzer;
/// use stemma::analysis::version::Version;
///
/// let standard = Arc::new(StandardAnalyzer::new(Version::LATEST).unwrap());
/// let analyzer = LimitTokenCountAnalyzer::new(standard, 2, false);
///
/// let output = analyzer.analyze_output("body", "one two three four").unwrap();
/// assert_eq!(output.terms(), vec!["one", "two"]);
/// assert_eq!(output.final_offset, 18);
/// ```
#[derive(Clone)]
pub struct LimitTokenCountAnalyzer {
    delegate: Arc<dyn Analyzer>,
    max_token_count: usize,
    consume_all_tokens: bool,
}

impl LimitTokenCountAnalyzer {
    pub fn new(delegate: Arc<dyn Analyzer>, max_token_count: usize, consume_all_tokens: bool) -> Self {
        LimitTokenCountAnalyzer {
            delegate,
            max_token_count,
            consume_all_tokens,
        }
    }

    pub fn delegate(&self) -> &Arc<dyn Analyzer> {
        &self.delegate
    }

    pub fn max_token_count(&self) -> usize {
        self.max_token_count
    }

    pub fn consume_all_tokens(&self) -> bool {
        self.consume_all_tokens
    }
}

impl Analyzer for LimitTokenCountAnalyzer {
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream> {
        let inner = self.delegate.create_stream(field)?;
        Ok(Box::new(LimitTokenCountFilter::new(
            inner,
            self.max_token_count,
            self.consume_all_tokens,
        )))
    }

    fn name(&self) -> &'static str {
        "limit_token_count"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl fmt::Debug for LimitTokenCountAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitTokenCountAnalyzer")
            .field("delegate", &self.delegate.name())
            .field("max_token_count", &self.max_token_count)
            .field("consume_all_tokens", &self.consume_all_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::language::english::EnglishAnalyzer;
    use crate::analysis::version::Version;

    #[test]
    fn test_limit_applies_after_filtering() {
        let english = Arc::new(EnglishAnalyzer::new(Version::LATEST).unwrap());
        for consume_all in [false, true] {
            let analyzer = LimitTokenCountAnalyzer::new(english.clone(), 2, consume_all);
            let output = analyzer
                .analyze_output("body", "the cats and the dogs are running")
                .unwrap();
            assert_eq!(output.terms(), vec!["cat", "dog"]);
            assert_eq!(output.final_offset, 33);
        }
    }

    #[test]
    fn test_zero_limit() {
        let english = Arc::new(EnglishAnalyzer::new(Version::LATEST).unwrap());
        let analyzer = LimitTokenCountAnalyzer::new(english, 0, false);
        let output = analyzer.analyze_output("body", "cats").unwrap();
        assert!(output.tokens.is_empty());
        assert_eq!(output.final_offset, 4);
    }

    #[test]
    fn test_accessors() {
        let english = Arc::new(EnglishAnalyzer::new(Version::LATEST).unwrap());
        let analyzer = LimitTokenCountAnalyzer::new(english, 5, true);
        assert_eq!(analyzer.max_token_count(), 5);
        assert!(analyzer.consume_all_tokens());
        assert_eq!(analyzer.delegate().name(), "english");
        assert_eq!(analyzer.name(), "limit_token_count");
    }
}
