//! Per-field analyzer.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token_stream::BoxTokenStream;
use crate::error::Result;

/// A per-field analyzer that applies different analyzers to different fields.
///
/// Fields without an entry use the default analyzer. Reuse a single instance
/// with `Arc::clone` when several fields share an analyzer; its default sets
/// are then resolved once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use stemma::analysis::analyzer::analyzer::Analyzer;
/// use stemma::analysis::analyzer::language::french::FrenchAnalyzer;
/// use stemma::analysis::analyzer::per_field::PerFieldAnalyzer;
/// use stemma::analysis::analyzer::standard::StandardAnalyzer;
/// use stemma::analysis::version::Version;
///
/// let french: Arc<dyn Analyzer> = Arc::new(FrenchAnalyzer::new(Version::LATEST).unwrap());
/// let mut analyzer = PerFieldAnalyzer::new(Arc::new(StandardAnalyzer::new(Version::LATEST).unwrap()));
/// analyzer.add_analyzer("title_fr", Arc::clone(&french));
/// analyzer.add_analyzer("body_fr", Arc::clone(&french));
///
/// let tokens = analyzer.analyze("title_fr", "les chevaux").unwrap();
/// assert_eq!(tokens[0].text, "cheval");
/// ```
#[derive(Clone)]
pub struct PerFieldAnalyzer {
    /// Default analyzer for fields not in the map.
    default_analyzer: Arc<dyn Analyzer>,

    /// Map of field names to their specific analyzers.
    field_analyzers: AHashMap<String, Arc<dyn Analyzer>>,
}

impl PerFieldAnalyzer {
    /// Create a new per-field analyzer with a default analyzer.
    pub fn new(default_analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            default_analyzer,
            field_analyzers: AHashMap::new(),
        }
    }

    /// Add a field-specific analyzer.
    pub fn add_analyzer(&mut self, field: impl Into<String>, analyzer: Arc<dyn Analyzer>) {
        self.field_analyzers.insert(field.into(), analyzer);
    }

    /// Get the analyzer for a specific field.
    pub fn get_analyzer(&self, field: &str) -> &Arc<dyn Analyzer> {
        self.field_analyzers
            .get(field)
            .unwrap_or(&self.default_analyzer)
    }

    /// Get the default analyzer.
    pub fn default_analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.default_analyzer
    }
}

impl Analyzer for PerFieldAnalyzer {
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream> {
        self.get_analyzer(field).create_stream(field)
    }

    fn name(&self) -> &'static str {
        "per_field"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl fmt::Debug for PerFieldAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self
            .field_analyzers
            .iter()
            .map(|(field, analyzer)| (field.as_str(), analyzer.name()))
            .collect();
        fields.sort_unstable();
        f.debug_struct("PerFieldAnalyzer")
            .field("default_analyzer", &self.default_analyzer.name())
            .field("field_analyzers", &fields)
            .finish()
    }
}
