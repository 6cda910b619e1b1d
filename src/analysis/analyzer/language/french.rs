use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::{PipelineAnalyzer, PipelineDescription};
use crate::analysis::analyzer::template::{template, AnalyzerKind};
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token_stream::BoxTokenStream;
use crate::analysis::version::Version;
use crate::error::Result;

/// French analyzer: elision stripping, lowercasing, stop words and stemming.
///
/// Up to 1.0 the stop set was matched before lowercasing and stemming ran on
/// the original case; 1.5 moved lowercasing first and added elision. From
/// 2.0 on the light minimal stemmer replaces Snowball.
#[derive(Clone, Debug)]
pub struct FrenchAnalyzer {
    version: Version,
    inner: PipelineAnalyzer,
}

impl FrenchAnalyzer {
    pub fn new(version: Version) -> Result<Self> {
        Self::with_sets(version, None, None)
    }

    pub fn with_sets(
        version: Version,
        stop_words: Option<Arc<CharArraySet>>,
        exclusions: Option<Arc<CharArraySet>>,
    ) -> Result<Self> {
        let template = template(AnalyzerKind::French, version);
        let description = PipelineDescription::resolve(template, stop_words, exclusions)?;
        Ok(FrenchAnalyzer {
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

impl Analyzer for FrenchAnalyzer {
    fn create_stream(&self, field: &str) -> Result<BoxTokenStream> {
        self.inner.create_stream(field)
    }

    fn name(&self) -> &'static str {
        "french"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
