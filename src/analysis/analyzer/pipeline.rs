//! Pipeline descriptions and the analyzer built on them.
//!
//! A [`PipelineDescription`] is a fully resolved chain: a tokenizer spec and
//! an ordered list of stage specs, each carrying its concrete parameters and
//! word sets. It is immutable and cheap to share; every call to
//! [`PipelineDescription::instantiate`] builds fresh stage objects, so one
//! description serves any number of concurrent runs.
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::analyzer::analyzer::Analyzer;
//! use stemma::analysis::analyzer::pipeline::{PipelineAnalyzer, PipelineDescription, StageSpec, TokenizerSpec};
//!
//! let description = PipelineDescription::new("shouting", TokenizerSpec::Whitespace)
//!     .with_stage(StageSpec::length(2, 10, true).unwrap())
//!     .with_stage(StageSpec::Lowercase);
//! let analyzer = PipelineAnalyzer::new(description);
//!
//! let tokens = analyzer.analyze("body", "HELLO a WORLD").unwrap();
//! let terms: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(terms, vec!["hello", "world"]);
//! assert_eq!(tokens[1].position_increment, 2);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::template::{PipelineTemplate, StageKind, StemmerKind, TokenizerKind};
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token_filter::stem::{FrenchMinimalStemmer, PorterStemmer, SnowballStemmer};
use crate::analysis::token_filter::{
    ElisionFilter, EnglishPossessiveFilter, KeywordMarkerFilter, LengthFilter, LimitTokenCountFilter,
    LowercaseFilter, StemFilter, StopFilter,
};
use crate::analysis::token_stream::BoxTokenStream;
use crate::analysis::tokenizer::standard::DEFAULT_MAX_TOKEN_LENGTH;
use crate::analysis::tokenizer::{regex as regex_tokenizer, RegexTokenizer, StandardTokenizer, WhitespaceTokenizer, WholeTokenizer};
use crate::error::{Result, StemmaError};

/// The source of a chain.
#[derive(Clone, Debug)]
pub enum TokenizerSpec {
    Standard { max_token_length: usize },
    Whitespace,
    Whole,
    Regex { pattern: Arc<Regex>, gaps: bool },
}

impl TokenizerSpec {
    /// Standard tokenizer with the default maximum token length.
    pub fn standard() -> Self {
        TokenizerSpec::Standard {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }

    /// Standard tokenizer with a custom maximum token length.
    pub fn standard_with_max(max_token_length: usize) -> Result<Self> {
        // validates the bound
        StandardTokenizer::with_max_token_length(max_token_length)?;
        Ok(TokenizerSpec::Standard { max_token_length })
    }

    /// Regex tokenizer; the pattern is compiled once and shared by every chain.
    pub fn regex(pattern: &str, gaps: bool) -> Result<Self> {
        Ok(TokenizerSpec::Regex {
            pattern: Arc::new(regex_tokenizer::compile(pattern)?),
            gaps,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenizerSpec::Standard { .. } => "standard",
            TokenizerSpec::Whitespace => "whitespace",
            TokenizerSpec::Whole => "whole",
            TokenizerSpec::Regex { .. } => "regex",
        }
    }

    fn build(&self) -> Result<BoxTokenStream> {
        Ok(match self {
            TokenizerSpec::Standard { max_token_length } => {
                Box::new(StandardTokenizer::with_max_token_length(*max_token_length)?)
            }
            TokenizerSpec::Whitespace => Box::new(WhitespaceTokenizer::new()),
            TokenizerSpec::Whole => Box::new(WholeTokenizer::new()),
            TokenizerSpec::Regex { pattern, gaps } => {
                Box::new(RegexTokenizer::from_regex(Arc::clone(pattern), *gaps))
            }
        })
    }
}

impl From<TokenizerKind> for TokenizerSpec {
    fn from(kind: TokenizerKind) -> Self {
        match kind {
            TokenizerKind::Standard => TokenizerSpec::standard(),
        }
    }
}

/// A filter stage with its resolved parameters.
#[derive(Clone, Debug)]
pub enum StageSpec {
    Length {
        min: usize,
        max: usize,
        preserve_increments: bool,
    },
    Limit {
        max_token_count: usize,
        consume_all: bool,
    },
    Stop(Arc<CharArraySet>),
    KeywordMarker(Arc<CharArraySet>),
    Elision(Arc<CharArraySet>),
    Lowercase,
    EnglishPossessive,
    Stem(StemmerKind),
}

impl StageSpec {
    /// A length stage. Fails if `min > max`.
    pub fn length(min: usize, max: usize, preserve_increments: bool) -> Result<Self> {
        if min > max {
            return Err(StemmaError::invalid_argument(format!(
                "length filter: min ({min}) must not be greater than max ({max})"
            )));
        }
        Ok(StageSpec::Length {
            min,
            max,
            preserve_increments,
        })
    }

    pub fn limit(max_token_count: usize, consume_all: bool) -> Self {
        StageSpec::Limit {
            max_token_count,
            consume_all,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StageSpec::Length { .. } => "length",
            StageSpec::Limit { .. } => "limit",
            StageSpec::Stop(_) => "stop",
            StageSpec::KeywordMarker(_) => "keyword_marker",
            StageSpec::Elision(_) => "elision",
            StageSpec::Lowercase => "lowercase",
            StageSpec::EnglishPossessive => "english_possessive",
            StageSpec::Stem(StemmerKind::Porter) => "porter_stem",
            StageSpec::Stem(StemmerKind::FrenchMinimal) => "french_minimal_stem",
            StageSpec::Stem(StemmerKind::Snowball(_)) => "snowball",
        }
    }

    /// Wrap `inner` in a new instance of this stage.
    fn wrap(&self, inner: BoxTokenStream) -> Result<BoxTokenStream> {
        Ok(match self {
            StageSpec::Length {
                min,
                max,
                preserve_increments,
            } => Box::new(LengthFilter::new(inner, *min, *max, *preserve_increments)?),
            StageSpec::Limit {
                max_token_count,
                consume_all,
            } => Box::new(LimitTokenCountFilter::new(inner, *max_token_count, *consume_all)),
            StageSpec::Stop(set) => Box::new(StopFilter::new(inner, Arc::clone(set))),
            StageSpec::KeywordMarker(set) => Box::new(KeywordMarkerFilter::new(inner, Arc::clone(set))),
            StageSpec::Elision(set) => Box::new(ElisionFilter::new(inner, Arc::clone(set))),
            StageSpec::Lowercase => Box::new(LowercaseFilter::new(inner)),
            StageSpec::EnglishPossessive => Box::new(EnglishPossessiveFilter::new(inner)),
            StageSpec::Stem(StemmerKind::Porter) => Box::new(StemFilter::new(inner, PorterStemmer::new())),
            StageSpec::Stem(StemmerKind::FrenchMinimal) => {
                Box::new(StemFilter::new(inner, FrenchMinimalStemmer::new()))
            }
            StageSpec::Stem(StemmerKind::Snowball(language)) => {
                Box::new(StemFilter::new(inner, SnowballStemmer::new(*language)))
            }
        })
    }
}

/// A resolved, immutable chain description.
#[derive(Clone, Debug)]
pub struct PipelineDescription {
    name: String,
    tokenizer: TokenizerSpec,
    stages: Vec<StageSpec>,
}

impl PipelineDescription {
    /// An empty chain over the given tokenizer.
    pub fn new<S: Into<String>>(name: S, tokenizer: TokenizerSpec) -> Self {
        PipelineDescription {
            name: name.into(),
            tokenizer,
            stages: Vec::new(),
        }
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn push_stage(&mut self, stage: StageSpec) {
        self.stages.push(stage);
    }

    /// Fill a template's slots with concrete sets.
    ///
    /// `stopwords` replaces the template's default stop set. The keyword
    /// marker slot is kept only when `exclusions` is given and non-empty.
    /// Default sets are loaded (once per process) on first use.
    pub fn resolve(
        template: &PipelineTemplate,
        stopwords: Option<Arc<CharArraySet>>,
        exclusions: Option<Arc<CharArraySet>>,
    ) -> Result<Self> {
        let exclusions = exclusions.filter(|set| !set.is_empty());
        let mut description = PipelineDescription::new(template.kind.as_str(), template.tokenizer.into());

        for stage in template.stages {
            let spec = match *stage {
                StageKind::Length {
                    min,
                    max,
                    preserve_increments,
                } => StageSpec::length(min, max, preserve_increments)?,
                StageKind::Lowercase => StageSpec::Lowercase,
                StageKind::EnglishPossessive => StageSpec::EnglishPossessive,
                StageKind::Elision(articles) => StageSpec::Elision(articles.load()?),
                StageKind::Stop(default) => match &stopwords {
                    Some(set) => StageSpec::Stop(Arc::clone(set)),
                    None => StageSpec::Stop(default.load()?),
                },
                StageKind::KeywordMarker => match &exclusions {
                    Some(set) => StageSpec::KeywordMarker(Arc::clone(set)),
                    None => continue,
                },
                StageKind::Stem(stemmer) => StageSpec::Stem(stemmer),
            };
            description.stages.push(spec);
        }

        debug!(
            "resolved {} analyzer (since {}): {}",
            template.kind, template.since, description
        );
        Ok(description)
    }

    /// Build a fresh chain. The caller binds an input and resets it.
    pub fn instantiate(&self) -> Result<BoxTokenStream> {
        let mut stream = self.tokenizer.build()?;
        for stage in &self.stages {
            stream = stage.wrap(stream)?;
        }
        Ok(stream)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokenizer(&self) -> &TokenizerSpec {
        &self.tokenizer
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Names of the filter stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(StageSpec::name).collect()
    }
}

impl fmt::Display for PipelineDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tokenizer.name())?;
        for stage in &self.stages {
            write!(f, " -> {}", stage.name())?;
        }
        Ok(())
    }
}

/// An analyzer running the chain of a [`PipelineDescription`].
#[derive(Clone, Debug)]
pub struct PipelineAnalyzer {
    description: Arc<PipelineDescription>,
}

impl PipelineAnalyzer {
    pub fn new(description: PipelineDescription) -> Self {
        PipelineAnalyzer {
            description: Arc::new(description),
        }
    }

    pub fn description(&self) -> &PipelineDescription {
        &self.description
    }
}

impl Analyzer for PipelineAnalyzer {
    fn create_stream(&self, _field: &str) -> Result<BoxTokenStream> {
        self.description.instantiate()
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
