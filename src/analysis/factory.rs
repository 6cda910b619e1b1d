//! Construction of tokenizers, filters and whole pipelines by name.
//!
//! Every stage is described by a name and a string map of parameters
//! ([`FilterArgs`]). Keys the stage does not accept are reported, all of them
//! at once, as a single [`StemmaError::Configuration`] before any value is
//! parsed. Recognized keys are then consumed as the stage is built.
//!
//! Word-set parameters, shared by `stop`, `keyword_marker` and `elision`:
//!
//! | key           | meaning                                             |
//! |---------------|-----------------------------------------------------|
//! | `words`       | comma separated entries                             |
//! | `path`        | word list file                                      |
//! | `set`         | a bundled set, e.g. `english_stop`                  |
//! | `format`      | `plain` (default) or `snowball`, for `path`         |
//! | `ignore_case` | fold case on lookup (default `false`)               |
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::analyzer::analyzer::Analyzer;
//! use stemma::analysis::factory::CustomAnalyzerConfig;
//!
//! let config = CustomAnalyzerConfig::from_json(r#"{
//!     "name": "short_words",
//!     "tokenizer": { "type": "whitespace" },
//!     "filters": [
//!         { "type": "lowercase" },
//!         { "type": "length", "min": 1, "max": 5 },
//!         { "type": "stop", "words": "and,or" }
//!     ]
//! }"#).unwrap();
//! let analyzer = config.build().unwrap();
//!
//! let tokens = analyzer.analyze("body", "Cats and Elephants").unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "cats");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::{PipelineAnalyzer, PipelineDescription, StageSpec, TokenizerSpec};
use crate::analysis::analyzer::template::StemmerKind;
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::token_filter::stem::Language;
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::analysis::tokenizer::standard::{DEFAULT_MAX_TOKEN_LENGTH, MAX_TOKEN_LENGTH_LIMIT};
use crate::analysis::word_list::{load_words, DefaultSet, WordListFormat};
use crate::error::{Result, StemmaError};

/// Tokenizer names understood by [`tokenizer_spec`].
pub const TOKENIZER_NAMES: [&str; 4] = ["standard", "whitespace", "whole", "regex"];

/// Filter names understood by [`stage_spec`].
pub const FILTER_NAMES: [&str; 10] = [
    "length",
    "limit",
    "stop",
    "keyword_marker",
    "elision",
    "lowercase",
    "english_possessive",
    "porter_stem",
    "french_minimal_stem",
    "snowball",
];

const WORD_SET_KEYS: &[&str] = &["words", "path", "set", "format", "ignore_case"];

/// Parameter keys each tokenizer accepts.
fn tokenizer_keys(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "standard" => Some(&["max_token_length"]),
        "whitespace" | "whole" => Some(&[]),
        "regex" => Some(&["pattern", "gaps"]),
        _ => None,
    }
}

/// Parameter keys each filter accepts.
fn filter_keys(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "length" => Some(&["min", "max", "preserve_increments"]),
        "limit" => Some(&["max_token_count", "consume_all_tokens"]),
        "stop" | "keyword_marker" | "elision" => Some(WORD_SET_KEYS),
        "snowball" => Some(&["language"]),
        "lowercase" | "english_possessive" | "porter_stem" | "french_minimal_stem" => Some(&[]),
        _ => None,
    }
}

/// A custom pipeline is a [`PipelineAnalyzer`] built from configuration.
pub type CustomAnalyzer = PipelineAnalyzer;

/// Parameters of one named stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterArgs {
    stage: String,
    args: BTreeMap<String, String>,
}

impl FilterArgs {
    pub fn new<S: Into<String>>(stage: S) -> Self {
        FilterArgs {
            stage: stage.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn from_map<S, I, K, V>(stage: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FilterArgs {
            stage: stage.into(),
            args: args.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Add a parameter.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Name of the stage these parameters are for.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Remove and return a parameter.
    pub fn take_str(&mut self, key: &str) -> Option<String> {
        self.args.remove(key)
    }

    /// Remove an integer parameter, which must lie in `range`.
    pub fn get_usize(&mut self, key: &str, default: usize, range: RangeInclusive<usize>) -> Result<usize> {
        match self.take_str(key) {
            Some(value) => self.parse_usize(key, &value, range),
            None => Ok(default),
        }
    }

    /// Like [`get_usize`](Self::get_usize), for a parameter without default.
    pub fn require_usize(&mut self, key: &str, range: RangeInclusive<usize>) -> Result<usize> {
        match self.take_str(key) {
            Some(value) => self.parse_usize(key, &value, range),
            None => Err(self.missing(key)),
        }
    }

    /// Remove a boolean parameter (`true` or `false`).
    pub fn get_bool(&mut self, key: &str, default: bool) -> Result<bool> {
        match self.take_str(key) {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(StemmaError::configuration(format!(
                    "{}: '{key}' must be true or false, got '{value}'",
                    self.stage
                ))),
            },
            None => Ok(default),
        }
    }

    /// Fail, listing every offending key, if any parameter is not in `known`.
    pub fn check_keys(&self, known: &[&str]) -> Result<()> {
        let unknown: Vec<&str> = self
            .args
            .keys()
            .map(String::as_str)
            .filter(|key| !known.contains(key))
            .collect();
        self.unknown(&unknown)
    }

    /// Fail if any parameter was not consumed.
    pub fn finish(self) -> Result<()> {
        let unknown: Vec<&str> = self.args.keys().map(String::as_str).collect();
        self.unknown(&unknown)
    }

    fn unknown(&self, keys: &[&str]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        Err(StemmaError::configuration(format!(
            "{}: unknown parameters: {}",
            self.stage,
            keys.join(", ")
        )))
    }

    fn parse_usize(&self, key: &str, value: &str, range: RangeInclusive<usize>) -> Result<usize> {
        let parsed: i128 = value.trim().parse().map_err(|_| {
            StemmaError::configuration(format!("{}: '{key}' is not an integer: '{value}'", self.stage))
        })?;
        if parsed < 0 {
            return Err(StemmaError::configuration(format!(
                "{}: '{key}' must not be negative, got {parsed}",
                self.stage
            )));
        }
        match usize::try_from(parsed) {
            Ok(n) if range.contains(&n) => Ok(n),
            _ => Err(StemmaError::configuration(format!(
                "{}: '{key}' must be in {}..={}, got {parsed}",
                self.stage,
                range.start(),
                range.end()
            ))),
        }
    }

    fn missing(&self, key: &str) -> StemmaError {
        StemmaError::configuration(format!("{}: missing required parameter '{key}'", self.stage))
    }

    /// Consume the word-set keys. Falls back to `default` when no source is
    /// given, and fails when there is neither.
    fn word_set(&mut self, default: Option<DefaultSet>) -> Result<Arc<CharArraySet>> {
        let ignore_case = self.get_bool("ignore_case", false)?;
        let format = match self.take_str("format") {
            Some(format) => format.parse()?,
            None => WordListFormat::default(),
        };
        let words = self.take_str("words");
        let path = self.take_str("path");
        let bundled = match self.take_str("set") {
            Some(name) => Some(name.parse::<DefaultSet>()?),
            None => None,
        };

        if words.is_none() && path.is_none() {
            return match bundled.or(default) {
                Some(set) if !ignore_case => set.load(),
                Some(set) => {
                    let loaded = set.load()?;
                    Ok(Arc::new(CharArraySet::from_words(loaded.iter(), true).unmodifiable()))
                }
                None => Err(StemmaError::configuration(format!(
                    "{}: one of 'words', 'path' or 'set' is required",
                    self.stage
                ))),
            };
        }

        let mut set = CharArraySet::new(ignore_case);
        if let Some(bundled) = bundled {
            set.add_all(bundled.load()?.iter())?;
        }
        if let Some(path) = path {
            let file = fs::File::open(&path).map_err(|e| {
                StemmaError::resource(format!("{}: cannot open word list {path}: {e}", self.stage))
            })?;
            load_words(std::io::BufReader::new(file), format, &mut set)?;
        }
        if let Some(words) = words {
            set.add_all(words.split(',').map(str::trim).filter(|w| !w.is_empty()))?;
        }
        debug!("{}: built word set with {} entries", self.stage, set.len());
        Ok(Arc::new(set.unmodifiable()))
    }
}

/// Build a tokenizer spec from its name and parameters.
///
/// - `standard`: `max_token_length` (1..=1048576, default 255)
/// - `whitespace`, `whole`: no parameters
/// - `regex`: `pattern` (default `\w+`), `gaps` (default `false`)
pub fn tokenizer_spec(mut args: FilterArgs) -> Result<TokenizerSpec> {
    let stage = args.stage().to_string();
    if let Some(known) = tokenizer_keys(&stage) {
        args.check_keys(known)?;
    }
    let spec = match stage.as_str() {
        "standard" => {
            let max = args.get_usize("max_token_length", DEFAULT_MAX_TOKEN_LENGTH, 1..=MAX_TOKEN_LENGTH_LIMIT)?;
            TokenizerSpec::standard_with_max(max)?
        }
        "whitespace" => TokenizerSpec::Whitespace,
        "whole" => TokenizerSpec::Whole,
        "regex" => {
            let pattern = args.take_str("pattern").unwrap_or_else(|| DEFAULT_PATTERN.to_string());
            let gaps = args.get_bool("gaps", false)?;
            TokenizerSpec::regex(&pattern, gaps)?
        }
        other => {
            return Err(StemmaError::configuration(format!(
                "unknown tokenizer '{other}' (expected one of: {})",
                TOKENIZER_NAMES.join(", ")
            )));
        }
    };
    args.finish()?;
    Ok(spec)
}

/// Build a filter stage spec from its name and parameters.
///
/// - `length`: `min` (default 0), `max` (required), `preserve_increments`
///   (default `true`)
/// - `limit`: `max_token_count` (required), `consume_all_tokens` (default `false`)
/// - `stop`: word-set keys, default the current English list
/// - `keyword_marker`: word-set keys, required
/// - `elision`: word-set keys, default the French articles
/// - `snowball`: `language` (default `english`)
/// - `lowercase`, `english_possessive`, `porter_stem`, `french_minimal_stem`:
///   no parameters
pub fn stage_spec(mut args: FilterArgs) -> Result<StageSpec> {
    let stage = args.stage().to_string();
    if let Some(known) = filter_keys(&stage) {
        args.check_keys(known)?;
    }
    let spec = match stage.as_str() {
        "length" => {
            let min = args.get_usize("min", 0, 0..=usize::MAX)?;
            let max = args.require_usize("max", 0..=usize::MAX)?;
            let preserve = args.get_bool("preserve_increments", true)?;
            StageSpec::length(min, max, preserve)?
        }
        "limit" => {
            let max_token_count = args.require_usize("max_token_count", 0..=usize::MAX)?;
            let consume_all = args.get_bool("consume_all_tokens", false)?;
            StageSpec::limit(max_token_count, consume_all)
        }
        "stop" => StageSpec::Stop(args.word_set(Some(DefaultSet::EnglishStop))?),
        "keyword_marker" => StageSpec::KeywordMarker(args.word_set(None)?),
        "elision" => StageSpec::Elision(args.word_set(Some(DefaultSet::FrenchArticles))?),
        "lowercase" => StageSpec::Lowercase,
        "english_possessive" => StageSpec::EnglishPossessive,
        "porter_stem" => StageSpec::Stem(StemmerKind::Porter),
        "french_minimal_stem" => StageSpec::Stem(StemmerKind::FrenchMinimal),
        "snowball" => {
            let language = match args.take_str("language") {
                Some(name) => name.parse::<Language>()?,
                None => Language::default(),
            };
            StageSpec::Stem(StemmerKind::Snowball(language))
        }
        other => {
            return Err(StemmaError::configuration(format!(
                "unknown filter '{other}' (expected one of: {})",
                FILTER_NAMES.join(", ")
            )));
        }
    };
    args.finish()?;
    Ok(spec)
}

/// One stage of a [`CustomAnalyzerConfig`]: a `type` plus its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(rename = "type")]
    pub kind: String,

    /// Every other field; scalars are passed on as strings.
    #[serde(flatten)]
    pub args: BTreeMap<String, serde_json::Value>,
}

impl StageConfig {
    pub fn new<S: Into<String>>(kind: S) -> Self {
        StageConfig {
            kind: kind.into(),
            args: BTreeMap::new(),
        }
    }

    fn to_args(&self) -> Result<FilterArgs> {
        let mut args = FilterArgs::new(self.kind.as_str());
        for (key, value) in &self.args {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Array(items) => {
                    let words: Option<Vec<&str>> = items.iter().map(serde_json::Value::as_str).collect();
                    match words {
                        Some(words) => words.join(","),
                        None => return Err(self.bad_value(key)),
                    }
                }
                serde_json::Value::Null | serde_json::Value::Object(_) => return Err(self.bad_value(key)),
            };
            args = args.with(key.as_str(), text);
        }
        Ok(args)
    }

    fn bad_value(&self, key: &str) -> StemmaError {
        StemmaError::configuration(format!(
            "{}: '{key}' must be a string, number, boolean or list of strings",
            self.kind
        ))
    }
}

fn default_name() -> String {
    "custom".to_string()
}

/// A whole pipeline in JSON form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomAnalyzerConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub tokenizer: StageConfig,
    #[serde(default)]
    pub filters: Vec<StageConfig>,
}

impl CustomAnalyzerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            StemmaError::configuration(format!("cannot read analyzer config {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Resolve every stage into a description.
    pub fn description(&self) -> Result<PipelineDescription> {
        let tokenizer = tokenizer_spec(self.tokenizer.to_args()?)?;
        let mut description = PipelineDescription::new(self.name.as_str(), tokenizer);
        for filter in &self.filters {
            description.push_stage(stage_spec(filter.to_args()?)?);
        }
        debug!("built custom analyzer '{}': {}", self.name, description);
        Ok(description)
    }

    pub fn build(&self) -> Result<CustomAnalyzer> {
        Ok(PipelineAnalyzer::new(self.description()?))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::analyzer::analyzer::Analyzer;

    #[test]
    fn test_unknown_keys_are_listed_together() {
        let args = FilterArgs::new("lowercase").with("zeta", "1").with("alpha", "2");
        let err = stage_spec(args).unwrap_err();
        assert!(matches!(err, StemmaError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: lowercase: unknown parameters: alpha, zeta"
        );
    }

    #[test]
    fn test_unknown_keys_reported_before_bad_values() {
        let args = FilterArgs::new("length")
            .with("max", "ten")
            .with("mni", "1")
            .with("maximum", "9");
        let err = stage_spec(args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: length: unknown parameters: maximum, mni"
        );

        let args = FilterArgs::new("regex").with("gaps", "maybe").with("flags", "i");
        let err = tokenizer_spec(args).unwrap_err();
        assert!(err.to_string().ends_with("regex: unknown parameters: flags"));

        let args = FilterArgs::new("stop").with("set", "klingon").with("case", "true");
        assert!(stage_spec(args).unwrap_err().to_string().ends_with("stop: unknown parameters: case"));
    }

    #[test]
    fn test_integer_parameters() {
        let negative = FilterArgs::new("limit").with("max_token_count", "-1");
        assert!(stage_spec(negative).unwrap_err().to_string().contains("must not be negative"));

        let garbage = FilterArgs::new("length").with("max", "ten");
        assert!(stage_spec(garbage).unwrap_err().to_string().contains("not an integer"));

        let too_long = FilterArgs::new("standard").with("max_token_length", "0");
        assert!(tokenizer_spec(too_long).unwrap_err().to_string().contains("must be in 1..="));

        let missing = FilterArgs::new("limit");
        assert!(stage_spec(missing).unwrap_err().to_string().contains("max_token_count"));
    }

    #[test]
    fn test_length_bounds_checked() {
        let args = FilterArgs::from_map("length", [("min", "5"), ("max", "2")]);
        assert!(matches!(stage_spec(args), Err(StemmaError::InvalidArgument(_))));

        let args = FilterArgs::from_map("length", [("max", "2"), ("preserve_increments", "false")]);
        match stage_spec(args).unwrap() {
            StageSpec::Length {
                min,
                max,
                preserve_increments,
            } => {
                assert_eq!((min, max, preserve_increments), (0, 2, false));
            }
            other => panic!("unexpected stage {other:?}"),
        }
    }

    #[test]
    fn test_word_sets() {
        let args = FilterArgs::from_map("stop", [("words", "Foo, bar,,"), ("ignore_case", "true")]);
        let StageSpec::Stop(set) = stage_spec(args).unwrap() else {
            panic!("expected a stop stage");
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains("FOO"));
        assert!(set.is_read_only());

        let StageSpec::Stop(default) = stage_spec(FilterArgs::new("stop")).unwrap() else {
            panic!("expected a stop stage");
        };
        assert!(Arc::ptr_eq(&default, &DefaultSet::EnglishStop.load().unwrap()));

        let args = FilterArgs::new("stop").with("set", "french_stop");
        let StageSpec::Stop(french) = stage_spec(args).unwrap() else {
            panic!("expected a stop stage");
        };
        assert!(french.contains("avec"));

        assert!(stage_spec(FilterArgs::new("keyword_marker")).is_err());
        assert!(stage_spec(FilterArgs::new("stop").with("set", "klingon")).is_err());
    }

    #[test]
    fn test_word_set_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, " | comment\nalpha beta | trailing\ngamma").unwrap();

        let args = FilterArgs::new("keyword_marker")
            .with("path", file.path().to_string_lossy())
            .with("format", "snowball");
        let StageSpec::KeywordMarker(set) = stage_spec(args).unwrap() else {
            panic!("expected a keyword marker stage");
        };
        let mut words: Vec<_> = set.iter().collect();
        words.sort_unstable();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);

        let missing = FilterArgs::new("stop").with("path", "/nonexistent/words.txt");
        assert!(matches!(stage_spec(missing), Err(StemmaError::Resource(_))));
    }

    #[test]
    fn test_unknown_names() {
        assert!(stage_spec(FilterArgs::new("synonym")).unwrap_err().to_string().contains("unknown filter"));
        assert!(tokenizer_spec(FilterArgs::new("ngram")).unwrap_err().to_string().contains("unknown tokenizer"));
        for name in FILTER_NAMES {
            let args = match name {
                "length" => FilterArgs::new(name).with("max", "10"),
                "limit" => FilterArgs::new(name).with("max_token_count", "10"),
                "keyword_marker" => FilterArgs::new(name).with("words", "x"),
                _ => FilterArgs::new(name),
            };
            assert_eq!(stage_spec(args).unwrap().name(), name);
        }
        for name in TOKENIZER_NAMES {
            assert_eq!(tokenizer_spec(FilterArgs::new(name)).unwrap().name(), name);
        }
    }

    #[test]
    fn test_custom_analyzer_config() {
        let config = CustomAnalyzerConfig::from_json(
            r#"{
                "tokenizer": { "type": "regex", "pattern": "[a-z]+", "gaps": false },
                "filters": [
                    { "type": "keyword_marker", "words": ["running"] },
                    { "type": "snowball", "language": "english" },
                    { "type": "limit", "max_token_count": 2 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.name, "custom");

        let analyzer = config.build().unwrap();
        assert_eq!(
            analyzer.description().stage_names(),
            vec!["keyword_marker", "snowball", "limit"]
        );
        let output = analyzer.analyze_output("body", "running jumping walking").unwrap();
        assert_eq!(output.terms(), vec!["running", "jump"]);
        assert_eq!(output.final_offset, 23);
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(CustomAnalyzerConfig::from_json("{"), Err(StemmaError::Json(_))));
        assert!(matches!(
            CustomAnalyzerConfig::from_json(r#"{"tokenizer": {"type": "whole"}, "extra": 1}"#),
            Err(StemmaError::Json(_))
        ));

        let nested = CustomAnalyzerConfig::from_json(
            r#"{"tokenizer": {"type": "whole"}, "filters": [{"type": "lowercase", "x": {}}]}"#,
        )
        .unwrap();
        assert!(matches!(nested.build(), Err(StemmaError::Configuration(_))));
    }
}
