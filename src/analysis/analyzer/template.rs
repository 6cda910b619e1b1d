//! Version-gated pipeline templates.
//!
//! Which stages an analyzer runs, and in what order, depends on the
//! compatibility version it was created for. The whole history lives in one
//! static table: each row says "from version `since` on, analyzer `kind`
//! runs this tokenizer followed by these stages". [`template`] picks the row
//! with the greatest `since` not newer than the requested version.
//!
//! Looking a template up does no IO and builds no stream; default word sets
//! are only named here and loaded when a template is resolved into a
//! [`PipelineDescription`](super::pipeline::PipelineDescription).
//!
//! # Examples
//!
//! ```
//! use stemma::analysis::analyzer::template::{template, AnalyzerKind, StageKind, StemmerKind};
//! use stemma::analysis::version::Version;
//!
//! let english = template(AnalyzerKind::English, Version::V1_5);
//! assert_eq!(english.since, Version::V1_5);
//! assert_eq!(english.stages.last(), Some(&StageKind::Stem(StemmerKind::Porter)));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stem::Language;
use crate::analysis::version::Version;
use crate::analysis::word_list::DefaultSet;
use crate::error::{Result, StemmaError};

/// Maximum token length used by the standard analyzer's length stage.
pub const STANDARD_MAX_TOKEN_LENGTH: usize = 255;

/// The built-in analyzers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    Standard,
    English,
    French,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 3] = [AnalyzerKind::Standard, AnalyzerKind::English, AnalyzerKind::French];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalyzerKind::Standard => "standard",
            AnalyzerKind::English => "english",
            AnalyzerKind::French => "french",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        AnalyzerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| StemmaError::configuration(format!("unknown analyzer '{s}'")))
    }
}

/// Tokenizer a template starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenizerKind {
    Standard,
}

/// Stemming algorithm of a stem stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemmerKind {
    Porter,
    FrenchMinimal,
    Snowball(Language),
}

impl fmt::Display for StemmerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StemmerKind::Porter => f.write_str("porter_stem"),
            StemmerKind::FrenchMinimal => f.write_str("french_minimal_stem"),
            StemmerKind::Snowball(language) => write!(f, "snowball({language})"),
        }
    }
}

/// One stage slot of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    Length {
        min: usize,
        max: usize,
        preserve_increments: bool,
    },
    Lowercase,
    EnglishPossessive,
    /// Elision over the given article set.
    Elision(DefaultSet),
    /// Stop word removal; the set is used unless the caller supplies one.
    Stop(DefaultSet),
    /// Keyword marking with the caller's exclusion set; dropped when the set
    /// is empty.
    KeywordMarker,
    Stem(StemmerKind),
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Length {
                min,
                max,
                preserve_increments,
            } => {
                let mode = if *preserve_increments { "preserving" } else { "legacy" };
                write!(f, "length({min}..={max}, {mode})")
            }
            StageKind::Lowercase => f.write_str("lowercase"),
            StageKind::EnglishPossessive => f.write_str("english_possessive"),
            StageKind::Elision(set) => write!(f, "elision({})", set.name()),
            StageKind::Stop(set) => write!(f, "stop({})", set.name()),
            StageKind::KeywordMarker => f.write_str("keyword_marker"),
            StageKind::Stem(stemmer) => write!(f, "{stemmer}"),
        }
    }
}

/// A static description of an analyzer's chain for a range of versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineTemplate {
    pub kind: AnalyzerKind,
    /// First version this template applies to.
    pub since: Version,
    pub tokenizer: TokenizerKind,
    pub stages: &'static [StageKind],
}

impl PipelineTemplate {
    /// Display names of the stages, in order.
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(ToString::to_string).collect()
    }
}

const fn row(
    kind: AnalyzerKind,
    since: Version,
    stages: &'static [StageKind],
) -> PipelineTemplate {
    PipelineTemplate {
        kind,
        since,
        tokenizer: TokenizerKind::Standard,
        stages,
    }
}

const STANDARD_LENGTH_LEGACY: StageKind = StageKind::Length {
    min: 0,
    max: STANDARD_MAX_TOKEN_LENGTH,
    preserve_increments: false,
};

const STANDARD_LENGTH: StageKind = StageKind::Length {
    min: 0,
    max: STANDARD_MAX_TOKEN_LENGTH,
    preserve_increments: true,
};

// Rows of each kind are ordered by `since`, oldest first, and the first row
// is always V1_0.
static STANDARD: [PipelineTemplate; 2] = [
    row(
        AnalyzerKind::Standard,
        Version::V1_0,
        &[
            STANDARD_LENGTH_LEGACY,
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::EnglishStopLegacy),
        ],
    ),
    row(
        AnalyzerKind::Standard,
        Version::V1_5,
        &[
            STANDARD_LENGTH,
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::EnglishStop),
        ],
    ),
];

static ENGLISH: [PipelineTemplate; 3] = [
    row(
        AnalyzerKind::English,
        Version::V1_0,
        &[
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::EnglishStopLegacy),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::Porter),
        ],
    ),
    row(
        AnalyzerKind::English,
        Version::V1_5,
        &[
            StageKind::EnglishPossessive,
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::EnglishStop),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::Porter),
        ],
    ),
    row(
        AnalyzerKind::English,
        Version::V2_0,
        &[
            StageKind::EnglishPossessive,
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::EnglishStop),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::Snowball(Language::English)),
        ],
    ),
];

static FRENCH: [PipelineTemplate; 3] = [
    row(
        AnalyzerKind::French,
        Version::V1_0,
        &[
            StageKind::Stop(DefaultSet::FrenchStopLegacy),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::Snowball(Language::French)),
            StageKind::Lowercase,
        ],
    ),
    row(
        AnalyzerKind::French,
        Version::V1_5,
        &[
            StageKind::Elision(DefaultSet::FrenchArticles),
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::FrenchStop),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::Snowball(Language::French)),
        ],
    ),
    row(
        AnalyzerKind::French,
        Version::V2_0,
        &[
            StageKind::Elision(DefaultSet::FrenchArticles),
            StageKind::Lowercase,
            StageKind::Stop(DefaultSet::FrenchStop),
            StageKind::KeywordMarker,
            StageKind::Stem(StemmerKind::FrenchMinimal),
        ],
    ),
];

fn rows(kind: AnalyzerKind) -> &'static [PipelineTemplate] {
    match kind {
        AnalyzerKind::Standard => &STANDARD,
        AnalyzerKind::English => &ENGLISH,
        AnalyzerKind::French => &FRENCH,
    }
}

/// The template `kind` uses at `version`.
pub fn template(kind: AnalyzerKind, version: Version) -> &'static PipelineTemplate {
    let rows = rows(kind);
    rows.iter()
        .rev()
        .find(|row| row.since <= version)
        .unwrap_or(&rows[0])
}

/// Every row of the table, grouped by analyzer kind.
pub fn templates() -> impl Iterator<Item = &'static PipelineTemplate> {
    AnalyzerKind::ALL.into_iter().flat_map(rows)
}
