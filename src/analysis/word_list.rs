//! Word-list loading and the bundled default sets.
//!
//! Two formats are understood:
//!
//! - **Plain**: one entry per line, lines whose first non-blank character is
//!   the comment marker are ignored, entries are trimmed, blank lines skipped.
//! - **Snowball**: `|` starts a comment anywhere on a line, and a line may
//!   hold several whitespace-separated words.
//!
//! Entries are stored verbatim; case folding is the container's business.
//!
//! The default stop word and article sets are compiled into the binary and
//! parsed on first use. Loading goes through a [`OnceLock`], so concurrent
//! first callers wait on a single attempt and every caller sees the same
//! outcome.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::char_array_set::CharArraySet;
use crate::error::{Result, StemmaError};

/// Default comment marker of the plain format.
pub const DEFAULT_COMMENT: char = '#';

/// Line format of a word list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordListFormat {
    /// One entry per line with a comment marker.
    Plain { comment: char },
    /// Snowball stop list format.
    Snowball,
}

impl Default for WordListFormat {
    fn default() -> Self {
        WordListFormat::Plain {
            comment: DEFAULT_COMMENT,
        }
    }
}

impl FromStr for WordListFormat {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(WordListFormat::default()),
            "snowball" => Ok(WordListFormat::Snowball),
            _ => Err(StemmaError::configuration(format!(
                "unknown word list format '{s}' (expected 'plain' or 'snowball')"
            ))),
        }
    }
}

impl WordListFormat {
    /// Extract the entries of one line.
    fn push_line_words<'a>(&self, line: &'a str, words: &mut Vec<&'a str>) {
        match *self {
            WordListFormat::Plain { comment } => {
                let entry = line.trim();
                if !entry.is_empty() && !entry.starts_with(comment) {
                    words.push(entry);
                }
            }
            WordListFormat::Snowball => {
                let content = match line.find('|') {
                    Some(idx) => &line[..idx],
                    None => line,
                };
                words.extend(content.split_whitespace());
            }
        }
    }
}

/// Parse word-list text into its entries, in file order.
pub fn parse_words(text: &str, format: WordListFormat) -> Vec<&str> {
    let mut words = Vec::new();
    for line in text.lines() {
        format.push_line_words(line, &mut words);
    }
    words
}

/// Read a word list into an existing set.
pub fn load_words<R: BufRead>(
    reader: R,
    format: WordListFormat,
    set: &mut CharArraySet,
) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        let mut words = Vec::new();
        format.push_line_words(&line, &mut words);
        set.add_all(words.iter())?;
    }
    Ok(())
}

/// Parse word-list text into a new read-only set.
pub fn word_set(text: &str, format: WordListFormat, ignore_case: bool) -> CharArraySet {
    CharArraySet::from_words(parse_words(text, format), ignore_case).unmodifiable()
}

/// Load a word-list file into a new read-only set.
pub fn word_set_from_path<P: AsRef<Path>>(
    path: P,
    format: WordListFormat,
    ignore_case: bool,
) -> Result<CharArraySet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        StemmaError::resource(format!("cannot open word list {}: {e}", path.display()))
    })?;
    let mut set = CharArraySet::new(ignore_case);
    load_words(BufReader::new(file), format, &mut set)?;
    debug!("loaded {} words from {}", set.len(), path.display());
    Ok(set.unmodifiable())
}

/// A word list embedded in the binary, parsed once on first access.
pub struct BundledWordSet {
    name: &'static str,
    bytes: &'static [u8],
    format: WordListFormat,
    ignore_case: bool,
    cell: OnceLock<std::result::Result<Arc<CharArraySet>, String>>,
}

impl BundledWordSet {
    pub const fn new(
        name: &'static str,
        bytes: &'static [u8],
        format: WordListFormat,
        ignore_case: bool,
    ) -> Self {
        BundledWordSet {
            name,
            bytes,
            format,
            ignore_case,
            cell: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The parsed set, or the load error every caller observes identically.
    pub fn get(&self) -> Result<Arc<CharArraySet>> {
        match self.cell.get_or_init(|| self.load()) {
            Ok(set) => Ok(Arc::clone(set)),
            Err(message) => Err(StemmaError::resource(message.clone())),
        }
    }

    fn load(&self) -> std::result::Result<Arc<CharArraySet>, String> {
        debug!("loading bundled word list '{}'", self.name);
        let text = std::str::from_utf8(self.bytes)
            .map_err(|e| format!("bundled word list '{}' is not valid UTF-8: {e}", self.name))?;
        let set = word_set(text, self.format, self.ignore_case);
        if set.is_empty() {
            warn!("bundled word list '{}' has no entries", self.name);
        }
        Ok(Arc::new(set))
    }
}

static ENGLISH_STOP_LEGACY: BundledWordSet = BundledWordSet::new(
    "english_stop_legacy",
    include_bytes!("resources/english_stop_legacy.txt"),
    WordListFormat::Plain {
        comment: DEFAULT_COMMENT,
    },
    false,
);

static ENGLISH_STOP: BundledWordSet = BundledWordSet::new(
    "english_stop",
    include_bytes!("resources/english_stop.txt"),
    WordListFormat::Snowball,
    false,
);

static FRENCH_STOP_LEGACY: BundledWordSet = BundledWordSet::new(
    "french_stop_legacy",
    include_bytes!("resources/french_stop_legacy.txt"),
    WordListFormat::Plain {
        comment: DEFAULT_COMMENT,
    },
    false,
);

static FRENCH_STOP: BundledWordSet = BundledWordSet::new(
    "french_stop",
    include_bytes!("resources/french_stop.txt"),
    WordListFormat::Snowball,
    false,
);

static FRENCH_ARTICLES: BundledWordSet = BundledWordSet::new(
    "french_articles",
    include_bytes!("resources/french_articles.txt"),
    WordListFormat::Plain {
        comment: DEFAULT_COMMENT,
    },
    true,
);

/// The bundled default sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSet {
    EnglishStopLegacy,
    EnglishStop,
    FrenchStopLegacy,
    FrenchStop,
    FrenchArticles,
}

impl DefaultSet {
    pub const ALL: [DefaultSet; 5] = [
        DefaultSet::EnglishStopLegacy,
        DefaultSet::EnglishStop,
        DefaultSet::FrenchStopLegacy,
        DefaultSet::FrenchStop,
        DefaultSet::FrenchArticles,
    ];

    fn bundled(self) -> &'static BundledWordSet {
        match self {
            DefaultSet::EnglishStopLegacy => &ENGLISH_STOP_LEGACY,
            DefaultSet::EnglishStop => &ENGLISH_STOP,
            DefaultSet::FrenchStopLegacy => &FRENCH_STOP_LEGACY,
            DefaultSet::FrenchStop => &FRENCH_STOP,
            DefaultSet::FrenchArticles => &FRENCH_ARTICLES,
        }
    }

    /// Load (once per process) and return the set.
    pub fn load(self) -> Result<Arc<CharArraySet>> {
        self.bundled().get()
    }

    pub fn name(self) -> &'static str {
        self.bundled().name()
    }
}

impl FromStr for DefaultSet {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self> {
        DefaultSet::ALL
            .into_iter()
            .find(|set| set.name() == s.trim())
            .ok_or_else(|| StemmaError::configuration(format!("unknown default word set '{s}'")))
    }
}
