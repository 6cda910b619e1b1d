//! Command line argument parsing for the stemma CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::template::AnalyzerKind;
use crate::analysis::version::Version;

/// Stemma - run text through version-gated analysis pipelines
#[derive(Parser, Debug, Clone)]
#[command(name = "stemma")]
#[command(about = "Inspect the token streams produced by stemma analyzers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct StemmaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl StemmaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the token stream of a text
    Analyze(AnalyzeArgs),

    /// Print the version → stage template table
    Templates(TemplatesArgs),
}

/// Arguments for analyzing a text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze; read from standard input when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Built-in analyzer (standard, english, french)
    #[arg(short, long, default_value = "standard", env = "STEMMA_ANALYZER")]
    pub analyzer: AnalyzerKind,

    /// Compatibility version the analyzer is built for
    #[arg(long = "compat", value_name = "VERSION", default_value_t = Version::LATEST, env = "STEMMA_VERSION")]
    pub version: Version,

    /// Field name the text belongs to
    #[arg(long, default_value = "body")]
    pub field: String,

    /// Stop word file replacing the analyzer's default list
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Words to protect from stemming, one per line
    #[arg(long, value_name = "FILE")]
    pub exclusions: Option<PathBuf>,

    /// Word list format of --stopwords and --exclusions
    #[arg(long, default_value = "plain")]
    pub word_format: WordFormat,

    /// Emit at most this many tokens
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// With --limit, keep reading the input after the limit is reached
    #[arg(long, requires = "limit")]
    pub consume_all: bool,

    /// JSON pipeline definition used instead of a built-in analyzer
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["analyzer", "stopwords", "exclusions"])]
    pub config: Option<PathBuf>,
}

/// Arguments for listing templates
#[derive(Parser, Debug, Clone)]
pub struct TemplatesArgs {
    /// Only show this analyzer
    #[arg(short, long)]
    pub analyzer: Option<AnalyzerKind>,

    /// Only show the template in effect at this version
    #[arg(long = "compat", value_name = "VERSION")]
    pub version: Option<Version>,
}

/// Word list file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordFormat {
    /// One word per line, '#' comments
    Plain,
    /// Snowball stop list format, '|' comments
    Snowball,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_analyze_command() {
        let args = StemmaArgs::try_parse_from([
            "stemma",
            "analyze",
            "The quick fox",
            "--analyzer",
            "english",
            "--compat",
            "1.5",
            "--limit",
            "2",
            "--consume-all",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.text.as_deref(), Some("The quick fox"));
            assert_eq!(analyze_args.analyzer, AnalyzerKind::English);
            assert_eq!(analyze_args.version, Version::V1_5);
            assert_eq!(analyze_args.limit, Some(2));
            assert!(analyze_args.consume_all);
            assert_eq!(analyze_args.field, "body");
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_analyze_defaults() {
        let args = StemmaArgs::try_parse_from(["stemma", "analyze", "text"]).unwrap();
        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.analyzer, AnalyzerKind::Standard);
            assert_eq!(analyze_args.version, Version::LATEST);
            assert_eq!(analyze_args.word_format, WordFormat::Plain);
            assert!(analyze_args.config.is_none());
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(StemmaArgs::try_parse_from(["stemma", "analyze", "x", "--analyzer", "klingon"]).is_err());
        assert!(StemmaArgs::try_parse_from(["stemma", "analyze", "x", "--compat", "9.9"]).is_err());
        assert!(StemmaArgs::try_parse_from(["stemma", "analyze", "x", "--consume-all"]).is_err());
    }

    #[test]
    fn test_templates_command() {
        let args = StemmaArgs::try_parse_from(["stemma", "templates", "--analyzer", "french"]).unwrap();
        if let Command::Templates(templates_args) = args.command {
            assert_eq!(templates_args.analyzer, Some(AnalyzerKind::French));
            assert_eq!(templates_args.version, None);
        } else {
            panic!("Expected Templates command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = StemmaArgs::try_parse_from(["stemma", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = StemmaArgs::try_parse_from(["stemma", "-vv", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args = StemmaArgs::try_parse_from(["stemma", "--quiet", "templates"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = StemmaArgs::try_parse_from(["stemma", "--format", "json", "templates"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
