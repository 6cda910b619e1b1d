//! Command implementations for the stemma CLI.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::language::english::EnglishAnalyzer;
use crate::analysis::analyzer::language::french::FrenchAnalyzer;
use crate::analysis::analyzer::limit::LimitTokenCountAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::analyzer::template::{template, templates, AnalyzerKind};
use crate::analysis::char_array_set::CharArraySet;
use crate::analysis::factory::CustomAnalyzerConfig;
use crate::analysis::word_list::{word_set_from_path, WordListFormat};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: StemmaArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &args, &mut out),
        Command::Templates(templates_args) => list_templates(templates_args, &args, &mut out),
    }
}

/// An analyzer plus what the report says about it.
struct Selected {
    analyzer: Arc<dyn Analyzer>,
    name: String,
    version: Option<String>,
    pipeline: String,
}

fn load_set(path: &Path, format: WordFormat) -> Result<Arc<CharArraySet>> {
    let format = match format {
        WordFormat::Plain => WordListFormat::default(),
        WordFormat::Snowball => WordListFormat::Snowball,
    };
    Ok(Arc::new(word_set_from_path(path, format, false)?))
}

fn select_analyzer(args: &AnalyzeArgs) -> Result<Selected> {
    if let Some(config_path) = &args.config {
        info!("Loading analyzer config from {}", config_path.display());
        let config = CustomAnalyzerConfig::from_path(config_path)?;
        let analyzer = config.build()?;
        let pipeline = analyzer.description().to_string();
        return Ok(Selected {
            analyzer: Arc::new(analyzer),
            name: config.name,
            version: None,
            pipeline,
        });
    }

    let stopwords = match &args.stopwords {
        Some(path) => Some(load_set(path, args.word_format)?),
        None => None,
    };
    let exclusions = match &args.exclusions {
        Some(path) => Some(load_set(path, args.word_format)?),
        None => None,
    };

    let (analyzer, pipeline): (Arc<dyn Analyzer>, String) = match args.analyzer {
        AnalyzerKind::Standard => {
            if exclusions.is_some() {
                warn!("the standard analyzer does not stem; --exclusions is ignored");
            }
            let analyzer = match stopwords {
                Some(set) => StandardAnalyzer::with_stop_words(args.version, set)?,
                None => StandardAnalyzer::new(args.version)?,
            };
            let pipeline = analyzer.inner().description().to_string();
            (Arc::new(analyzer), pipeline)
        }
        AnalyzerKind::English => {
            let analyzer = EnglishAnalyzer::with_sets(args.version, stopwords, exclusions)?;
            let pipeline = analyzer.inner().description().to_string();
            (Arc::new(analyzer), pipeline)
        }
        AnalyzerKind::French => {
            let analyzer = FrenchAnalyzer::with_sets(args.version, stopwords, exclusions)?;
            let pipeline = analyzer.inner().description().to_string();
            (Arc::new(analyzer), pipeline)
        }
    };

    debug!(
        "{} analyzer at {} uses the template since {}",
        args.analyzer,
        args.version,
        template(args.analyzer, args.version).since
    );
    Ok(Selected {
        analyzer,
        name: args.analyzer.to_string(),
        version: Some(args.version.to_string()),
        pipeline,
    })
}

fn read_text(args: &AnalyzeArgs) -> Result<String> {
    match &args.text {
        Some(text) => Ok(text.clone()),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Run the selected analyzer over the text and print its token stream.
pub fn analyze<W: Write>(args: &AnalyzeArgs, cli_args: &StemmaArgs, out: &mut W) -> Result<()> {
    let mut selected = select_analyzer(args)?;

    if let Some(limit) = args.limit {
        selected.analyzer = Arc::new(LimitTokenCountAnalyzer::new(
            selected.analyzer,
            limit,
            args.consume_all,
        ));
        selected.pipeline = format!("{} -> limit({limit})", selected.pipeline);
    }

    let text = read_text(args)?;
    let output = selected.analyzer.analyze_output(&args.field, &text)?;
    info!("analyzed {} chars into {} tokens", output.final_offset, output.tokens.len());

    let report = AnalysisReport::new(selected.name, selected.version, args.field.as_str(), selected.pipeline, output);
    write_report(out, &report, cli_args)
}

/// Print the template table, optionally narrowed to one analyzer or version.
pub fn list_templates<W: Write>(args: &TemplatesArgs, cli_args: &StemmaArgs, out: &mut W) -> Result<()> {
    let rows: Vec<TemplateRow> = match (args.analyzer, args.version) {
        (Some(kind), Some(version)) => vec![TemplateRow::from(template(kind, version))],
        (None, Some(version)) => AnalyzerKind::ALL
            .into_iter()
            .map(|kind| TemplateRow::from(template(kind, version)))
            .collect(),
        (kind, None) => templates()
            .filter(|row| kind.is_none_or(|kind| row.kind == kind))
            .map(TemplateRow::from)
            .collect(),
    };
    write_templates(out, &rows, cli_args)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;

    use super::*;

    fn run(argv: &[&str]) -> String {
        let args = StemmaArgs::try_parse_from(argv).unwrap();
        let mut buffer = Vec::new();
        match &args.command {
            Command::Analyze(analyze_args) => analyze(analyze_args, &args, &mut buffer).unwrap(),
            Command::Templates(templates_args) => list_templates(templates_args, &args, &mut buffer).unwrap(),
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_analyze_json() {
        let text = run(&["stemma", "-f", "json", "analyze", "The running dogs", "-a", "english"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let terms: Vec<_> = value["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["term"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(terms, vec!["run", "dog"]);
        assert_eq!(value["tokens"][0]["position"], 1);
        assert_eq!(value["version"], "2.0");
    }

    #[test]
    fn test_analyze_with_limit() {
        let text = run(&["stemma", "-f", "json", "analyze", "one two three four", "-l", "2"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tokens"].as_array().unwrap().len(), 2);
        assert_eq!(value["final_offset"], 18);
        assert!(value["pipeline"].as_str().unwrap().ends_with("limit(2)"));
    }

    #[test]
    fn test_analyze_with_exclusions_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# protected\nrunning").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let text = run(&["stemma", "-f", "json", "analyze", "running jumping", "-a", "english", "--exclusions", &path]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tokens"][0]["term"], "running");
        assert_eq!(value["tokens"][0]["keyword"], true);
        assert_eq!(value["tokens"][1]["term"], "jump");
    }

    #[test]
    fn test_analyze_with_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "ws", "tokenizer": {{"type": "whitespace"}}, "filters": [{{"type": "lowercase"}}]}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let text = run(&["stemma", "-f", "json", "analyze", "Hello, World", "--config", &path]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["analyzer"], "ws");
        assert_eq!(value["tokens"][0]["term"], "hello,");
        assert_eq!(value["pipeline"], "whitespace -> lowercase");
    }

    #[test]
    fn test_templates_filtered() {
        let text = run(&["stemma", "-f", "json", "templates", "-a", "english"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);

        let text = run(&["stemma", "-f", "json", "templates", "--compat", "1.5"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let since: Vec<_> = value.as_array().unwrap().iter().map(|row| row["since"].clone()).collect();
        assert_eq!(since, vec!["1.5", "1.5", "1.5"]);
    }
}
