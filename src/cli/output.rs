//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::template::PipelineTemplate;
use crate::analysis::token::{Token, TokenType};
use crate::analysis::token_stream::StreamOutput;
use crate::cli::args::{OutputFormat, StemmaArgs};
use crate::error::Result;

/// One emitted token, with its absolute position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRow {
    pub position: u64,
    pub term: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub position_increment: u32,
    pub token_type: TokenType,
    pub keyword: bool,
}

/// Result structure for the analyze command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analyzer: String,
    pub version: Option<String>,
    pub field: String,
    pub pipeline: String,
    pub tokens: Vec<TokenRow>,
    pub final_offset: usize,
    pub final_position_increment: u32,
}

impl AnalysisReport {
    pub fn new(
        analyzer: impl Into<String>,
        version: Option<String>,
        field: impl Into<String>,
        pipeline: impl Into<String>,
        output: StreamOutput,
    ) -> Self {
        // positions start at -1, so a leading increment of 1 lands on 0
        let mut position: i64 = -1;
        let tokens = output
            .tokens
            .into_iter()
            .map(|token: Token| {
                position += i64::from(token.position_increment);
                TokenRow {
                    position: position.max(0) as u64,
                    term: token.text,
                    start_offset: token.start_offset,
                    end_offset: token.end_offset,
                    position_increment: token.position_increment,
                    token_type: token.token_type,
                    keyword: token.keyword,
                }
            })
            .collect();

        AnalysisReport {
            analyzer: analyzer.into(),
            version,
            field: field.into(),
            pipeline: pipeline.into(),
            tokens,
            final_offset: output.final_offset,
            final_position_increment: output.final_position_increment,
        }
    }
}

/// One row of the template table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRow {
    pub analyzer: String,
    pub since: String,
    pub tokenizer: String,
    pub stages: Vec<String>,
}

impl From<&PipelineTemplate> for TemplateRow {
    fn from(template: &PipelineTemplate) -> Self {
        TemplateRow {
            analyzer: template.kind.to_string(),
            since: template.since.to_string(),
            tokenizer: format!("{:?}", template.tokenizer).to_ascii_lowercase(),
            stages: template.stage_names(),
        }
    }
}

/// Write `value` as JSON.
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, args: &StemmaArgs) -> Result<()> {
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print an analysis report in the selected format.
pub fn write_report<W: Write>(out: &mut W, report: &AnalysisReport, args: &StemmaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, report, args),
        OutputFormat::Human => write_report_human(out, report, args),
    }
}

fn write_report_human<W: Write>(out: &mut W, report: &AnalysisReport, args: &StemmaArgs) -> Result<()> {
    if args.verbosity() > 0 {
        match &report.version {
            Some(version) => writeln!(out, "Analyzer: {} (version {})", report.analyzer, version)?,
            None => writeln!(out, "Analyzer: {}", report.analyzer)?,
        }
        writeln!(out, "Pipeline: {}", report.pipeline)?;
        writeln!(out)?;
    }

    let term_width = report
        .tokens
        .iter()
        .map(|row| row.term.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    writeln!(
        out,
        "{:>4}  {:<term_width$}  {:>5}  {:>5}  {:>4}  {:<8}  {}",
        "pos", "term", "start", "end", "inc", "type", "keyword"
    )?;
    for row in &report.tokens {
        writeln!(
            out,
            "{:>4}  {:<term_width$}  {:>5}  {:>5}  {:>4}  {:<8}  {}",
            row.position,
            row.term,
            row.start_offset,
            row.end_offset,
            row.position_increment,
            format!("{:?}", row.token_type),
            if row.keyword { "yes" } else { "" }
        )?;
    }

    if args.verbosity() > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} tokens, final offset {}, final position increment {}",
            report.tokens.len(),
            report.final_offset,
            report.final_position_increment
        )?;
    }
    Ok(())
}

/// Print template rows in the selected format.
pub fn write_templates<W: Write>(out: &mut W, rows: &[TemplateRow], args: &StemmaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, &rows, args),
        OutputFormat::Human => {
            writeln!(out, "{:<10}  {:<5}  {:<10}  stages", "analyzer", "since", "tokenizer")?;
            for row in rows {
                writeln!(
                    out,
                    "{:<10}  {:<5}  {:<10}  {}",
                    row.analyzer,
                    row.since,
                    row.tokenizer,
                    row.stages.join(", ")
                )?;
            }
            Ok(())
        }
    }
}
