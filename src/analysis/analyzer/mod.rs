//! Analyzers: version-gated chains of a tokenizer and filters.
//!
//! [`template`] holds the static version → stage table, [`pipeline`] resolves
//! a template into a runnable description, and the remaining modules are the
//! analyzers built on top of it.

pub mod analyzer;
pub mod language;
pub mod limit;
pub mod per_field;
pub mod pipeline;
pub mod pool;
pub mod standard;
pub mod template;

pub use analyzer::Analyzer;
pub use language::english::EnglishAnalyzer;
pub use language::french::FrenchAnalyzer;
pub use limit::LimitTokenCountAnalyzer;
pub use per_field::PerFieldAnalyzer;
pub use pipeline::{PipelineAnalyzer, PipelineDescription, StageSpec, TokenizerSpec};
pub use pool::{ChainPool, PooledStream};
pub use standard::StandardAnalyzer;
pub use template::{template, templates, AnalyzerKind, PipelineTemplate, StageKind, StemmerKind};
