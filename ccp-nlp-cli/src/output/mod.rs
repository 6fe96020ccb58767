//! Output formatting module

use anyhow::Result;
use ccp_nlp_core::{DocumentKey, PrfResult};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for report formatters
///
/// Document and class rows arrive first, in order; `finish` receives the
/// merged corpus result.
pub trait ReportFormatter {
    /// Format the scores of one document
    fn format_document(&mut self, key: &DocumentKey, result: &PrfResult) -> Result<()>;

    /// Format the scores of one annotation class
    fn format_class(&mut self, class: &str, result: &PrfResult) -> Result<()>;

    /// Format the corpus totals and flush
    fn finish(&mut self, total: &PrfResult) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text summary
    #[default]
    Text,
    /// JSON report with per-document scores
    Json,
    /// Markdown tables
    Markdown,
}

/// Options shared by all formatters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatOptions {
    pub include_evidence: bool,
    pub pretty_json: bool,
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    options: FormatOptions,
) -> Box<dyn ReportFormatter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, options.include_evidence)),
        OutputFormat::Json => Box::new(JsonFormatter::new(
            writer,
            options.include_evidence,
            options.pretty_json,
        )),
        OutputFormat::Markdown => {
            Box::new(MarkdownFormatter::new(writer, options.include_evidence))
        }
    }
}

/// One-line rendering of an annotation for evidence listings
pub(crate) fn describe_annotation(annotation: &ccp_nlp_core::TextAnnotation) -> String {
    format!(
        "{}/{} {} {} \"{}\"",
        annotation.document_collection_id(),
        annotation.document_id(),
        ccp_nlp_core::join_spans(annotation.spans(), " "),
        annotation.mention().map(String::as_str).unwrap_or("-"),
        annotation.covered_text()
    )
}
