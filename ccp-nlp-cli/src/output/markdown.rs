//! Markdown output formatter

use super::{describe_annotation, ReportFormatter};
use anyhow::Result;
use ccp_nlp_core::{DocumentKey, PrfResult};
use std::io::Write;

const TABLE_HEADER: &str = "| TP | FP | FN | P | R | F |";

/// Markdown formatter - score tables per document and per class
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_evidence: bool,
    documents: Vec<String>,
    classes: Vec<String>,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, include_evidence: bool) -> Self {
        Self {
            writer,
            include_evidence,
            documents: Vec::new(),
            classes: Vec::new(),
        }
    }

    fn write_table(&mut self, heading: &str, first_column: &str, rows: &[String]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## {heading}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| {first_column} {TABLE_HEADER}")?;
        writeln!(self.writer, "|---|---:|---:|---:|---:|---:|---:|")?;
        for row in rows {
            writeln!(self.writer, "{row}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn table_row(label: &str, result: &PrfResult) -> String {
    format!(
        "| {} | {} | {} | {} | {:.4} | {:.4} | {:.4} |",
        label.replace('|', "\\|"),
        result.true_positive_count(),
        result.false_positive_count(),
        result.false_negative_count(),
        result.precision(),
        result.recall(),
        result.f_measure()
    )
}

impl<W: Write> ReportFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, key: &DocumentKey, result: &PrfResult) -> Result<()> {
        self.documents.push(table_row(&key.to_string(), result));
        Ok(())
    }

    fn format_class(&mut self, class: &str, result: &PrfResult) -> Result<()> {
        self.classes.push(table_row(class, result));
        Ok(())
    }

    fn finish(&mut self, total: &PrfResult) -> Result<()> {
        let title = if total.title().is_empty() {
            "Evaluation"
        } else {
            total.title()
        };
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{TABLE_HEADER} SER |")?;
        writeln!(self.writer, "|---:|---:|---:|---:|---:|---:|---:|")?;
        writeln!(
            self.writer,
            "| {} | {} | {} | {:.4} | {:.4} | {:.4} | {:.4} |",
            total.true_positive_count(),
            total.false_positive_count(),
            total.false_negative_count(),
            total.precision(),
            total.recall(),
            total.f_measure(),
            total.slot_error_rate()
        )?;
        writeln!(self.writer)?;

        let documents = std::mem::take(&mut self.documents);
        self.write_table("Documents", "Document", &documents)?;
        let classes = std::mem::take(&mut self.classes);
        self.write_table("Classes", "Class", &classes)?;

        if self.include_evidence {
            let sections = [
                ("False positives", total.fp_annotations()),
                ("False negatives", total.fn_annotations()),
            ];
            for (heading, annotations) in sections {
                if annotations.is_empty() {
                    continue;
                }
                writeln!(self.writer, "## {heading}")?;
                writeln!(self.writer)?;
                for annotation in annotations {
                    writeln!(self.writer, "- `{}`", describe_annotation(annotation))?;
                }
                writeln!(self.writer)?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
