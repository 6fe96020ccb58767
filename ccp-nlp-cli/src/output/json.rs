//! JSON output formatter

use super::ReportFormatter;
use anyhow::Result;
use ccp_nlp_core::{DocumentKey, PrfResult, ScoreSummary, TextAnnotation};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - buffers rows and writes one report object on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    include_evidence: bool,
    pretty: bool,
    documents: Vec<DocumentScores>,
    classes: Vec<ScoreSummary>,
}

/// Scores of one document
#[derive(Debug, Serialize)]
pub struct DocumentScores {
    pub document: DocumentKey,
    pub scores: ScoreSummary,
}

#[derive(Serialize)]
struct Evidence<'a> {
    true_positives: &'a [TextAnnotation],
    false_positives: &'a [TextAnnotation],
    false_negatives: &'a [TextAnnotation],
}

#[derive(Serialize)]
struct Report<'a> {
    total: ScoreSummary,
    #[serde(skip_serializing_if = "is_empty")]
    documents: &'a [DocumentScores],
    #[serde(skip_serializing_if = "is_empty")]
    classes: &'a [ScoreSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    evidence: Option<Evidence<'a>>,
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, include_evidence: bool, pretty: bool) -> Self {
        Self {
            writer,
            include_evidence,
            pretty,
            documents: Vec::new(),
            classes: Vec::new(),
        }
    }
}

impl<W: Write> ReportFormatter for JsonFormatter<W> {
    fn format_document(&mut self, key: &DocumentKey, result: &PrfResult) -> Result<()> {
        self.documents.push(DocumentScores {
            document: key.clone(),
            scores: ScoreSummary::from(result),
        });
        Ok(())
    }

    fn format_class(&mut self, _class: &str, result: &PrfResult) -> Result<()> {
        self.classes.push(ScoreSummary::from(result));
        Ok(())
    }

    fn finish(&mut self, total: &PrfResult) -> Result<()> {
        let report = Report {
            total: ScoreSummary::from(total),
            documents: &self.documents,
            classes: &self.classes,
            evidence: self.include_evidence.then(|| Evidence {
                true_positives: total.tp_annotations(),
                false_positives: total.fp_annotations(),
                false_negatives: total.fn_annotations(),
            }),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &report)?;
        } else {
            serde_json::to_writer(&mut self.writer, &report)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
