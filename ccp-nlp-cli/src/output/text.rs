//! Plain text output formatter

use super::{describe_annotation, ReportFormatter};
use anyhow::Result;
use ccp_nlp_core::{DocumentKey, PrfResult};
use std::io::Write;

/// Plain text formatter - one line per document or class, then the totals
pub struct TextFormatter<W: Write> {
    writer: W,
    include_evidence: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, include_evidence: bool) -> Self {
        Self {
            writer,
            include_evidence,
        }
    }

    fn write_row(&mut self, label: &str, result: &PrfResult) -> Result<()> {
        writeln!(
            self.writer,
            "{label}\t#TP:{} #FP:{} #FN:{}\tP: {:.4} R: {:.4} F: {:.4}",
            result.true_positive_count(),
            result.false_positive_count(),
            result.false_negative_count(),
            result.precision(),
            result.recall(),
            result.f_measure()
        )?;
        Ok(())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn format_document(&mut self, key: &DocumentKey, result: &PrfResult) -> Result<()> {
        self.write_row(&key.to_string(), result)
    }

    fn format_class(&mut self, class: &str, result: &PrfResult) -> Result<()> {
        self.write_row(class, result)
    }

    fn finish(&mut self, total: &PrfResult) -> Result<()> {
        writeln!(self.writer, "{total}")?;
        writeln!(self.writer, "SER: {:.4}", total.slot_error_rate())?;

        if self.include_evidence {
            let sections = [
                ("TP", total.tp_annotations()),
                ("FP", total.fp_annotations()),
                ("FN", total.fn_annotations()),
            ];
            for (label, annotations) in sections {
                for annotation in annotations {
                    writeln!(self.writer, "{label}\t{}", describe_annotation(annotation))?;
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}
