//! JSON annotation files
//!
//! ```json
//! { "documents": [
//!     { "id": "PMID:1", "collection": 0,
//!       "annotations": [ { "spans": [[0, 13]], "text": "cell interior", "class": "GO:0005622" } ] }
//! ] }
//! ```
//!
//! Offsets are kept as raw signed pairs until conversion so that every
//! invalid span can be reported, not just the first one.

use anyhow::{Context, Result};
use ccp_nlp_core::{AnnotationError, Span, TextAnnotation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of one annotation file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotationFile {
    pub documents: Vec<DocumentRecord>,
}

/// Annotations of one document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentRecord {
    pub id: String,
    #[serde(default)]
    pub collection: i32,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

/// A single annotation as written in the file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotationRecord {
    pub spans: Vec<(i64, i64)>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// An annotation that cannot be built
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationProblem {
    pub document: String,
    pub index: usize,
    pub error: AnnotationError,
}

impl AnnotationRecord {
    fn to_annotation(&self, document: &DocumentRecord) -> Result<TextAnnotation, AnnotationError> {
        let spans = self
            .spans
            .iter()
            .map(|&(start, end)| Span::from_signed(start, end))
            .collect::<Result<Vec<_>, _>>()?;

        let annotation = TextAnnotation::new(spans, self.text.clone())?
            .with_document(document.id.clone(), document.collection);
        Ok(match &self.class {
            Some(class) => annotation.with_mention(class.clone()),
            None => annotation,
        })
    }
}

impl AnnotationFile {
    /// Parse file contents
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Malformed annotation file")
    }

    /// Read and parse a file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Number of annotation records across all documents
    pub fn annotation_count(&self) -> usize {
        self.documents.iter().map(|d| d.annotations.len()).sum()
    }

    /// Every record that fails span or annotation validation
    pub fn problems(&self) -> Vec<AnnotationProblem> {
        self.records()
            .filter_map(|(document, index, record)| {
                record
                    .to_annotation(document)
                    .err()
                    .map(|error| AnnotationProblem {
                        document: document.id.clone(),
                        index,
                        error,
                    })
            })
            .collect()
    }

    /// Build annotations, failing on the first invalid record
    pub fn to_annotations(&self) -> Result<Vec<TextAnnotation>> {
        self.records()
            .map(|(document, index, record)| {
                record.to_annotation(document).with_context(|| {
                    format!("Document {} annotation #{}", document.id, index)
                })
            })
            .collect()
    }

    fn records(&self) -> impl Iterator<Item = (&DocumentRecord, usize, &AnnotationRecord)> {
        self.documents.iter().flat_map(|document| {
            document
                .annotations
                .iter()
                .enumerate()
                .map(move |(index, record)| (document, index, record))
        })
    }
}

/// Read every file and concatenate the annotations
pub fn load_annotations<'a, I>(paths: I, mut on_loaded: impl FnMut(&Path)) -> Result<Vec<TextAnnotation>>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut annotations = Vec::new();
    for path in paths {
        let file = AnnotationFile::read(path)?;
        annotations.extend(
            file.to_annotations()
                .with_context(|| format!("In {}", path.display()))?,
        );
        log::debug!("Loaded {} annotations from {}", file.annotation_count(), path.display());
        on_loaded(path);
    }
    Ok(annotations)
}
