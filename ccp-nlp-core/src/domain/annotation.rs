//! Text annotations: possibly discontiguous spans plus document metadata

use super::span::Span;
use crate::error::AnnotationError;
use smallvec::SmallVec;

/// Span storage; almost every annotation has one or two spans
pub type SpanVec = SmallVec<[Span; 2]>;

/// An annotation over one or more spans of a document
///
/// `M` is the caller's mention type (for example an ontology class
/// identifier). Spans are kept sorted ascending and are never empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextAnnotation<M = String> {
    spans: SpanVec,
    covered_text: String,
    document_id: String,
    document_collection_id: i32,
    mention: Option<M>,
}

impl<M> TextAnnotation<M> {
    /// Create an annotation over `spans`
    pub fn new(
        spans: impl IntoIterator<Item = Span>,
        covered_text: impl Into<String>,
    ) -> Result<Self, AnnotationError> {
        let mut spans: SpanVec = spans.into_iter().collect();
        if spans.is_empty() {
            return Err(AnnotationError::NoSpans);
        }
        spans.sort_unstable();
        Ok(Self {
            spans,
            covered_text: covered_text.into(),
            document_id: String::new(),
            document_collection_id: 0,
            mention: None,
        })
    }

    /// Create an annotation over one already-validated span
    pub fn from_span(span: Span, covered_text: impl Into<String>) -> Self {
        let mut spans = SpanVec::new();
        spans.push(span);
        Self {
            spans,
            covered_text: covered_text.into(),
            document_id: String::new(),
            document_collection_id: 0,
            mention: None,
        }
    }

    /// Create an annotation over the single span `[start, end)`
    pub fn single(
        start: usize,
        end: usize,
        covered_text: impl Into<String>,
    ) -> Result<Self, AnnotationError> {
        Self::new([Span::new(start, end)?], covered_text)
    }

    /// Attach document metadata
    pub fn with_document(mut self, document_id: impl Into<String>, collection_id: i32) -> Self {
        self.document_id = document_id.into();
        self.document_collection_id = collection_id;
        self
    }

    /// Attach a mention
    pub fn with_mention(mut self, mention: M) -> Self {
        self.mention = Some(mention);
        self
    }

    /// Spans in ascending order
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Add a span, keeping the list sorted
    pub fn add_span(&mut self, span: Span) {
        let index = self.spans.partition_point(|existing| *existing <= span);
        self.spans.insert(index, span);
    }

    /// Bounding span over every member span
    pub fn aggregate_span(&self) -> Span {
        let first = self.spans[0];
        self.spans[1..]
            .iter()
            .fold(first, |acc, span| acc.cover(span))
    }

    pub fn covered_text(&self) -> &str {
        &self.covered_text
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn document_collection_id(&self) -> i32 {
        self.document_collection_id
    }

    pub fn mention(&self) -> Option<&M> {
        self.mention.as_ref()
    }

    /// Copy of this annotation carrying a different (or no) mention type
    pub fn without_mention<N>(&self) -> TextAnnotation<N> {
        TextAnnotation {
            spans: self.spans.clone(),
            covered_text: self.covered_text.clone(),
            document_id: self.document_id.clone(),
            document_collection_id: self.document_collection_id,
            mention: None,
        }
    }

    /// True if any span of this annotation overlaps any span of `other`
    pub fn overlaps<N>(&self, other: &TextAnnotation<N>) -> bool {
        self.spans
            .iter()
            .any(|a| other.spans.iter().any(|b| a.overlaps(b)))
    }
}
