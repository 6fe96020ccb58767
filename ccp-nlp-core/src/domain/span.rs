//! Validated character-offset intervals
//!
//! A [`Span`] anchors an annotation to `[start, end)` in the document text.
//! Construction and mutation both enforce `0 <= start <= end`; a span that
//! exists is always valid.

use crate::error::{SpanError, SpanResult};
use std::fmt;

/// Half-open interval `[start, end)` over character offsets
///
/// The derived ordering is the strict ordering used by the comparators:
/// by start, then by end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(i64, i64)", into = "(i64, i64)")
)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span, failing if `start > end`
    pub fn new(start: usize, end: usize) -> SpanResult<Self> {
        if start > end {
            return Err(invalid(offset(start), offset(end)));
        }
        Ok(Self { start, end })
    }

    /// Create a span from raw signed offsets, rejecting negative values
    pub fn from_signed(start: i64, end: i64) -> SpanResult<Self> {
        if start < 0 || end < 0 || start > end {
            return Err(invalid(start, end));
        }
        Ok(Self {
            start: start as usize,
            end: end as usize,
        })
    }

    /// Span of `length` characters starting at `start`
    pub fn with_length(start: usize, length: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(length),
        }
    }

    /// Start offset (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered
    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-length spans
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move the start offset; the span is left unchanged on error
    pub fn set_start(&mut self, start: usize) -> SpanResult<()> {
        if start > self.end {
            return Err(invalid(offset(start), offset(self.end)));
        }
        self.start = start;
        Ok(())
    }

    /// Move the end offset; the span is left unchanged on error
    pub fn set_end(&mut self, end: usize) -> SpanResult<()> {
        if self.start > end {
            return Err(invalid(offset(self.start), offset(end)));
        }
        self.end = end;
        Ok(())
    }

    /// True if the two spans share any point
    ///
    /// Evaluated with boundary comparisons only. A zero-length span overlaps
    /// every span whose closed range contains its position, which keeps the
    /// relation symmetric.
    pub fn overlaps(&self, other: &Span) -> bool {
        (other.start >= self.start && other.start < self.end)
            || (other.end > self.start && other.end <= self.end)
            || (other.start <= self.start && other.end >= self.end)
    }

    /// True if the single-character probe `[index, index + 1)` overlaps this span
    pub fn overlaps_index(&self, index: usize) -> bool {
        let probe = Span {
            start: index,
            end: index.saturating_add(1),
        };
        self.overlaps(&probe)
    }

    /// True if `other` lies within this span
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Smallest span covering both spans
    pub fn cover(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Strictly earlier start; equal starts return false
    pub fn starts_before(&self, other: &Span) -> bool {
        self.start < other.start
    }

    /// Strictly earlier end; equal ends return false
    pub fn ends_before(&self, other: &Span) -> bool {
        self.end < other.end
    }
}

fn invalid(start: i64, end: i64) -> SpanError {
    SpanError::InvalidSpan { start, end }
}

/// Offset as reported in errors and serialized output, saturating at `i64::MAX`
fn offset(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

impl TryFrom<(i64, i64)> for Span {
    type Error = SpanError;

    fn try_from((start, end): (i64, i64)) -> Result<Self, Self::Error> {
        Span::from_signed(start, end)
    }
}

impl From<Span> for (i64, i64) {
    fn from(span: Span) -> Self {
        (offset(span.start), offset(span.end))
    }
}

/// Render a span list joined by `delimiter`; an empty list renders as `[]`
pub fn join_spans(spans: &[Span], delimiter: &str) -> String {
    if spans.is_empty() {
        return "[]".to_string();
    }
    spans
        .iter()
        .map(Span::to_string)
        .collect::<Vec<_>>()
        .join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    #[test]
    fn test_construction_validates() {
        assert!(Span::new(3, 3).is_ok());
        assert_eq!(span(3, 3).length(), 0);
        assert_eq!(
            Span::new(5, 3),
            Err(SpanError::InvalidSpan { start: 5, end: 3 })
        );
        assert!(Span::from_signed(-1, 4).is_err());
        assert!(Span::from_signed(0, -4).is_err());
        assert_eq!(Span::from_signed(2, 9).unwrap(), span(2, 9));
    }

    #[test]
    fn test_invalid_offsets_saturate() {
        assert_eq!(
            Span::new(usize::MAX, 0),
            Err(SpanError::InvalidSpan {
                start: i64::MAX,
                end: 0
            })
        );
        let mut s = span(0, 4);
        assert_eq!(
            s.set_start(usize::MAX),
            Err(SpanError::InvalidSpan {
                start: i64::MAX,
                end: 4
            })
        );
        assert_eq!(s, span(0, 4));
    }

    #[test]
    fn test_setters_revalidate() {
        let mut s = span(5, 10);
        assert!(s.set_start(11).is_err());
        assert_eq!(s, span(5, 10));
        assert!(s.set_end(4).is_err());
        assert_eq!(s, span(5, 10));

        s.set_start(10).unwrap();
        assert_eq!(s.length(), 0);
        s.set_end(20).unwrap();
        assert_eq!(s, span(10, 20));
    }

    #[test]
    fn test_overlaps_boundaries() {
        // Adjacent spans do not overlap
        assert!(!span(0, 5).overlaps(&span(5, 10)));
        assert!(!span(5, 10).overlaps(&span(0, 5)));

        // Straddling and nesting
        assert!(span(0, 6).overlaps(&span(5, 10)));
        assert!(span(0, 10).overlaps(&span(3, 4)));
        assert!(span(3, 4).overlaps(&span(0, 10)));

        // Zero-length spans touch anything containing their position
        assert!(span(5, 5).overlaps(&span(0, 5)));
        assert!(span(0, 5).overlaps(&span(5, 5)));
        assert!(span(5, 5).overlaps(&span(5, 5)));
        assert!(!span(5, 5).overlaps(&span(6, 8)));
    }

    #[test]
    fn test_overlaps_index() {
        let s = span(2, 5);
        assert!(!s.overlaps_index(1));
        assert!(s.overlaps_index(2));
        assert!(s.overlaps_index(4));
        assert!(!s.overlaps_index(5));
    }

    #[test]
    fn test_containment_and_ordering_predicates() {
        assert!(span(0, 10).contains_span(&span(0, 10)));
        assert!(span(0, 10).contains_span(&span(2, 3)));
        assert!(!span(2, 3).contains_span(&span(0, 10)));

        assert!(span(0, 4).starts_before(&span(1, 2)));
        assert!(!span(1, 4).starts_before(&span(1, 2)));
        assert!(span(0, 2).ends_before(&span(1, 3)));
        assert!(!span(0, 3).ends_before(&span(1, 3)));
    }

    #[test]
    fn test_equality_is_exact() {
        assert_eq!(span(1, 4), span(1, 4));
        assert_ne!(span(1, 4), span(1, 5));
        assert!(span(1, 4) < span(1, 5));
        assert!(span(0, 9) < span(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(span(3, 17).to_string(), "[3..17]");
        assert_eq!(join_spans(&[], ", "), "[]");
        assert_eq!(
            join_spans(&[span(0, 2), span(4, 6)], ", "),
            "[0..2], [4..6]"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_invalid_offsets() {
        let ok: Span = serde_json::from_str("[2, 7]").unwrap();
        assert_eq!(ok, span(2, 7));
        assert_eq!(serde_json::to_string(&ok).unwrap(), "[2,7]");

        assert!(serde_json::from_str::<Span>("[7, 2]").is_err());
        assert!(serde_json::from_str::<Span>("[-1, 2]").is_err());
    }
}
