//! Shared comparison primitives behind every [`SpanComparator`] variant
//!
//! Each primitive returns a three-way result: `0` when the spans match under
//! the primitive's rule, negative when the first operand sorts first and
//! positive otherwise. When the rule does not match, ordering falls back to
//! the strict ordering of [`matches`], so every primitive doubles as a sort
//! key.
//!
//! List primitives never reorder the caller's slices.
//!
//! [`SpanComparator`]: super::SpanComparator

use crate::domain::span::Span;
use crate::domain::span_utils::outer_span;

/// Result of [`matches_lists`] for lists of different lengths whose bounding
/// spans are identical
///
/// Such lists are never judged equal. Pinned behavior, not verified correct.
pub const UNEQUAL_LENGTH_TIE: i32 = 1;

/// Strict ordering: 0 for identical spans, else by start, then by end
pub fn matches(s1: &Span, s2: &Span) -> i32 {
    if s1 == s2 {
        0
    } else if s1.starts_before(s2) {
        -1
    } else if s2.starts_before(s1) {
        1
    } else if s1.ends_before(s2) {
        -1
    } else {
        1
    }
}

/// Strict list comparison
///
/// Both lists are compared in sorted order. Equal-length lists compare
/// element-wise and return the first non-zero result; lists of different
/// lengths compare their bounding spans, returning [`UNEQUAL_LENGTH_TIE`] if
/// those are identical.
pub fn matches_lists(l1: &[Span], l2: &[Span]) -> i32 {
    let (outer1, outer2) = match bounding_spans(l1, l2) {
        Ok(pair) => pair,
        Err(order) => return order,
    };

    if l1.len() != l2.len() {
        return match matches(&outer1, &outer2) {
            0 => UNEQUAL_LENGTH_TIE,
            order => order,
        };
    }

    let mut sorted1 = l1.to_vec();
    let mut sorted2 = l2.to_vec();
    sorted1.sort_unstable();
    sorted2.sort_unstable();

    sorted1
        .iter()
        .zip(&sorted2)
        .map(|(a, b)| matches(a, b))
        .find(|&order| order != 0)
        .unwrap_or(0)
}

/// 0 if the spans share any point, else strict ordering
pub fn overlaps(s1: &Span, s2: &Span) -> i32 {
    if s1.overlaps(s2) {
        0
    } else {
        matches(s1, s2)
    }
}

/// Piecemeal overlap: 0 if any span of `l1` overlaps any span of `l2`
pub fn overlaps_lists(l1: &[Span], l2: &[Span]) -> i32 {
    let any_overlap = l1.iter().any(|a| l2.iter().any(|b| a.overlaps(b)));
    if any_overlap {
        0
    } else {
        matches_lists(l1, l2)
    }
}

/// 0 if the spans start at the same offset, else strict ordering
pub fn shares_start(s1: &Span, s2: &Span) -> i32 {
    if s1.start() == s2.start() {
        0
    } else {
        matches(s1, s2)
    }
}

/// [`shares_start`] applied to the bounding spans of both lists
pub fn shares_start_lists(l1: &[Span], l2: &[Span]) -> i32 {
    match bounding_spans(l1, l2) {
        Ok((outer1, outer2)) => shares_start(&outer1, &outer2),
        Err(order) => order,
    }
}

/// 0 if the spans end at the same offset, else strict ordering
pub fn shares_end(s1: &Span, s2: &Span) -> i32 {
    if s1.end() == s2.end() {
        0
    } else {
        matches(s1, s2)
    }
}

/// [`shares_end`] applied to the bounding spans of both lists
pub fn shares_end_lists(l1: &[Span], l2: &[Span]) -> i32 {
    match bounding_spans(l1, l2) {
        Ok((outer1, outer2)) => shares_end(&outer1, &outer2),
        Err(order) => order,
    }
}

/// 0 if the spans share either boundary, else strict ordering
pub fn shares_start_or_end(s1: &Span, s2: &Span) -> i32 {
    if s1.start() == s2.start() || s1.end() == s2.end() {
        0
    } else {
        matches(s1, s2)
    }
}

/// [`shares_start_or_end`] applied to the bounding spans of both lists
pub fn shares_start_or_end_lists(l1: &[Span], l2: &[Span]) -> i32 {
    match bounding_spans(l1, l2) {
        Ok((outer1, outer2)) => shares_start_or_end(&outer1, &outer2),
        Err(order) => order,
    }
}

/// Bounding spans of two lists, or the ordering to return when either is empty
///
/// Empty lists compare equal to each other and sort after non-empty lists.
pub(crate) fn bounding_spans(l1: &[Span], l2: &[Span]) -> Result<(Span, Span), i32> {
    match (outer_span(l1), outer_span(l2)) {
        (Ok(outer1), Ok(outer2)) => Ok((outer1, outer2)),
        (Err(_), Err(_)) => Err(0),
        (Err(_), Ok(_)) => Err(1),
        (Ok(_), Err(_)) => Err(-1),
    }
}
