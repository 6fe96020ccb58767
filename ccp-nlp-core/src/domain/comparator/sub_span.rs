//! Containment matching for [`SpanComparator::SubSpan`]
//!
//! [`SpanComparator::SubSpan`]: super::SpanComparator::SubSpan

use super::primitives::{bounding_spans, matches};
use crate::domain::span::Span;

/// Result of [`sub_span_lists`] when neither bounding span contains the
/// other and neither one both starts and ends first
///
/// Unreachable for non-empty lists of valid spans; kept as the final arm.
/// Pinned behavior, not verified correct.
pub const SUB_SPAN_FALLBACK: i32 = 1;

/// 0 if one span is nested in the other
///
/// The longer span (the first operand on equal lengths) is the container.
/// The shorter span matches when it lies strictly inside, shares the start
/// and ends earlier, or shares the end and starts later. Otherwise the
/// result is the strict ordering of the longer span against the shorter
/// one, independent of argument order, so this is not antisymmetric.
pub fn sub_span(s1: &Span, s2: &Span) -> i32 {
    if matches(s1, s2) == 0 {
        return 0;
    }

    let (long, short) = if s1.length() >= s2.length() {
        (s1, s2)
    } else {
        (s2, s1)
    };

    let nested = long.starts_before(short) && short.ends_before(long);
    let shares_start = long.start() == short.start() && short.ends_before(long);
    let shares_end = long.end() == short.end() && long.starts_before(short);

    if nested || shares_start || shares_end {
        0
    } else {
        matches(long, short)
    }
}

/// 0 if either list's bounding span contains the other's
pub fn sub_span_lists(l1: &[Span], l2: &[Span]) -> i32 {
    let (outer1, outer2) = match bounding_spans(l1, l2) {
        Ok(pair) => pair,
        Err(order) => return order,
    };

    if outer1.contains_span(&outer2) || outer2.contains_span(&outer1) {
        0
    } else if outer1.starts_before(&outer2) && outer1.ends_before(&outer2) {
        -1
    } else if outer2.starts_before(&outer1) && outer2.ends_before(&outer1) {
        1
    } else {
        SUB_SPAN_FALLBACK
    }
}
