//! Operations over span lists: bounding spans and interval coalescing

use super::span::Span;
use crate::error::{SpanError, SpanResult};
use smallvec::{smallvec, SmallVec};

/// Bounding span `[min start, max end]` of a span list
///
/// Fails with [`SpanError::EmptyInput`] when `spans` is empty.
pub fn outer_span(spans: &[Span]) -> SpanResult<Span> {
    let (first, rest) = spans.split_first().ok_or(SpanError::EmptyInput)?;
    Ok(rest.iter().fold(*first, |acc, span| acc.cover(span)))
}

/// Collapse a span list into the minimal sorted set of disjoint spans
///
/// Overlapping and touching spans are coalesced, so the result covers
/// exactly the same offsets as the input.
pub fn normalize_spans(spans: &[Span]) -> Vec<Span> {
    spans
        .iter()
        .fold(Vec::with_capacity(spans.len()), |acc, span| {
            merge_span(&acc, *span)
        })
}

/// Insert `new_span` into a sorted, disjoint span list
///
/// Spans ending before `new_span` starts are kept as-is, the run of spans
/// that overlaps or touches it is folded into one span, and spans starting
/// after the (grown) merged span are kept as-is.
pub fn merge_span(spans: &[Span], new_span: Span) -> Vec<Span> {
    let mut merged = Vec::with_capacity(spans.len() + 1);
    let mut rest = spans.iter().peekable();

    while let Some(low) = rest.next_if(|s| s.end() < new_span.start()) {
        merged.push(*low);
    }

    let mut middle = new_span;
    while let Some(overlapping) = rest.next_if(|s| s.start() <= middle.end()) {
        middle = middle.cover(overlapping);
    }
    merged.push(middle);

    merged.extend(rest.copied());
    merged
}

/// Merge each of `new_spans` into `existing`
pub fn merge_spans(existing: &[Span], new_spans: &[Span]) -> Vec<Span> {
    new_spans
        .iter()
        .fold(normalize_spans(existing), |acc, span| merge_span(&acc, *span))
}

/// Coalesce two spans if they touch or overlap, otherwise keep both in order
///
/// Expects `s1.start() <= s2.start()`.
pub fn reduce_spans(s1: Span, s2: Span) -> SmallVec<[Span; 2]> {
    debug_assert!(s1.start() <= s2.start(), "reduce_spans expects ordered input");
    if s1.end() >= s2.start() {
        smallvec![s1.cover(&s2)]
    } else {
        smallvec![s1, s2]
    }
}

/// Leading spans that start before `value`
///
/// The input is sorted into a local copy first, so callers need not
/// pre-sort. Scanning stops at the first span lying entirely at or above
/// `value`.
pub fn spans_equal_or_lesser(spans: &[Span], value: usize) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort();
    sorted
        .into_iter()
        .take_while(|span| span.start() < value)
        .collect()
}
