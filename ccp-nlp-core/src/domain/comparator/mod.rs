//! Boundary-match strategies for spans and span lists
//!
//! A [`SpanComparator`] decides whether two spans (or two discontiguous span
//! lists) "match" under one policy and, when they do not, how they order.
//! Results are three-way: `0` for a match, negative when the first operand
//! precedes the second, positive when it follows.

pub mod primitives;
pub mod sub_span;

use crate::domain::span::Span;
use crate::error::ConfigError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Span matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SpanComparator {
    /// Identical start and end
    #[default]
    Strict,
    /// Any shared character
    Sloppy,
    /// Same start offset
    SharedStart,
    /// Same end offset
    SharedEnd,
    /// Same start or same end offset
    SharedStartOrEnd,
    /// Always matches; for document-level comparisons
    Ignore,
    /// One span contains the other
    SubSpan,
}

impl SpanComparator {
    /// Every policy, in declaration order
    pub const ALL: [SpanComparator; 7] = [
        SpanComparator::Strict,
        SpanComparator::Sloppy,
        SpanComparator::SharedStart,
        SpanComparator::SharedEnd,
        SpanComparator::SharedStartOrEnd,
        SpanComparator::Ignore,
        SpanComparator::SubSpan,
    ];

    /// Compare two spans
    pub fn compare(&self, s1: &Span, s2: &Span) -> i32 {
        match self {
            Self::Strict => primitives::matches(s1, s2),
            Self::Sloppy => primitives::overlaps(s1, s2),
            Self::SharedStart => primitives::shares_start(s1, s2),
            Self::SharedEnd => primitives::shares_end(s1, s2),
            Self::SharedStartOrEnd => primitives::shares_start_or_end(s1, s2),
            Self::Ignore => 0,
            Self::SubSpan => sub_span::sub_span(s1, s2),
        }
    }

    /// Compare two span lists
    pub fn compare_lists(&self, l1: &[Span], l2: &[Span]) -> i32 {
        match self {
            Self::Strict => primitives::matches_lists(l1, l2),
            Self::Sloppy => primitives::overlaps_lists(l1, l2),
            Self::SharedStart => primitives::shares_start_lists(l1, l2),
            Self::SharedEnd => primitives::shares_end_lists(l1, l2),
            Self::SharedStartOrEnd => primitives::shares_start_or_end_lists(l1, l2),
            Self::Ignore => 0,
            Self::SubSpan => sub_span::sub_span_lists(l1, l2),
        }
    }

    /// True when a match implies the compared spans are close enough for a
    /// sorted sweep to find every match
    ///
    /// Only [`SpanComparator::Ignore`] can match spans that are far apart,
    /// and so needs an all-pairs comparison.
    pub fn spans_must_overlap_to_match(&self) -> bool {
        !matches!(self, Self::Ignore)
    }

    /// Convert a three-way result into an [`Ordering`]
    pub fn as_ordering(result: i32) -> Ordering {
        result.cmp(&0)
    }

    /// Kebab-case name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Sloppy => "sloppy",
            Self::SharedStart => "shared-start",
            Self::SharedEnd => "shared-end",
            Self::SharedStartOrEnd => "shared-start-or-end",
            Self::Ignore => "ignore",
            Self::SubSpan => "sub-span",
        }
    }

    /// One-line description of the policy
    pub fn description(&self) -> &'static str {
        match self {
            Self::Strict => "exact match of every span boundary",
            Self::Sloppy => "any character overlap",
            Self::SharedStart => "same start offset",
            Self::SharedEnd => "same end offset",
            Self::SharedStartOrEnd => "same start or same end offset",
            Self::Ignore => "spans are not compared",
            Self::SubSpan => "one span contains the other",
        }
    }
}

impl fmt::Display for SpanComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpanComparator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|comparator| comparator.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownComparator(s.to_string()))
    }
}
