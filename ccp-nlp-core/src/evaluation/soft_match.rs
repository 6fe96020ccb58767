//! Graded matching by character overlap
//!
//! Every same-document gold/test pair whose mentions agree is scored with
//! the Dice coefficient of the character offsets the two annotations cover,
//! computed from normalized intervals rather than per-offset sets.
//! Candidates at or above the threshold are assigned greedily, best score
//! first, so each annotation takes part in at most one match.

use super::prf::PrfResult;
use crate::config::defaults;
use crate::domain::annotation::TextAnnotation;
use crate::domain::comparator::SpanComparator;
use crate::domain::mention::MentionComparator;
use crate::domain::span::Span;
use crate::domain::span_utils::normalize_spans;
use tracing::debug;

/// A scored gold/test candidate pair, by input index
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredAnnotationMatch {
    pub score: f64,
    pub reference: usize,
    pub test: usize,
}

/// Greedy one-to-one matcher over Dice scores
#[derive(Debug, Clone)]
pub struct SoftMatcher<C> {
    threshold: f64,
    mention_comparator: C,
    max_depth: usize,
}

impl<C> SoftMatcher<C> {
    /// Matcher keeping candidates scoring at least `threshold`
    pub fn new(threshold: f64, mention_comparator: C) -> Self {
        Self {
            threshold,
            mention_comparator,
            max_depth: defaults::MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// All candidate pairs at or above the threshold, best first
    ///
    /// Equal scores keep gold-major input order.
    pub fn candidates<M>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> Vec<ScoredAnnotationMatch>
    where
        C: MentionComparator<M>,
    {
        let test_covered: Vec<Vec<Span>> = test
            .iter()
            .map(|annotation| normalize_spans(annotation.spans()))
            .collect();

        let mut candidates = Vec::new();
        for (g, gold_annotation) in gold.iter().enumerate() {
            let gold_covered = normalize_spans(gold_annotation.spans());
            for (t, test_annotation) in test.iter().enumerate() {
                if !same_document(gold_annotation, test_annotation)
                    || !self.mentions_agree(gold_annotation, test_annotation)
                {
                    continue;
                }

                let score = match dice_overlap(&gold_covered, &test_covered[t]) {
                    Some(score) => score,
                    // Zero-length annotations only match the exact same position
                    None if gold_annotation.spans() == test_annotation.spans() => 1.0,
                    None => 0.0,
                };
                if score >= self.threshold {
                    candidates.push(ScoredAnnotationMatch {
                        score,
                        reference: g,
                        test: t,
                    });
                }
            }
        }

        // Stable sort, scores are never NaN
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Greedy assignment, best-scoring pairs first
    pub fn assign<M>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> Vec<ScoredAnnotationMatch>
    where
        C: MentionComparator<M>,
    {
        let mut gold_taken = vec![false; gold.len()];
        let mut test_taken = vec![false; test.len()];

        let assigned: Vec<ScoredAnnotationMatch> = self
            .candidates(gold, test)
            .into_iter()
            .filter(|candidate| {
                if gold_taken[candidate.reference] || test_taken[candidate.test] {
                    return false;
                }
                gold_taken[candidate.reference] = true;
                test_taken[candidate.test] = true;
                true
            })
            .collect();

        debug!(
            threshold = self.threshold,
            gold = gold.len(),
            test = test.len(),
            matched = assigned.len(),
            "soft matching assigned pairs"
        );
        assigned
    }

    /// Score two collections by one-to-one soft matching
    pub fn compare_collections<M: Clone>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M>
    where
        C: MentionComparator<M>,
    {
        let mut gold_matched = vec![false; gold.len()];
        let mut test_matched = vec![false; test.len()];
        for assigned in self.assign(gold, test) {
            gold_matched[assigned.reference] = true;
            test_matched[assigned.test] = true;
        }

        let tp = select(gold, &gold_matched, true);
        let fn_ = select(gold, &gold_matched, false);
        let fp = select(test, &test_matched, false);
        PrfResult::from_annotations(tp, fp, fn_)
    }

    fn mentions_agree<M>(&self, a: &TextAnnotation<M>, b: &TextAnnotation<M>) -> bool
    where
        C: MentionComparator<M>,
    {
        match (a.mention(), b.mention()) {
            (Some(m1), Some(m2)) => {
                self.mention_comparator
                    .compare(m1, m2, SpanComparator::Sloppy, self.max_depth)
                    == 0
            }
            (None, None) => true,
            _ => false,
        }
    }
}

fn same_document<M>(a: &TextAnnotation<M>, b: &TextAnnotation<M>) -> bool {
    a.document_id() == b.document_id()
        && a.document_collection_id() == b.document_collection_id()
}

/// Dice coefficient of the offsets covered by two normalized span lists
///
/// Both inputs must be sorted and disjoint, as [`normalize_spans`] returns
/// them. `None` when neither list covers any offset.
fn dice_overlap(a: &[Span], b: &[Span]) -> Option<f64> {
    let total: usize = a.iter().chain(b).map(Span::length).sum();
    if total == 0 {
        return None;
    }

    let mut shared = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start().max(b[j].start());
        let end = a[i].end().min(b[j].end());
        shared += end.saturating_sub(start);
        if a[i].end() <= b[j].end() {
            i += 1;
        } else {
            j += 1;
        }
    }

    Some(2.0 * shared as f64 / total as f64)
}

fn select<M: Clone>(
    annotations: &[TextAnnotation<M>],
    matched: &[bool],
    wanted: bool,
) -> Vec<TextAnnotation<M>> {
    annotations
        .iter()
        .zip(matched)
        .filter(|(_, is_matched)| **is_matched == wanted)
        .map(|(annotation, _)| annotation.clone())
        .collect()
}
