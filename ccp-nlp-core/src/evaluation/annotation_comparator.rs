//! Alignment of reference (gold) and test annotation collections
//!
//! Two annotations match when they belong to the same document, their spans
//! match under the configured [`SpanComparator`], and their mentions agree
//! under the configured [`MentionComparator`].
//!
//! Collection alignment picks its strategy from the span comparator:
//! policies that only match nearby spans use a sorted two-pointer sweep,
//! [`SpanComparator::Ignore`] falls back to comparing every pair. Both
//! strategies produce the same matches.

use super::prf::PrfResult;
use crate::config::{defaults, EvaluationConfig};
use crate::domain::annotation::TextAnnotation;
use crate::domain::comparator::SpanComparator;
use crate::domain::mention::MentionComparator;
use crate::domain::span::Span;
use tracing::{debug, trace};

/// Pairwise result for annotations from different documents
///
/// Large enough to dominate any span or mention ordering.
pub const METADATA_MISMATCH: i32 = -1000;

/// Which annotations on each side found a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Per gold annotation, in input order
    pub gold_matched: Vec<bool>,
    /// Per test annotation, in input order
    pub test_matched: Vec<bool>,
    /// Number of pairwise comparisons performed
    pub comparisons: usize,
}

impl Alignment {
    fn unmatched(gold: usize, test: usize) -> Self {
        Self {
            gold_matched: vec![false; gold],
            test_matched: vec![false; test],
            comparisons: 0,
        }
    }

    fn record(&mut self, gold: usize, test: usize) {
        self.gold_matched[gold] = true;
        self.test_matched[test] = true;
    }

    /// Turn match flags into a scored result
    ///
    /// Matched gold annotations are true positives, unmatched gold
    /// annotations false negatives and unmatched test annotations false
    /// positives. Evidence keeps input order.
    pub fn into_result<M: Clone>(
        self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M> {
        let (tp, fn_) = partition(gold, &self.gold_matched);
        let (_, fp) = partition(test, &self.test_matched);
        PrfResult::from_annotations(tp, fp, fn_)
    }
}

fn partition<M: Clone>(
    annotations: &[TextAnnotation<M>],
    matched: &[bool],
) -> (Vec<TextAnnotation<M>>, Vec<TextAnnotation<M>>) {
    let (hits, misses): (Vec<_>, Vec<_>) = annotations
        .iter()
        .zip(matched)
        .partition(|(_, is_matched)| **is_matched);
    (
        hits.into_iter().map(|(a, _)| a.clone()).collect(),
        misses.into_iter().map(|(a, _)| a.clone()).collect(),
    )
}

/// Compares annotations by document, spans and mentions
#[derive(Debug, Clone)]
pub struct AnnotationComparator<C> {
    span_comparator: SpanComparator,
    mention_comparator: C,
    max_depth: usize,
}

impl<C> AnnotationComparator<C> {
    pub fn new(span_comparator: SpanComparator, mention_comparator: C) -> Self {
        Self {
            span_comparator,
            mention_comparator,
            max_depth: defaults::MAX_DEPTH,
        }
    }

    /// Comparator using the span policy and depth of `config`
    pub fn from_config(config: &EvaluationConfig, mention_comparator: C) -> Self {
        Self::new(config.span_comparator(), mention_comparator).with_max_depth(config.max_depth())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn span_comparator(&self) -> SpanComparator {
        self.span_comparator
    }

    pub fn mention_comparator(&self) -> &C {
        &self.mention_comparator
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Three-way comparison of two annotations; 0 is a full match
    ///
    /// Annotations from different documents or collections return
    /// [`METADATA_MISMATCH`]. Otherwise the span ordering decides, then the
    /// mention ordering.
    ///
    /// The sub-scores are chained, not added together. A sum lets a span
    /// result of `1` and a mention result of `-1` cancel to a false `0`
    /// match, and its sign is no ordering. The first non-zero sub-score is
    /// returned as is.
    pub fn compare<M>(&self, ta1: &TextAnnotation<M>, ta2: &TextAnnotation<M>) -> i32
    where
        C: MentionComparator<M>,
    {
        if ta1.document_id() != ta2.document_id()
            || ta1.document_collection_id() != ta2.document_collection_id()
        {
            return METADATA_MISMATCH;
        }

        let by_span = self
            .span_comparator
            .compare_lists(ta1.spans(), ta2.spans());
        if by_span != 0 {
            return by_span;
        }

        self.compare_mentions(ta1.mention(), ta2.mention())
    }

    /// Mention ordering; absent mentions sort after present ones
    pub fn compare_mentions<M>(&self, m1: Option<&M>, m2: Option<&M>) -> i32
    where
        C: MentionComparator<M>,
    {
        match (m1, m2) {
            (Some(m1), Some(m2)) => {
                self.mention_comparator
                    .compare(m1, m2, self.span_comparator, self.max_depth)
            }
            (None, None) => 0,
            (None, Some(_)) => 1,
            (Some(_), None) => -1,
        }
    }

    /// Align two collections and score the result
    pub fn compare_collections<M: Clone>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M>
    where
        C: MentionComparator<M>,
    {
        self.align(gold, test).into_result(gold, test)
    }

    /// Align two collections with the strategy suited to the span policy
    pub fn align<M>(&self, gold: &[TextAnnotation<M>], test: &[TextAnnotation<M>]) -> Alignment
    where
        C: MentionComparator<M>,
    {
        let alignment = if self.span_comparator.spans_must_overlap_to_match() {
            self.align_sweep(gold, test)
        } else {
            self.align_all_pairs(gold, test)
        };

        debug!(
            comparator = %self.span_comparator,
            gold = gold.len(),
            test = test.len(),
            comparisons = alignment.comparisons,
            "aligned annotation collections"
        );
        alignment
    }

    /// Compare every gold annotation with every test annotation
    pub fn align_all_pairs<M>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> Alignment
    where
        C: MentionComparator<M>,
    {
        let mut alignment = Alignment::unmatched(gold.len(), test.len());
        for (g, gold_annotation) in gold.iter().enumerate() {
            for (t, test_annotation) in test.iter().enumerate() {
                alignment.comparisons += 1;
                if self.compare(gold_annotation, test_annotation) == 0 {
                    alignment.record(g, t);
                }
            }
        }
        alignment
    }

    /// Two-pointer sweep over both collections sorted by aggregate span
    ///
    /// Only valid when a match implies the aggregate spans touch, i.e. when
    /// [`SpanComparator::spans_must_overlap_to_match`] holds: a test
    /// annotation can then only match gold annotations it does not end
    /// before, and none that start after it ends.
    pub fn align_sweep<M>(&self, gold: &[TextAnnotation<M>], test: &[TextAnnotation<M>]) -> Alignment
    where
        C: MentionComparator<M>,
    {
        let mut alignment = Alignment::unmatched(gold.len(), test.len());
        let gold_order = sorted_by_aggregate(gold);
        let test_order = sorted_by_aggregate(test);

        let mut first_candidate = 0;
        for &(gold_span, g) in &gold_order {
            // Gold annotations arrive in start order, so test annotations
            // ending before this one starts can be dropped for good.
            while first_candidate < test_order.len()
                && test_order[first_candidate].0.end() < gold_span.start()
            {
                first_candidate += 1;
            }

            // Scan with a local cursor; the shared pointer stays at
            // `first_candidate` so the next gold annotation rescans from there.
            let mut cursor = first_candidate;
            while cursor < test_order.len() && test_order[cursor].0.start() <= gold_span.end() {
                let t = test_order[cursor].1;
                alignment.comparisons += 1;
                if self.compare(&gold[g], &test[t]) == 0 {
                    trace!(gold = g, test = t, "annotations matched");
                    alignment.record(g, t);
                }
                cursor += 1;
            }
        }
        alignment
    }
}

/// `(aggregate span, input index)` pairs sorted by span, ties by input order
fn sorted_by_aggregate<M>(annotations: &[TextAnnotation<M>]) -> Vec<(Span, usize)> {
    let mut order: Vec<(Span, usize)> = annotations
        .iter()
        .enumerate()
        .map(|(index, annotation)| (annotation.aggregate_span(), index))
        .collect();
    order.sort_unstable();
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mention::{IgnoreMentions, MentionNameComparator};

    fn go(start: usize, end: usize, class: &str) -> TextAnnotation {
        TextAnnotation::single(start, end, "")
            .unwrap()
            .with_document("doc-1", 0)
            .with_mention(class.to_string())
    }

    fn gold_and_test() -> (Vec<TextAnnotation>, Vec<TextAnnotation>) {
        let gold = vec![go(0, 13, "GO:0005622"), go(20, 50, "GO:0043231")];
        let test = vec![
            go(0, 13, "GO:0005622"),
            go(20, 50, "GO:0043231"),
            go(20, 33, "GO:0043229"),
        ];
        (gold, test)
    }

    #[test]
    fn test_exact_alignment_scenario() {
        let (gold, test) = gold_and_test();
        let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
        let result = comparator.compare_collections(&gold, &test);

        assert_eq!(result.true_positive_count(), 2);
        assert_eq!(result.false_positive_count(), 1);
        assert_eq!(result.false_negative_count(), 0);
        assert!((result.precision() - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(result.recall(), 1.0);
        assert_eq!(result.fp_annotations()[0].spans()[0].end(), 33);
    }

    #[test]
    fn test_sloppy_without_mentions_matches_everything() {
        let (gold, test) = gold_and_test();
        let comparator = AnnotationComparator::new(SpanComparator::Sloppy, IgnoreMentions);
        let result = comparator.compare_collections(&gold, &test);
        assert_eq!(result.true_positive_count(), 2);
        assert_eq!(result.false_positive_count(), 0);
    }

    #[test]
    fn test_metadata_mismatch_dominates() {
        let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
        let a = go(0, 5, "x");
        let b = go(0, 5, "x").with_document("doc-2", 0);
        let c = go(0, 5, "x").with_document("doc-1", 3);
        assert_eq!(comparator.compare(&a, &a.clone()), 0);
        assert_eq!(comparator.compare(&a, &b), METADATA_MISMATCH);
        assert_eq!(comparator.compare(&a, &c), METADATA_MISMATCH);
    }

    #[test]
    fn test_pairwise_span_then_mention() {
        let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
        assert_eq!(comparator.compare(&go(0, 5, "b"), &go(3, 9, "a")), -1);
        assert_eq!(comparator.compare(&go(0, 5, "b"), &go(0, 5, "a")), 1);
        // A later span with an earlier class must not cancel out to a match
        assert_eq!(comparator.compare(&go(3, 9, "a"), &go(0, 5, "b")), 1);

        let bare = TextAnnotation::<String>::single(0, 5, "")
            .unwrap()
            .with_document("doc-1", 0);
        assert_eq!(comparator.compare(&bare, &go(0, 5, "a")), 1);
        assert_eq!(comparator.compare(&bare, &bare.clone()), 0);
    }

    #[test]
    fn test_ignore_uses_all_pairs() {
        let gold = vec![go(0, 5, "a"), go(100, 120, "b")];
        let test = vec![go(500, 510, "b"), go(900, 901, "c")];
        let comparator = AnnotationComparator::new(SpanComparator::Ignore, MentionNameComparator);
        let alignment = comparator.align(&gold, &test);

        assert_eq!(alignment.comparisons, 4);
        assert_eq!(alignment.gold_matched, vec![false, true]);
        assert_eq!(alignment.test_matched, vec![true, false]);
    }

    #[test]
    fn test_sweep_prunes_comparisons() {
        let gold: Vec<_> = (0..50).map(|i| go(i * 10, i * 10 + 5, "t")).collect();
        let test: Vec<_> = (0..50).rev().map(|i| go(i * 10, i * 10 + 5, "t")).collect();
        let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);

        let sweep = comparator.align_sweep(&gold, &test);
        let brute = comparator.align_all_pairs(&gold, &test);
        assert_eq!(sweep.gold_matched, brute.gold_matched);
        assert_eq!(sweep.test_matched, brute.test_matched);
        assert!(sweep.comparisons < brute.comparisons);
        assert_eq!(brute.comparisons, 2500);
    }

    #[test]
    fn test_one_gold_can_match_several_tests() {
        let gold = vec![go(0, 20, "t")];
        let test = vec![go(0, 5, "t"), go(10, 20, "t"), go(30, 40, "t")];
        let comparator = AnnotationComparator::new(SpanComparator::Sloppy, MentionNameComparator);
        let result = comparator.compare_collections(&gold, &test);
        assert_eq!(result.true_positive_count(), 1);
        assert_eq!(result.false_positive_count(), 1);
        assert_eq!(result.false_negative_count(), 0);
    }

    #[test]
    fn test_empty_collections() {
        let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
        let result = comparator.compare_collections::<String>(&[], &[]);
        assert_eq!(result.f_measure(), 1.0);

        let (gold, _) = gold_and_test();
        let result = comparator.compare_collections(&gold, &[]);
        assert_eq!(result.false_negative_count(), 2);
        assert_eq!(result.recall(), 0.0);
    }
}
