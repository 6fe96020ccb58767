//! End-to-end scoring scenarios through the public API

use ccp_nlp_core::stats::{compute_classic_dice, compute_f_measure, compute_slot_error_rate};
use ccp_nlp_core::{
    AnnotationComparator, CorpusEvaluator, EntityPartsAnnotationComparator, EvaluationConfig,
    MentionNameComparator, PrfResult, SoftMatcher, Span, SpanComparator, TextAnnotation,
};
use std::collections::HashSet;

fn go(start: usize, end: usize, class: &str) -> TextAnnotation {
    TextAnnotation::single(start, end, "")
        .unwrap()
        .with_document("PMID:1", 0)
        .with_mention(class.to_string())
}

fn span(start: usize, end: usize) -> Span {
    Span::new(start, end).unwrap()
}

#[test]
fn test_go_term_scenario() {
    let gold = vec![go(0, 13, "GO:0005622"), go(20, 50, "GO:0043231")];
    let test = vec![
        go(0, 13, "GO:0005622"),
        go(20, 50, "GO:0043231"),
        go(20, 33, "GO:0043229"),
    ];

    let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
    let result = comparator
        .compare_collections(&gold, &test)
        .with_title("GO cellular component");

    assert_eq!(result.true_positive_count(), 2);
    assert_eq!(result.false_positive_count(), 1);
    assert_eq!(result.false_negative_count(), 0);
    assert!((result.precision() - 2.0 / 3.0).abs() < 1e-10);
    assert_eq!(result.recall(), 1.0);
    assert!((result.f_measure() - 0.8).abs() < 1e-10);
    assert_eq!(
        result.to_string(),
        "GO cellular component\n#TP:2 #FP:1 #FN:0\nP: 0.6667 R: 1.0000 F: 0.8000"
    );
}

#[test]
fn test_relaxed_policies_on_go_scenario() {
    let gold = vec![go(0, 13, "GO:0005622"), go(20, 50, "GO:0043231")];
    let test = vec![go(0, 10, "GO:0005622"), go(25, 50, "GO:0043231")];

    let expectations = [
        (SpanComparator::Strict, 0),
        (SpanComparator::Sloppy, 2),
        (SpanComparator::SharedStart, 1),
        (SpanComparator::SharedEnd, 1),
        (SpanComparator::SharedStartOrEnd, 2),
        (SpanComparator::SubSpan, 2),
        (SpanComparator::Ignore, 2),
    ];
    for (span_comparator, expected_tp) in expectations {
        let comparator = AnnotationComparator::new(span_comparator, MentionNameComparator);
        let result = comparator.compare_collections(&gold, &test);
        assert_eq!(
            result.true_positive_count(),
            expected_tp,
            "{span_comparator}"
        );
    }
}

#[test]
fn test_prf_boundary_fixtures() {
    let empty = PrfResult::<String>::from_counts(0, 0, 0);
    assert_eq!(
        (empty.precision(), empty.recall(), empty.f_measure()),
        (1.0, 1.0, 1.0)
    );

    let nothing_found = PrfResult::<String>::from_counts(0, 0, 4);
    assert_eq!(nothing_found.precision(), 1.0);
    assert_eq!(nothing_found.recall(), 0.0);
    assert_eq!(nothing_found.f_measure(), 0.0);

    let all_wrong = PrfResult::<String>::from_counts(0, 3, 0);
    assert_eq!(all_wrong.precision(), 0.0);
    assert_eq!(all_wrong.slot_error_rate(), f64::INFINITY);

    assert_eq!(compute_f_measure(0.0, 0.0), 0.0);
    assert_eq!(compute_slot_error_rate(3, 1, 1), 0.5);
}

#[test]
fn test_dice_does_not_consume_inputs() {
    let a: HashSet<&str> = ["cell", "interior"].into_iter().collect();
    let b: HashSet<&str> = ["cell", "membrane", "outer"].into_iter().collect();
    assert!((compute_classic_dice(&a, &b) - 0.4).abs() < 1e-10);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert_eq!(compute_classic_dice::<&str>(&HashSet::new(), &HashSet::new()), 1.0);
}

#[test]
fn test_sub_span_asymmetry_is_pinned() {
    let sub_span = SpanComparator::SubSpan;
    assert_eq!(sub_span.compare(&span(0, 6), &span(10, 12)), -1);
    assert_eq!(sub_span.compare(&span(10, 12), &span(0, 6)), -1);
    assert_eq!(sub_span.compare(&span(2, 4), &span(0, 10)), 0);
}

#[test]
fn test_discontiguous_annotations() {
    let kinase_domain = |spans: Vec<Span>| {
        TextAnnotation::new(spans, "kinase .. domain")
            .unwrap()
            .with_document("PMID:1", 0)
            .with_mention("SO:0000417".to_string())
    };
    let gold = vec![kinase_domain(vec![span(0, 6), span(20, 26)])];
    let test = vec![kinase_domain(vec![span(20, 26), span(0, 6)])];

    let strict = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
    assert_eq!(strict.compare_collections(&gold, &test).f_measure(), 1.0);

    let partial = vec![kinase_domain(vec![span(0, 6)])];
    assert_eq!(strict.compare_collections(&gold, &partial).true_positive_count(), 0);

    let sloppy = AnnotationComparator::new(SpanComparator::Sloppy, MentionNameComparator);
    assert_eq!(sloppy.compare_collections(&gold, &partial).true_positive_count(), 1);
}

#[test]
fn test_scoring_modes_through_corpus_evaluator() {
    let annotation = |doc: &str, start: usize, text: &str| {
        TextAnnotation::single(start, start + text.len(), text)
            .unwrap()
            .with_document(doc, 0)
            .with_mention("disease".to_string())
    };
    let gold = vec![
        annotation("d1", 0, "small cell lung cancer"),
        annotation("d2", 5, "asthma"),
    ];
    let test = vec![
        annotation("d1", 6, "cell lung cancer"),
        annotation("d2", 5, "asthma"),
    ];
    let config = EvaluationConfig::builder().threads(Some(2)).build().unwrap();

    let exact = CorpusEvaluator::new(
        AnnotationComparator::from_config(&config, MentionNameComparator),
        config.clone(),
    )
    .evaluate(&gold, &test)
    .unwrap();
    assert_eq!(exact.true_positive_count(), 1);
    assert_eq!(exact.false_negative_count(), 1);

    let parts = CorpusEvaluator::new(
        EntityPartsAnnotationComparator::new(AnnotationComparator::from_config(
            &config,
            MentionNameComparator,
        )),
        config.clone(),
    )
    .evaluate(&gold, &test)
    .unwrap();
    assert_eq!(parts.true_positive_count(), 4);
    assert_eq!(parts.false_negative_count(), 1);

    let soft = CorpusEvaluator::new(SoftMatcher::new(0.5, MentionNameComparator), config)
        .evaluate(&gold, &test)
        .unwrap();
    assert_eq!(soft.true_positive_count(), 2);
    assert_eq!(soft.false_positive_count(), 0);
}
