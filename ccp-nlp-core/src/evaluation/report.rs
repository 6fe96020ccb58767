//! Evidence-free report views over [`PrfResult`]

use super::prf::PrfResult;
use crate::domain::annotation::TextAnnotation;
use std::collections::BTreeMap;

/// Counts and scores of one result, detached from its evidence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreSummary {
    pub title: String,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f_measure: f64,
    pub slot_error_rate: f64,
}

impl<M> From<&PrfResult<M>> for ScoreSummary {
    fn from(result: &PrfResult<M>) -> Self {
        Self {
            title: result.title().to_string(),
            true_positives: result.true_positive_count(),
            false_positives: result.false_positive_count(),
            false_negatives: result.false_negative_count(),
            precision: result.precision(),
            recall: result.recall(),
            f_measure: result.f_measure(),
            slot_error_rate: result.slot_error_rate(),
        }
    }
}

/// Per-class scores rebuilt from the evidence lists of `result`
///
/// `class_of` names the class of an annotation. Results carry counts only
/// and are titled with the class name. Empty when `result` has no evidence.
pub fn class_breakdown<M, F>(result: &PrfResult<M>, class_of: F) -> BTreeMap<String, PrfResult<M>>
where
    F: Fn(&TextAnnotation<M>) -> String,
{
    let mut classes: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();

    for annotation in result.tp_annotations() {
        classes.entry(class_of(annotation)).or_default().0 += 1;
    }
    for annotation in result.fp_annotations() {
        classes.entry(class_of(annotation)).or_default().1 += 1;
    }
    for annotation in result.fn_annotations() {
        classes.entry(class_of(annotation)).or_default().2 += 1;
    }

    classes
        .into_iter()
        .map(|(class, (tp, fp, fn_))| {
            let scores = PrfResult::from_counts(tp, fp, fn_).with_title(class.clone());
            (class, scores)
        })
        .collect()
}
