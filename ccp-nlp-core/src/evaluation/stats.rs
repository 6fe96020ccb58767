//! Scalar evaluation statistics
//!
//! Zero denominators never produce NaN:
//! - precision and recall with nothing to count are `1.0` (nothing was
//!   missed and nothing was wrongly reported)
//! - F-measure with `p + r == 0` is `0.0`
//! - Dice over two empty sets is `1.0`
//! - slot error rate without reference annotations is `0.0`, or
//!   [`f64::INFINITY`] if anything was reported

use std::collections::HashSet;
use std::hash::Hash;

/// `tp / (tp + fp)`
pub fn compute_precision(true_positives: usize, false_positives: usize) -> f64 {
    ratio(true_positives, true_positives + false_positives)
}

/// `tp / (tp + fn)`
pub fn compute_recall(true_positives: usize, false_negatives: usize) -> f64 {
    ratio(true_positives, true_positives + false_negatives)
}

/// Balanced F-measure, `2pr / (p + r)`
pub fn compute_f_measure(precision: f64, recall: f64) -> f64 {
    compute_f_beta(precision, recall, 1.0)
}

/// Weighted F-measure, `(1 + b²)pr / (b²p + r)`
pub fn compute_f_beta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta_sq = beta * beta;
    let denominator = beta_sq * precision + recall;
    if denominator > 0.0 {
        (1.0 + beta_sq) * precision * recall / denominator
    } else {
        0.0
    }
}

/// Dice coefficient `2|A∩B| / (|A| + |B|)`; neither set is modified
pub fn compute_classic_dice<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let shared = a.intersection(b).count();
    2.0 * shared as f64 / total as f64
}

/// Slot error rate `(fp + fn) / (tp + fn)`
///
/// Insertions (`fp`) and deletions (`fn`) relative to the number of
/// reference annotations.
pub fn compute_slot_error_rate(
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
) -> f64 {
    let reference = true_positives + false_negatives;
    let errors = false_positives + false_negatives;
    if reference == 0 {
        return if errors == 0 { 0.0 } else { f64::INFINITY };
    }
    errors as f64 / reference as f64
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}
