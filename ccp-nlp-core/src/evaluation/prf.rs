//! Precision/recall/F-measure results with annotation evidence

use super::stats;
use crate::domain::annotation::TextAnnotation;
use crate::domain::monoid::Monoid;
use std::fmt;

/// Confusion counts, derived scores and (optionally) the annotations behind them
///
/// Derived scores are recomputed on every count change, so they are always
/// consistent with the counts. Evidence lists can be released with
/// [`PrfResult::trim`] once they are no longer needed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrfResult<M = String> {
    title: String,
    true_positive_count: usize,
    false_positive_count: usize,
    false_negative_count: usize,
    precision: f64,
    recall: f64,
    f_measure: f64,
    tp_annotations: Vec<TextAnnotation<M>>,
    fp_annotations: Vec<TextAnnotation<M>>,
    fn_annotations: Vec<TextAnnotation<M>>,
}

impl<M> PrfResult<M> {
    /// Empty result with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_counts(0, 0, 0).with_title(title)
    }

    /// Result from raw counts, without evidence
    pub fn from_counts(
        true_positive_count: usize,
        false_positive_count: usize,
        false_negative_count: usize,
    ) -> Self {
        let mut result = Self {
            title: String::new(),
            true_positive_count,
            false_positive_count,
            false_negative_count,
            precision: 0.0,
            recall: 0.0,
            f_measure: 0.0,
            tp_annotations: Vec::new(),
            fp_annotations: Vec::new(),
            fn_annotations: Vec::new(),
        };
        result.recompute();
        result
    }

    /// Result from evidence lists; counts are the list lengths
    pub fn from_annotations(
        tp_annotations: Vec<TextAnnotation<M>>,
        fp_annotations: Vec<TextAnnotation<M>>,
        fn_annotations: Vec<TextAnnotation<M>>,
    ) -> Self {
        let mut result =
            Self::from_counts(tp_annotations.len(), fp_annotations.len(), fn_annotations.len());
        result.tp_annotations = tp_annotations;
        result.fp_annotations = fp_annotations;
        result.fn_annotations = fn_annotations;
        result
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn true_positive_count(&self) -> usize {
        self.true_positive_count
    }

    pub fn false_positive_count(&self) -> usize {
        self.false_positive_count
    }

    pub fn false_negative_count(&self) -> usize {
        self.false_negative_count
    }

    pub fn set_true_positive_count(&mut self, count: usize) {
        self.true_positive_count = count;
        self.recompute();
    }

    pub fn set_false_positive_count(&mut self, count: usize) {
        self.false_positive_count = count;
        self.recompute();
    }

    pub fn set_false_negative_count(&mut self, count: usize) {
        self.false_negative_count = count;
        self.recompute();
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn recall(&self) -> f64 {
        self.recall
    }

    pub fn f_measure(&self) -> f64 {
        self.f_measure
    }

    /// Slot error rate for the current counts
    pub fn slot_error_rate(&self) -> f64 {
        stats::compute_slot_error_rate(
            self.true_positive_count,
            self.false_positive_count,
            self.false_negative_count,
        )
    }

    pub fn tp_annotations(&self) -> &[TextAnnotation<M>] {
        &self.tp_annotations
    }

    pub fn fp_annotations(&self) -> &[TextAnnotation<M>] {
        &self.fp_annotations
    }

    pub fn fn_annotations(&self) -> &[TextAnnotation<M>] {
        &self.fn_annotations
    }

    /// True if any evidence list is populated
    pub fn has_evidence(&self) -> bool {
        !(self.tp_annotations.is_empty()
            && self.fp_annotations.is_empty()
            && self.fn_annotations.is_empty())
    }

    /// Merge counts only; `other`'s evidence is not copied
    pub fn add<N>(&mut self, other: &PrfResult<N>) {
        self.true_positive_count += other.true_positive_count;
        self.false_positive_count += other.false_positive_count;
        self.false_negative_count += other.false_negative_count;
        self.recompute();
    }

    /// Merge counts and evidence
    pub fn add_all(&mut self, other: PrfResult<M>) {
        self.add(&other);
        self.tp_annotations.extend(other.tp_annotations);
        self.fp_annotations.extend(other.fp_annotations);
        self.fn_annotations.extend(other.fn_annotations);
        if self.title.is_empty() {
            self.title = other.title;
        }
    }

    /// Release the evidence lists, keeping counts and scores
    pub fn trim(&mut self) {
        self.tp_annotations = Vec::new();
        self.fp_annotations = Vec::new();
        self.fn_annotations = Vec::new();
    }

    fn recompute(&mut self) {
        self.precision =
            stats::compute_precision(self.true_positive_count, self.false_positive_count);
        self.recall = stats::compute_recall(self.true_positive_count, self.false_negative_count);
        self.f_measure = stats::compute_f_measure(self.precision, self.recall);
    }
}

impl<M> Default for PrfResult<M> {
    fn default() -> Self {
        Self::from_counts(0, 0, 0)
    }
}

impl<M: Clone + Send + Sync> Monoid for PrfResult<M> {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        let mut combined = self.clone();
        combined.add_all(other.clone());
        combined
    }
}

impl<M> fmt::Display for PrfResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
        }
        writeln!(
            f,
            "#TP:{} #FP:{} #FN:{}",
            self.true_positive_count, self.false_positive_count, self.false_negative_count
        )?;
        write!(
            f,
            "P: {:.4} R: {:.4} F: {:.4}",
            self.precision, self.recall, self.f_measure
        )
    }
}
