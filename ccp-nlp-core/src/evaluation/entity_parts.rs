//! Word-level ("entity parts") scoring
//!
//! Each annotation is split into one pseudo-annotation per content word of
//! its covered text, and the word lists are aligned instead of the original
//! annotations. Partial credit for multi-word entities follows naturally.

use super::annotation_comparator::AnnotationComparator;
use super::prf::PrfResult;
use crate::domain::annotation::TextAnnotation;
use crate::domain::mention::MentionComparator;
use crate::domain::span::Span;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Function words dropped before word-level alignment
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it",
    "of", "on", "or", "that", "the", "this", "to", "was", "were", "with",
];

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\S+").expect("word pattern is valid"))
}

/// Aligns annotations word by word
#[derive(Debug, Clone)]
pub struct EntityPartsAnnotationComparator<C> {
    base: AnnotationComparator<C>,
    stop_words: HashSet<String>,
}

impl<C> EntityPartsAnnotationComparator<C> {
    /// Wrap `base` using [`DEFAULT_STOP_WORDS`]
    pub fn new(base: AnnotationComparator<C>) -> Self {
        Self {
            base,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Replace the stop-word list; matching is case-insensitive
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn base(&self) -> &AnnotationComparator<C> {
        &self.base
    }

    /// True for stop words and tokens without any alphanumeric character
    pub fn is_stop_word(&self, token: &str) -> bool {
        let core = token.trim_matches(|c: char| !c.is_alphanumeric());
        core.is_empty() || self.stop_words.contains(&core.to_lowercase())
    }

    /// One pseudo-annotation per content word of `annotation`
    ///
    /// Words are laid onto the annotation's spans in order. A word that no
    /// longer fits in the current span opens the next one, so the words of
    /// a discontiguous annotation land on the offsets it actually covers.
    /// Tokens without alphanumeric characters (such as a `..` joiner) never
    /// advance the span. Mentions are dropped; document metadata is kept.
    pub fn word_parts<M>(&self, annotation: &TextAnnotation<M>) -> Vec<TextAnnotation<M>> {
        let text = annotation.covered_text();
        let spans = annotation.spans();

        let mut words = Vec::new();
        let mut span_index = 0;
        let mut segment_start = 0;
        let mut scanned_bytes = 0;
        let mut scanned_chars = 0;
        for word in word_pattern().find_iter(text) {
            scanned_chars += text[scanned_bytes..word.start()].chars().count();
            scanned_bytes = word.end();

            let position = scanned_chars;
            let length = word.as_str().chars().count();
            scanned_chars += length;

            if !word.as_str().chars().any(char::is_alphanumeric) {
                continue;
            }

            if position - segment_start + length > spans[span_index].length()
                && span_index + 1 < spans.len()
            {
                span_index += 1;
                segment_start = position;
            }

            if !self.is_stop_word(word.as_str()) {
                let start = spans[span_index].start() + (position - segment_start);
                words.push(
                    TextAnnotation::from_span(Span::with_length(start, length), word.as_str())
                        .with_document(
                            annotation.document_id(),
                            annotation.document_collection_id(),
                        ),
                );
            }
        }
        words
    }

    fn flatten<M>(&self, annotations: &[TextAnnotation<M>]) -> Vec<TextAnnotation<M>> {
        annotations
            .iter()
            .flat_map(|annotation| self.word_parts(annotation))
            .collect()
    }

    /// Align the word parts of both collections
    pub fn compare_collections<M: Clone>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M>
    where
        C: MentionComparator<M>,
    {
        let gold_words = self.flatten(gold);
        let test_words = self.flatten(test);
        self.base.compare_collections(&gold_words, &test_words)
    }

    /// 0 if every word of each annotation is matched by the other, else -1
    ///
    /// Two annotations made only of stop words have nothing to align at the
    /// word level and are compared as whole annotations instead.
    pub fn compare<M: Clone>(&self, ta1: &TextAnnotation<M>, ta2: &TextAnnotation<M>) -> i32
    where
        C: MentionComparator<M>,
    {
        let words1 = self.word_parts(ta1);
        let words2 = self.word_parts(ta2);
        if words1.is_empty() && words2.is_empty() {
            return self.base.compare(ta1, ta2);
        }

        if self.base.compare_collections(&words1, &words2).f_measure() == 1.0 {
            0
        } else {
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comparator::SpanComparator;
    use crate::domain::mention::MentionNameComparator;

    fn parts_comparator() -> EntityPartsAnnotationComparator<MentionNameComparator> {
        EntityPartsAnnotationComparator::new(AnnotationComparator::new(
            SpanComparator::Strict,
            MentionNameComparator,
        ))
    }

    fn entity(start: usize, text: &str, class: &str) -> TextAnnotation {
        TextAnnotation::single(start, start + text.chars().count(), text)
            .unwrap()
            .with_document("doc", 0)
            .with_mention(class.to_string())
    }

    #[test]
    fn test_word_parts_skip_stop_words() {
        let comparator = parts_comparator();
        let words = comparator.word_parts(&entity(10, "cancer of the  lung", "disease"));
        let spans: Vec<Span> = words.iter().map(|w| w.spans()[0]).collect();
        assert_eq!(
            spans,
            vec![Span::new(10, 16).unwrap(), Span::new(25, 29).unwrap()]
        );
        assert_eq!(words[1].covered_text(), "lung");
        assert!(words.iter().all(|w| w.mention().is_none()));
        assert!(words.iter().all(|w| w.document_id() == "doc"));
    }

    #[test]
    fn test_word_offsets_count_characters() {
        let comparator = parts_comparator();
        let words = comparator.word_parts(&entity(0, "α-synuclein aggregates", "protein"));
        assert_eq!(words[1].spans()[0], Span::new(12, 22).unwrap());
    }

    #[test]
    fn test_discontiguous_words_follow_member_spans() {
        let comparator = parts_comparator();
        let annotation = TextAnnotation::<String>::new(
            [Span::new(0, 6).unwrap(), Span::new(20, 26).unwrap()],
            "kinase .. domain",
        )
        .unwrap();
        let spans: Vec<Span> = comparator
            .word_parts(&annotation)
            .iter()
            .map(|w| w.spans()[0])
            .collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 6).unwrap(), Span::new(20, 26).unwrap()]
        );

        let test = vec![TextAnnotation::<String>::single(20, 26, "domain").unwrap()];
        let result = comparator.compare_collections(std::slice::from_ref(&annotation), &test);
        assert_eq!(result.true_positive_count(), 1);
        assert_eq!(result.false_positive_count(), 0);
        assert_eq!(result.false_negative_count(), 1);
    }

    #[test]
    fn test_words_continue_within_later_span() {
        let comparator = parts_comparator();
        let annotation = TextAnnotation::<String>::new(
            [Span::new(0, 6).unwrap(), Span::new(20, 40).unwrap()],
            "kinase the catalytic domain",
        )
        .unwrap();
        let spans: Vec<Span> = comparator
            .word_parts(&annotation)
            .iter()
            .map(|w| w.spans()[0])
            .collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 6).unwrap(),
                Span::new(24, 33).unwrap(),
                Span::new(34, 40).unwrap(),
            ]
        );
    }

    #[test]
    fn test_stop_word_only_pair_compares_whole_annotations() {
        let comparator = parts_comparator();
        let the = entity(0, "the", "X");
        assert_ne!(comparator.compare(&the, &entity(500, "of", "Y")), 0);
        assert_ne!(comparator.compare(&the, &entity(0, "the", "Y")), 0);
        assert_eq!(comparator.compare(&the, &entity(0, "the", "X")), 0);
    }

    #[test]
    fn test_partial_credit() {
        let comparator = parts_comparator();
        let gold = vec![entity(0, "small cell lung cancer", "disease")];
        let test = vec![entity(6, "cell lung cancer", "disease")];
        let result = comparator.compare_collections(&gold, &test);
        assert_eq!(result.true_positive_count(), 3);
        assert_eq!(result.false_negative_count(), 1);
        assert_eq!(result.false_positive_count(), 0);
    }

    #[test]
    fn test_pairwise_requires_full_word_match() {
        let comparator = parts_comparator();
        let a = entity(0, "the lung", "disease");
        let b = entity(4, "lung", "anatomy");
        assert_eq!(comparator.compare(&a, &b), 0);
        assert_eq!(comparator.compare(&a, &entity(0, "the lungs", "x")), -1);
    }

    #[test]
    fn test_custom_stop_words() {
        let comparator = parts_comparator().with_stop_words(["Cancer"]);
        assert!(comparator.is_stop_word("cancer,"));
        assert!(!comparator.is_stop_word("the"));
        assert!(comparator.is_stop_word("--"));
    }
}
