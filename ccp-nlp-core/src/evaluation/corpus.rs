//! Corpus-level evaluation
//!
//! Annotations are grouped by document, every document is scored on its
//! own and the per-document results are merged. With the `parallel`
//! feature documents are scored on a rayon pool.

use super::annotation_comparator::AnnotationComparator;
use super::entity_parts::EntityPartsAnnotationComparator;
use super::prf::PrfResult;
use super::soft_match::SoftMatcher;
use crate::config::EvaluationConfig;
use crate::domain::annotation::TextAnnotation;
use crate::domain::mention::MentionComparator;
use crate::domain::monoid::MonoidReduce;
use crate::error::EvaluationError;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores the annotations of a single document
pub trait DocumentScorer<M>: Send + Sync {
    fn score_document(&self, gold: &[TextAnnotation<M>], test: &[TextAnnotation<M>])
        -> PrfResult<M>;
}

impl<M: Clone, C: MentionComparator<M>> DocumentScorer<M> for AnnotationComparator<C> {
    fn score_document(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M> {
        self.compare_collections(gold, test)
    }
}

impl<M: Clone, C: MentionComparator<M>> DocumentScorer<M> for EntityPartsAnnotationComparator<C> {
    fn score_document(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M> {
        self.compare_collections(gold, test)
    }
}

impl<M: Clone, C: MentionComparator<M>> DocumentScorer<M> for SoftMatcher<C> {
    fn score_document(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> PrfResult<M> {
        self.compare_collections(gold, test)
    }
}

/// Identifies a document within a corpus
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocumentKey {
    pub collection: i32,
    pub document_id: String,
}

impl DocumentKey {
    fn of<M>(annotation: &TextAnnotation<M>) -> Self {
        Self {
            collection: annotation.document_collection_id(),
            document_id: annotation.document_id().to_string(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document_id)
    }
}

type DocumentGroup<M> = (DocumentKey, Vec<TextAnnotation<M>>, Vec<TextAnnotation<M>>);

/// Scores whole corpora document by document
#[derive(Debug, Clone)]
pub struct CorpusEvaluator<S> {
    scorer: S,
    config: EvaluationConfig,
}

impl<S> CorpusEvaluator<S> {
    pub fn new(scorer: S, config: EvaluationConfig) -> Self {
        Self { scorer, config }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Score every document, in document key order
    ///
    /// Documents present on only one side are included. Evidence is dropped
    /// per document unless the configuration keeps it.
    pub fn evaluate_documents<M>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> Result<Vec<(DocumentKey, PrfResult<M>)>, EvaluationError>
    where
        S: DocumentScorer<M>,
        M: Clone + Send + Sync,
    {
        self.config.validate()?;
        let documents = group_by_document(gold, test);
        debug!(
            documents = documents.len(),
            gold = gold.len(),
            test = test.len(),
            "evaluating corpus"
        );
        self.score_groups(documents)
    }

    /// Score the corpus and merge the per-document results
    pub fn evaluate<M>(
        &self,
        gold: &[TextAnnotation<M>],
        test: &[TextAnnotation<M>],
    ) -> Result<PrfResult<M>, EvaluationError>
    where
        S: DocumentScorer<M>,
        M: Clone + Send + Sync,
    {
        let documents = self.evaluate_documents(gold, test)?;
        Ok(PrfResult::reduce(
            documents.into_iter().map(|(_, result)| result),
        ))
    }

    fn score_group<M>(&self, (key, gold, test): DocumentGroup<M>) -> (DocumentKey, PrfResult<M>)
    where
        S: DocumentScorer<M>,
    {
        let mut result = self.scorer.score_document(&gold, &test);
        if !self.config.keep_evidence() {
            result.trim();
        }
        (key, result)
    }

    #[cfg(feature = "parallel")]
    fn score_groups<M>(
        &self,
        documents: Vec<DocumentGroup<M>>,
    ) -> Result<Vec<(DocumentKey, PrfResult<M>)>, EvaluationError>
    where
        S: DocumentScorer<M>,
        M: Clone + Send + Sync,
    {
        if documents.len() < 2 {
            return Ok(documents
                .into_iter()
                .map(|group| self.score_group(group))
                .collect());
        }

        let threads = self.config.threads().unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ccp-eval-{i}"))
            .build()
            .map_err(|e| EvaluationError::ThreadPool {
                source: Box::new(e),
            })?;

        debug!(threads, "scoring documents in parallel");
        Ok(pool.install(|| {
            documents
                .into_par_iter()
                .map(|group| self.score_group(group))
                .collect()
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn score_groups<M>(
        &self,
        documents: Vec<DocumentGroup<M>>,
    ) -> Result<Vec<(DocumentKey, PrfResult<M>)>, EvaluationError>
    where
        S: DocumentScorer<M>,
        M: Clone + Send + Sync,
    {
        Ok(documents
            .into_iter()
            .map(|group| self.score_group(group))
            .collect())
    }
}

/// Partition both sides by document, keeping input order inside a document
fn group_by_document<M: Clone>(
    gold: &[TextAnnotation<M>],
    test: &[TextAnnotation<M>],
) -> Vec<DocumentGroup<M>> {
    let mut groups: BTreeMap<DocumentKey, (Vec<TextAnnotation<M>>, Vec<TextAnnotation<M>>)> =
        BTreeMap::new();
    for annotation in gold {
        groups
            .entry(DocumentKey::of(annotation))
            .or_default()
            .0
            .push(annotation.clone());
    }
    for annotation in test {
        groups
            .entry(DocumentKey::of(annotation))
            .or_default()
            .1
            .push(annotation.clone());
    }
    groups
        .into_iter()
        .map(|(key, (gold, test))| (key, gold, test))
        .collect()
}
