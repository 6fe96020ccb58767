//! Span algebra and annotation scoring for NLP evaluation
//!
//! This crate compares reference ("gold") annotations with system ("test")
//! annotations over the same documents and reports precision, recall and
//! F-measure. Annotations are anchored to character-offset spans; whether
//! two annotations match is decided by a configurable span policy
//! ([`SpanComparator`]) together with a caller-supplied mention comparison
//! ([`MentionComparator`]).
//!
//! # Architecture
//!
//! - **Domain layer**: spans, span-list utilities, matching policies and the
//!   annotation model
//! - **Evaluation layer**: collection alignment, word-level and graded
//!   scoring, result aggregation across documents
//!
//! # Example
//!
//! ```rust
//! use ccp_nlp_core::{AnnotationComparator, MentionNameComparator, SpanComparator, TextAnnotation};
//!
//! let annotation = |start, end, class: &str| {
//!     TextAnnotation::single(start, end, "")
//!         .unwrap()
//!         .with_document("PMID:1", 0)
//!         .with_mention(class.to_string())
//! };
//!
//! let gold = vec![annotation(0, 13, "GO:0005622"), annotation(20, 50, "GO:0043231")];
//! let test = vec![
//!     annotation(0, 13, "GO:0005622"),
//!     annotation(20, 50, "GO:0043231"),
//!     annotation(20, 33, "GO:0043229"),
//! ];
//!
//! let comparator = AnnotationComparator::new(SpanComparator::Strict, MentionNameComparator);
//! let result = comparator.compare_collections(&gold, &test);
//!
//! assert_eq!(result.true_positive_count(), 2);
//! assert_eq!(result.false_positive_count(), 1);
//! assert_eq!(result.recall(), 1.0);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluation;

pub use config::{EvaluationConfig, EvaluationConfigBuilder};
pub use domain::*;
pub use error::{AnnotationError, ConfigError, EvaluationError, SpanError, SpanResult};
pub use evaluation::*;
