//! Evaluation layer: alignment, scoring and corpus aggregation

pub mod annotation_comparator;
pub mod corpus;
pub mod entity_parts;
pub mod prf;
pub mod report;
pub mod soft_match;
pub mod stats;

pub use annotation_comparator::{Alignment, AnnotationComparator, METADATA_MISMATCH};
pub use corpus::{CorpusEvaluator, DocumentKey, DocumentScorer};
pub use entity_parts::{EntityPartsAnnotationComparator, DEFAULT_STOP_WORDS};
pub use prf::PrfResult;
pub use report::{class_breakdown, ScoreSummary};
pub use soft_match::{ScoredAnnotationMatch, SoftMatcher};
