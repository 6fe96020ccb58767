//! Domain layer: span algebra, matching policies and annotation model
//!
//! Everything here is pure and synchronous. The evaluation layer builds
//! alignment and scoring on top of these types.

pub mod annotation;
pub mod comparator;
pub mod mention;
pub mod monoid;
pub mod span;
pub mod span_utils;

pub use annotation::{SpanVec, TextAnnotation};
pub use comparator::SpanComparator;
pub use mention::{IgnoreMentions, MentionComparator, MentionNameComparator, MentionView};
pub use monoid::{Monoid, MonoidReduce};
pub use span::{join_spans, Span};
