//! Input handling module

pub mod annotation_file;
pub mod glob_resolver;

pub use annotation_file::{load_annotations, AnnotationFile, AnnotationProblem};
pub use glob_resolver::resolve_patterns;
