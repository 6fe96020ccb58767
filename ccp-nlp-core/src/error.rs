//! Error types for span construction, annotations and configuration

use thiserror::Error;

/// Errors raised while building or mutating spans
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// Offsets violate `0 <= start <= end`
    #[error("Invalid span [{start}..{end}]: offsets must satisfy 0 <= start <= end")]
    InvalidSpan { start: i64, end: i64 },

    /// An operation needing at least one span received none
    #[error("Cannot compute a span from an empty span list")]
    EmptyInput,
}

/// Errors raised while building annotations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// Annotations must be anchored to at least one span
    #[error("Annotation must have at least one span")]
    NoSpans,

    /// One of the supplied spans is invalid
    #[error(transparent)]
    Span(#[from] SpanError),
}

/// Errors raised while validating an evaluation configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Thread count of zero
    #[error("Configuration error: threads must be greater than 0")]
    ZeroThreads,

    /// Soft-match threshold outside (0, 1]
    #[error("Configuration error: soft match threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Mention comparison depth of zero
    #[error("Configuration error: max_depth must be greater than 0")]
    ZeroDepth,

    /// Unknown span comparator name
    #[error("Unknown span comparator: {0}")]
    UnknownComparator(String),
}

/// Errors raised while evaluating a corpus
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The evaluation configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be created
    #[error("Failed to start evaluation workers: {source}")]
    ThreadPool {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for span operations
pub type SpanResult<T> = Result<T, SpanError>;
