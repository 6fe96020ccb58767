//! Evaluation configuration

use crate::domain::comparator::SpanComparator;
use crate::error::ConfigError;

/// Default configuration constants
pub mod defaults {
    /// Nesting depth followed when comparing mentions
    pub const MAX_DEPTH: usize = 3;

    /// Minimum Dice score for a soft match
    pub const SOFT_THRESHOLD: f64 = 0.5;
}

/// How gold and test annotations are aligned and scored
///
/// Deserialized values are not validated; call [`EvaluationConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EvaluationConfig {
    pub(crate) span_comparator: SpanComparator,
    pub(crate) max_depth: usize,
    pub(crate) threads: Option<usize>, // None = all available cores
    pub(crate) keep_evidence: bool,
    pub(crate) soft_threshold: Option<f64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            span_comparator: SpanComparator::Strict,
            max_depth: defaults::MAX_DEPTH,
            threads: None,
            keep_evidence: true,
            soft_threshold: None,
        }
    }
}

impl EvaluationConfig {
    /// Create a configuration builder
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    pub fn span_comparator(&self) -> SpanComparator {
        self.span_comparator
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    pub fn keep_evidence(&self) -> bool {
        self.keep_evidence
    }

    /// Dice threshold when graded matching is enabled
    pub fn soft_threshold(&self) -> Option<f64> {
        self.soft_threshold
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }

        if let Some(threshold) = self.soft_threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::InvalidThreshold(threshold));
            }
        }

        Ok(())
    }
}

/// Fluent builder for [`EvaluationConfig`]
#[derive(Debug, Default)]
pub struct EvaluationConfigBuilder {
    span_comparator: Option<SpanComparator>,
    max_depth: Option<usize>,
    threads: Option<usize>,
    keep_evidence: Option<bool>,
    soft_threshold: Option<f64>,
}

impl EvaluationConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span matching policy
    pub fn span_comparator(mut self, comparator: SpanComparator) -> Self {
        self.span_comparator = Some(comparator);
        self
    }

    /// Set the span matching policy by name
    pub fn span_comparator_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.span_comparator = Some(name.parse()?);
        Ok(self)
    }

    /// Set how deep nested mentions are compared
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the number of worker threads (None = all available)
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.threads = count;
        self
    }

    /// Keep TP/FP/FN annotations in the result
    pub fn keep_evidence(mut self, keep: bool) -> Self {
        self.keep_evidence = Some(keep);
        self
    }

    /// Enable graded matching with the given Dice threshold
    pub fn soft_threshold(mut self, threshold: Option<f64>) -> Self {
        self.soft_threshold = threshold;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let mut config = EvaluationConfig::default();

        if let Some(comparator) = self.span_comparator {
            config.span_comparator = comparator;
        }

        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }

        if self.threads.is_some() {
            config.threads = self.threads;
        }

        if let Some(keep) = self.keep_evidence {
            config.keep_evidence = keep;
        }

        if self.soft_threshold.is_some() {
            config.soft_threshold = self.soft_threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvaluationConfig::default();
        assert_eq!(config.span_comparator(), SpanComparator::Strict);
        assert_eq!(config.max_depth(), defaults::MAX_DEPTH);
        assert!(config.keep_evidence());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EvaluationConfig::builder()
            .span_comparator_name("sloppy")
            .unwrap()
            .threads(Some(2))
            .keep_evidence(false)
            .soft_threshold(Some(0.75))
            .build()
            .unwrap();
        assert_eq!(config.span_comparator(), SpanComparator::Sloppy);
        assert_eq!(config.threads(), Some(2));
        assert!(!config.keep_evidence());
        assert_eq!(config.soft_threshold(), Some(0.75));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            EvaluationConfig::builder().threads(Some(0)).build(),
            Err(ConfigError::ZeroThreads)
        );
        assert_eq!(
            EvaluationConfig::builder().max_depth(0).build(),
            Err(ConfigError::ZeroDepth)
        );
        assert_eq!(
            EvaluationConfig::builder().soft_threshold(Some(0.0)).build(),
            Err(ConfigError::InvalidThreshold(0.0))
        );
        assert!(EvaluationConfig::builder()
            .soft_threshold(Some(f64::NAN))
            .build()
            .is_err());
        assert!(EvaluationConfig::builder()
            .span_comparator_name("fuzzy")
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_fills_defaults() {
        let config: EvaluationConfig =
            serde_json::from_str(r#"{ "span_comparator": "sub-span", "threads": 4 }"#).unwrap();
        assert_eq!(config.span_comparator(), SpanComparator::SubSpan);
        assert_eq!(config.threads(), Some(4));
        assert_eq!(config.max_depth(), defaults::MAX_DEPTH);
        assert!(config.keep_evidence());
        assert!(config.validate().is_ok());

        let invalid: EvaluationConfig = serde_json::from_str(r#"{ "max_depth": 0 }"#).unwrap();
        assert_eq!(invalid.validate(), Err(ConfigError::ZeroDepth));
    }
}
