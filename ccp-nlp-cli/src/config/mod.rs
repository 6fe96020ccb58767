//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use ccp_nlp_core::config::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Evaluation configuration
    #[serde(default)]
    pub evaluation: EvaluationSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceSection,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(e.to_string()))
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// How mentions (annotation classes) are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MentionMode {
    /// Classes must be identical
    #[default]
    Name,
    /// Classes are ignored, only spans are scored
    Ignore,
}

/// Evaluation-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationSection {
    /// Span comparator name
    pub comparator: String,

    /// Mention comparison mode
    pub mentions: MentionMode,

    /// Nesting depth for mention comparison
    pub max_depth: usize,

    /// Score word by word instead of whole annotations
    pub entity_parts: bool,

    /// Graded matching threshold; unset for exact matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_threshold: Option<f64>,
}

impl Default for EvaluationSection {
    fn default() -> Self {
        Self {
            comparator: "strict".to_string(),
            mentions: MentionMode::Name,
            max_depth: defaults::MAX_DEPTH,
            entity_parts: false,
            soft_threshold: None,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Default output format
    pub format: OutputFormat,

    /// List true positive, false positive and false negative annotations
    pub include_evidence: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            include_evidence: false,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceSection {
    /// Number of worker threads (0 = auto)
    pub threads: usize,
}

impl PerformanceSection {
    /// Thread count for the core configuration; `None` means all cores
    pub fn thread_count(&self) -> Option<usize> {
        (self.threads > 0).then_some(self.threads)
    }
}
