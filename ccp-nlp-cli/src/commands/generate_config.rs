//! Generate config command implementation

use anyhow::{Context, Result};
use ccp_nlp_core::config::defaults;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it for scoring:");
        println!(
            "   ccp-eval score -g gold.json -t test.json -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template configuration content
pub fn generate_template() -> String {
    format!(
        r#"# ccp-eval configuration
# Command-line flags override every value set here.

[evaluation]
# strict, sloppy, shared-start, shared-end, shared-start-or-end, ignore, sub-span
comparator = "strict"
# name: classes must be identical; ignore: score spans only
mentions = "name"
# Nesting depth followed when comparing mentions
max_depth = {max_depth}
# Score word by word instead of whole annotations
entity_parts = false
# Graded matching: Dice threshold in (0, 1]; leave unset for exact matching
# soft_threshold = {soft_threshold}

[output]
# text, json or markdown
format = "text"
include_evidence = false
pretty_json = true

[performance]
# Number of worker threads (0 = all cores)
threads = 0
"#,
        max_depth = defaults::MAX_DEPTH,
        soft_threshold = defaults::SOFT_THRESHOLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ccp.toml");
        let args = GenerateConfigArgs {
            output: output.clone(),
            force: false,
        };

        args.execute().unwrap();
        assert!(output.exists());
        assert!(args.execute().is_err());

        let forced = GenerateConfigArgs {
            output,
            force: true,
        };
        assert!(forced.execute().is_ok());
    }
}
