//! Validate command implementation

use crate::error::CliError;
use crate::input::{resolve_patterns, AnnotationFile};
use anyhow::Result;
use clap::Args;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Annotation files or patterns to check (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Every file is checked; the command fails if any file is invalid.
    pub fn execute(&self) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let mut first_failure = None;

        for path in &files {
            let file = match AnnotationFile::read(path) {
                Ok(file) => file,
                Err(e) => {
                    println!("✗ {}", path.display());
                    println!("  Error: {e:#}");
                    first_failure.get_or_insert_with(|| {
                        CliError::InvalidAnnotations {
                            path: path.display().to_string(),
                            problems: 1,
                        }
                    });
                    continue;
                }
            };

            let problems = file.problems();
            if problems.is_empty() {
                println!(
                    "✓ {}: {} documents, {} annotations",
                    path.display(),
                    file.documents.len(),
                    file.annotation_count()
                );
                continue;
            }

            println!("✗ {}: {} invalid annotation(s)", path.display(), problems.len());
            for problem in &problems {
                println!(
                    "  Document {} annotation #{}: {}",
                    problem.document, problem.index, problem.error
                );
            }
            first_failure.get_or_insert_with(|| CliError::InvalidAnnotations {
                path: path.display().to_string(),
                problems: problems.len(),
            });
        }

        match first_failure {
            Some(error) => Err(anyhow::anyhow!(error).context("Validation failed")),
            None => Ok(()),
        }
    }
}
