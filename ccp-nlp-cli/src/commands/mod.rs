//! CLI command implementations

use anyhow::Result;
use ccp_nlp_core::SpanComparator;
use clap::{Subcommand, ValueEnum};

pub mod generate_config;
pub mod score;
pub mod validate;

use crate::output::OutputFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score test annotations against gold annotations
    Score(score::ScoreArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Check annotation files for invalid spans
    Validate(validate::ValidateArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Score(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available span comparators
    Comparators,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Listing text, one entry per line
    pub fn render(&self) -> String {
        match self {
            ListCommands::Comparators => SpanComparator::ALL
                .iter()
                .map(|c| format!("{:<20} {}\n", c.name(), c.description()))
                .collect(),
            ListCommands::Formats => OutputFormat::value_variants()
                .iter()
                .filter_map(|format| format.to_possible_value())
                .map(|value| {
                    format!(
                        "{:<20} {}\n",
                        value.get_name(),
                        value.get_help().map(|h| h.to_string()).unwrap_or_default()
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_comparators() {
        let listing = ListCommands::Comparators.render();
        assert_eq!(listing.lines().count(), SpanComparator::ALL.len());
        assert!(listing.lines().any(|line| line.starts_with("shared-start-or-end")));
        assert!(listing.lines().any(|line| line.starts_with("sub-span")));
    }

    #[test]
    fn test_list_formats() {
        let listing = ListCommands::Formats.render();
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.contains("markdown"));
        assert!(listing.contains("Markdown tables"));
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Comparators,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Comparators"));
    }
}
