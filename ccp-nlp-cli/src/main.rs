//! ccp-eval: score annotation files against a gold standard

use ccp_nlp_cli::commands::Commands;
use ccp_nlp_cli::CliResult;
use clap::Parser;

/// Precision, recall and F-measure for text annotations
#[derive(Debug, Parser)]
#[command(name = "ccp-eval", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
