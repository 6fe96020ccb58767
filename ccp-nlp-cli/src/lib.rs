//! ccp-eval CLI library
//!
//! This library provides the command-line interface for scoring text
//! annotations against a gold standard with `ccp-nlp-core`.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
