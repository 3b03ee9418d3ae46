//! Command-line front end
//!
//! Provides:
//! - Argument parsing for the `query` and `generate` subcommands
//! - Report formats for query results (text, CSV)

mod args;
mod output;

pub use args::{Cli, Commands};
pub use output::{OutputFormat, OutputFormatter};
