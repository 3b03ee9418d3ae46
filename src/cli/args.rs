//! Command-line arguments

use crate::cli::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "local_revenue")]
#[command(about = "TPC-H Q5 local supplier revenue, computed in parallel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the query over `.tbl` files
    #[command(after_help = "Example: local_revenue query ASIA 1995-01-01 1996-01-01 4 ./data/ output.txt")]
    Query {
        /// Region name, e.g. ASIA
        region: String,

        /// Inclusive start date (YYYY-MM-DD)
        start_date: String,

        /// Exclusive end date (YYYY-MM-DD)
        end_date: String,

        /// Number of worker threads
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        num_threads: u32,

        /// Directory holding region.tbl, nation.tbl, ... lineitem.tbl
        data_dir: PathBuf,

        /// Report file (stdout if omitted)
        output_path: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate synthetic TPC-H `.tbl` files
    Generate {
        /// Scale factor (0.01 = 15K orders, 1 = 1.5M orders)
        #[arg(short, long, default_value = "0.01")]
        sf: f64,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}
