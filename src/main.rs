//! Local supplier revenue CLI

use clap::{CommandFactory, Parser};
use local_revenue::cli::{Cli, Commands, OutputFormatter};
use local_revenue::execution::{ExecutionContext, QueryConfig};
use local_revenue::tpch::{read_tables, TpchGenerator};
use local_revenue::QueryError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

fn main() {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if let QueryError::InvalidArgument(msg) = &e {
            Cli::command()
                .error(clap::error::ErrorKind::ValueValidation, msg)
                .exit();
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> local_revenue::Result<()> {
    match cli.command {
        Commands::Query {
            region,
            start_date,
            end_date,
            num_threads,
            data_dir,
            output_path,
            format,
        } => {
            let config = QueryConfig::new(region, start_date, end_date, num_threads as usize);
            let ctx = ExecutionContext::new(config)?;

            tracing::info!("Reading data files from: {}", data_dir.display());
            let load_start = Instant::now();
            let tables = read_tables(&data_dir)?;
            tracing::info!("Data loading complete in {:?}", load_start.elapsed());

            let result = ctx.execute(&tables)?;
            let formatter = OutputFormatter::new(format);

            match output_path {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    formatter.write(&mut writer, &data_dir, &result)?;
                    writer.flush()?;
                    println!("Results written to: {}", path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    formatter.write(&mut stdout, &data_dir, &result)?;
                }
            }
        }

        Commands::Generate { sf, output, seed } => {
            let start = Instant::now();
            tracing::info!("Generating TPC-H data with scale factor {}", sf);
            TpchGenerator::with_seed(sf, seed).generate_to_tbl(&output)?;
            println!("Generated .tbl files in {:?}", start.elapsed());
        }
    }

    Ok(())
}
