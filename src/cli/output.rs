//! Output formatting for query reports
//!
//! Supports two output formats:
//! - Text: the run log with input counts, ranked revenue and timing (default)
//! - CSV: `nation,revenue` rows only

use crate::execution::QueryResult;
use std::io::{self, Write};
use std::path::Path;

/// Output format for query reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable run log
    #[default]
    Text,
    /// Comma-separated values
    Csv,
}

/// Renders a finished query run
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write the report for `result`, read from `data_dir`
    pub fn write<W: Write>(
        &self,
        writer: &mut W,
        data_dir: &Path,
        result: &QueryResult,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(writer, data_dir, result),
            OutputFormat::Csv => self.write_csv(writer, result),
        }
    }

    /// Format as string
    pub fn format_to_string(&self, data_dir: &Path, result: &QueryResult) -> String {
        let mut buffer = Vec::new();
        let _ = self.write(&mut buffer, data_dir, result);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn write_text<W: Write>(
        &self,
        writer: &mut W,
        data_dir: &Path,
        result: &QueryResult,
    ) -> io::Result<()> {
        let counts = &result.row_counts;

        writeln!(writer, "Reading data files from: {}", data_dir.display())?;
        writeln!(writer, "Data loading complete.")?;
        writeln!(writer, "Regions: {}", counts.region)?;
        writeln!(writer, "Nations: {}", counts.nation)?;
        writeln!(writer, "Customers: {}", counts.customer)?;
        writeln!(writer, "Orders: {}", counts.orders)?;
        writeln!(writer, "LineItems: {}", counts.lineitem)?;
        writeln!(writer, "Suppliers: {}", counts.supplier)?;
        writeln!(writer, "Launching {} threads...", result.metrics.workers)?;
        writeln!(writer, "Processing complete.")?;
        writeln!(writer)?;
        writeln!(writer, "Sorting results...")?;
        writeln!(writer, "Final Revenue by Nation:")?;
        for row in &result.rows {
            writeln!(writer, "{}: {:.2}", row.nation, row.revenue)?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "Execution Time: {:.6} seconds",
            result.metrics.execute_time.as_secs_f64()
        )?;
        Ok(())
    }

    fn write_csv<W: Write>(&self, writer: &mut W, result: &QueryResult) -> io::Result<()> {
        writeln!(writer, "nation,revenue")?;
        for row in &result.rows {
            writeln!(writer, "{},{:.2}", csv_escape(&row.nation), row.revenue)?;
        }
        Ok(())
    }
}

/// Quote if contains comma, quote, or newline
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
