// src/io/reporting.rs

use crate::error::ExportError;
use crate::simulation::config::SimulationParameters;
use crate::simulation::dataset::{ColumnSummary, Dataset};
use crate::simulation::metrics::SimulationResult;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes results as CSV, header first, one row per result.
///
/// Returns the number of rows written.
pub fn write_results<W: Write>(writer: W, rows: &[SimulationResult]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in rows {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(rows.len())
}

/// Writes a dataset to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g., "results/queue_dataset.csv").
/// * `dataset` - The rows produced by a batch run.
pub fn write_dataset(file_path: impl AsRef<Path>, dataset: &Dataset) -> Result<usize, ExportError> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    let written = write_results(file, dataset.rows())?;

    info!(rows = written, path = %path.display(), "dataset exported");
    Ok(written)
}

/// The two-line verbose trace for a finished run.
pub fn run_summary(result: &SimulationResult) -> String {
    format!(
        "Simulation complete: {} served, {} rejected\n  Avg wait: {:.2}, Utilization: {:.2}%",
        result.customers_served,
        result.customers_rejected,
        result.avg_wait_time,
        result.utilization
    )
}

pub fn print_run_summary(result: &SimulationResult) {
    println!("{}", run_summary(result));
}

pub fn print_parameters(params: &SimulationParameters) {
    println!("Parameters:");
    println!("  arrival_rate: {:.4}", params.arrival_rate);
    println!("  service_rate: {:.4}", params.service_rate);
    println!("  num_servers: {}", params.num_servers);
    println!("  queue_capacity: {}", params.queue_capacity);
    println!("  simulation_time: {}", params.simulation_time);
}

/// Every derived metric of a run, floats to four decimals.
pub fn print_results(result: &SimulationResult) {
    println!("Results:");
    println!("  avg_wait_time: {:.4}", result.avg_wait_time);
    println!("  max_wait_time: {:.4}", result.max_wait_time);
    println!("  std_wait_time: {:.4}", result.std_wait_time);
    println!("  avg_queue_length: {:.4}", result.avg_queue_length);
    println!("  max_queue_length: {}", result.max_queue_length);
    println!("  avg_service_time: {:.4}", result.avg_service_time);
    println!("  customers_served: {}", result.customers_served);
    println!("  customers_rejected: {}", result.customers_rejected);
    println!("  rejection_rate: {:.4}", result.rejection_rate);
    println!("  throughput: {:.4}", result.throughput);
    println!("  utilization: {:.4}", result.utilization);
    println!("  service_level: {:.4}", result.service_level);
}

/// A describe-style table, one line per column.
pub fn summary_table(summary: &[ColumnSummary]) -> String {
    let mut out = format!(
        "{:<16}{:>8}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for c in summary {
        out.push_str(&format!(
            "\n{:<16}{:>8}{:>12.4}{:>12.4}{:>12.4}{:>12.4}{:>12.4}{:>12.4}{:>12.4}",
            c.name, c.count, c.mean, c.std, c.min, c.p25, c.p50, c.p75, c.max
        ));
    }
    out
}
