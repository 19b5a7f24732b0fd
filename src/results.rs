//! Estimate records and their tabular file.

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Column names of the results file, in order.
pub const HEADER: [&str; 3] = ["n", "pi_hat", "abs_error"];

/// One estimate at one sample count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub n: u64,
    pub pi_hat: f64,
    pub abs_error: f64,
}

impl EstimateRecord {
    /// Builds the record, taking the error against `std::f64::consts::PI`.
    pub fn new(n: u64, pi_hat: f64) -> Self {
        Self {
            n,
            pi_hat,
            abs_error: (pi_hat - PI).abs(),
        }
    }
}

/// Writes the header and one row per record, in the given order.
///
/// The header is written even when `records` is empty. Floats use the
/// shortest representation that parses back to the same value.
pub fn write_results(path: &Path, records: &[EstimateRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a file produced by [`write_results`].
pub fn read_results(path: &Path) -> Result<Vec<EstimateRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Least-squares slope of `ln(abs_error)` against `ln(n)`.
///
/// Around -0.5 when the error shrinks like `1/sqrt(n)`. Records with a zero
/// error have no logarithm and are ignored; `None` when fewer than two
/// distinct sample counts remain.
pub fn convergence_slope(records: &[EstimateRecord]) -> Option<f64> {
    let points: Vec<(f64, f64)> = records
        .iter()
        .filter(|r| r.n > 0 && r.abs_error > 0.0)
        .map(|r| ((r.n as f64).ln(), r.abs_error.ln()))
        .collect();
    if points.len() < 2 {
        return None;
    }

    let count = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / count;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
        .sum();

    if sxx == 0.0 {
        return None;
    }
    Some(sxy / sxx)
}
