//! End-to-end run: sample, tabulate, plot.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::Result;
use crate::monte_carlo::{estimate_pi, seeded_rng};
use crate::plot::write_error_plot;
use crate::results::{convergence_slope, write_results, EstimateRecord};

/// What a completed run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub records: Vec<EstimateRecord>,
    pub results_path: PathBuf,
    pub plot_path: PathBuf,
}

/// Estimates π once per sample count, drawing every estimate from `rng`
/// without reseeding in between.
pub fn estimate_all<R: Rng + ?Sized>(sample_counts: &[u64], rng: &mut R) -> Result<Vec<EstimateRecord>> {
    let mut records = Vec::with_capacity(sample_counts.len());
    for &n in sample_counts {
        let start = Instant::now();
        let pi_hat = estimate_pi(n, rng)?;
        let record = EstimateRecord::new(n, pi_hat);
        info!(
            n,
            pi_hat,
            abs_error = record.abs_error,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "estimate complete"
        );
        records.push(record);
    }
    Ok(records)
}

/// Runs the whole pipeline for `config`.
///
/// The results file is written before the plot; the first failure aborts the
/// run.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    config.validate()?;
    info!(seed = config.seed, sample_counts = ?config.sample_counts, "starting run");

    let mut rng = seeded_rng(config.seed);
    let records = estimate_all(&config.sample_counts, &mut rng)?;

    match convergence_slope(&records) {
        Some(slope) => info!(slope, "log-log convergence slope (expected near -0.5)"),
        None => debug!("not enough points for a convergence slope"),
    }

    let results_path = config.results_path();
    write_results(&results_path, &records)?;
    info!(path = %results_path.display(), rows = records.len(), "results written");

    let plot_path = config.plot_path();
    write_error_plot(&plot_path, &records, &config.plot)?;
    info!(path = %plot_path.display(), dpi = config.plot.dpi, "plot written");

    Ok(RunReport {
        records,
        results_path,
        plot_path,
    })
}

/// Writes the two confirmation lines: results path first, then plot path.
pub fn write_confirmation(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    writeln!(out, "Wrote {}", report.results_path.display())?;
    writeln!(out, "Wrote {}", report.plot_path.display())?;
    out.flush()
}
