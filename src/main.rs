use std::time::Instant;

use anyhow::Context;
use monte_carlo_pi::{run, write_confirmation, RunConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries only the two confirmation lines.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new("info"))
        .init();

    let config = RunConfig::default();

    let start = Instant::now();
    let report = run(&config).with_context(|| {
        format!(
            "Monte Carlo run failed (output directory {})",
            config.output_dir.display()
        )
    })?;
    info!(total_ms = start.elapsed().as_millis() as u64, "run complete");

    write_confirmation(&mut std::io::stdout().lock(), &report)
        .context("failed to print confirmation")?;
    Ok(())
}
