//! Monte Carlo estimation of π.
//!
//! Points are drawn uniformly in the unit square; four times the fraction
//! landing inside the quarter disk `x² + y² ≤ 1` estimates π. A run repeats
//! the estimate at increasing sample counts from one seeded generator,
//! writes `results.csv` and renders a log-log plot of the absolute error
//! against `n` to `error_vs_n.png`.
//!
//! ```no_run
//! use monte_carlo_pi::{run, RunConfig};
//!
//! let report = run(&RunConfig::default())?;
//! assert_eq!(report.records.len(), 4);
//! # Ok::<(), monte_carlo_pi::Error>(())
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod monte_carlo;
pub mod plot;
pub mod results;

pub use config::{ConfigError, PlotConfig, RunConfig};
pub use driver::{estimate_all, run, write_confirmation, RunReport};
pub use error::{Error, Result};
pub use monte_carlo::{estimate_pi, seeded_rng, MonteCarloError};
pub use results::{convergence_slope, read_results, write_results, EstimateRecord};
