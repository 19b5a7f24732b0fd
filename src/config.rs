//! Run configuration.
//!
//! The binary always runs [`RunConfig::default`]; other configurations exist
//! so tests and embedding callers can redirect output or shrink the run.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Seed used by the default run.
pub const DEFAULT_SEED: u64 = 42;

/// Sample counts used by the default run, in processing order.
pub const DEFAULT_SAMPLE_COUNTS: [u64; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// Configuration validation error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one sample count is required")]
    NoSampleCounts,
    #[error("sample count at position {index} is zero")]
    ZeroSampleCount {
        index: usize,
    },
    #[error("sample counts must be strictly increasing: {previous} is followed by {next}")]
    UnorderedSampleCounts {
        previous: u64,
        next: u64,
    },
    #[error("invalid plot parameter '{name}': {value}")]
    InvalidPlotParameter {
        name: &'static str,
        value: String,
    },
}

/// Raster settings for the error plot.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    pub dpi: u32,
    pub figure_size_inches: (f64, f64),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            dpi: 200,
            figure_size_inches: (6.4, 4.8),
        }
    }
}

impl PlotConfig {
    /// Pixel dimensions of the rendered image.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (width, height) = self.figure_size_inches;
        let dpi = f64::from(self.dpi);
        ((width * dpi).round() as u32, (height * dpi).round() as u32)
    }

    /// Scales a size given in typographic points to pixels at this DPI.
    pub fn points_to_pixels(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / 72.0).round() as u32
    }

    /// Resolution as pixels per metre, the unit PNG stores.
    pub fn pixels_per_metre(&self) -> u32 {
        (f64::from(self.dpi) / 0.0254).round() as u32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 {
            return Err(ConfigError::InvalidPlotParameter {
                name: "dpi",
                value: "must be positive".to_string(),
            });
        }
        let (width, height) = self.figure_size_inches;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::InvalidPlotParameter {
                name: "figure_size_inches",
                value: format!("({}, {}) must both be positive", width, height),
            });
        }
        let (px_width, px_height) = self.pixel_size();
        if px_width == 0 || px_height == 0 {
            return Err(ConfigError::InvalidPlotParameter {
                name: "figure_size_inches",
                value: "rounds to an empty image".to_string(),
            });
        }
        Ok(())
    }
}

/// Full configuration of one estimation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    pub sample_counts: Vec<u64>,
    pub output_dir: PathBuf,
    pub results_file: String,
    pub plot_file: String,
    pub plot: PlotConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            sample_counts: DEFAULT_SAMPLE_COUNTS.to_vec(),
            output_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            results_file: "results.csv".to_string(),
            plot_file: "error_vs_n.png".to_string(),
            plot: PlotConfig::default(),
        }
    }
}

impl RunConfig {
    /// Default configuration writing into `dir` instead of the crate directory.
    pub fn with_output_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(&self.results_file)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.plot_file)
    }

    /// Checks the configuration before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_counts.is_empty() {
            return Err(ConfigError::NoSampleCounts);
        }
        if let Some(index) = self.sample_counts.iter().position(|&n| n == 0) {
            return Err(ConfigError::ZeroSampleCount { index });
        }
        for pair in self.sample_counts.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ConfigError::UnorderedSampleCounts {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        self.plot.validate()
    }
}
