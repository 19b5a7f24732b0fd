//! Log-log plot of absolute error against sample count.
//!
//! The chart is drawn by `plotters` into an in-memory RGB buffer, wrapped as
//! an `image::RgbImage` and encoded with `png` so the file carries the
//! configured resolution in its `pHYs` chunk. Text uses a bundled DejaVu
//! Sans, so rendering never depends on fonts installed on the host.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::OnceLock;

use image::RgbImage;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::warn;

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::results::EstimateRecord;

pub const TITLE: &str = "Monte Carlo π: error vs n";
pub const X_LABEL: &str = "n";
pub const Y_LABEL: &str = "absolute error |π̂ − π|";

const FONT: &str = "sans-serif";
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Registers the bundled font under [`FONT`]; later calls reuse the outcome.
fn register_bundled_font() -> Result<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT, FontStyle::Normal, BUNDLED_FONT).is_ok());
    if registered {
        Ok(())
    } else {
        Err(Error::Render("bundled font is not a valid TrueType file".to_string()))
    }
}

fn render_error(err: impl std::fmt::Display) -> Error {
    Error::Render(err.to_string())
}

/// Points that can sit on log-scaled axes, in record order.
fn plottable_points(records: &[EstimateRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| {
            if r.n > 0 && r.abs_error > 0.0 && r.abs_error.is_finite() {
                Some((r.n as f64, r.abs_error))
            } else {
                warn!(n = r.n, abs_error = r.abs_error, "point cannot be shown on a log axis, skipped");
                None
            }
        })
        .collect()
}

/// Axis range covering `values` with half a decade of padding on each side.
fn log_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 1.0..10.0;
    }
    let pad = 10f64.sqrt();
    (lo / pad)..(hi * pad)
}

/// Draws the chart into a fresh RGB raster.
pub fn render_error_plot(records: &[EstimateRecord], config: &PlotConfig) -> Result<RgbImage> {
    register_bundled_font()?;

    let (width, height) = config.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    let points = plottable_points(records);
    let x_range = log_range(points.iter().map(|p| p.0));
    let y_range = log_range(points.iter().map(|p| p.1));

    let title_px = config.points_to_pixels(12.0);
    let label_px = config.points_to_pixels(10.0);
    let line_px = config.points_to_pixels(1.5);
    let marker_px = config.points_to_pixels(3.0);

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, (FONT, title_px))
            .margin(config.points_to_pixels(8.0))
            .x_label_area_size(config.points_to_pixels(30.0))
            .y_label_area_size(config.points_to_pixels(50.0))
            .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .label_style((FONT, label_px))
            .axis_desc_style((FONT, label_px))
            .x_label_formatter(&|v| format!("{:.0e}", v))
            .y_label_formatter(&|v| format!("{:.0e}", v))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(
                LineSeries::new(points, BLUE.stroke_width(line_px)).point_size(marker_px),
            )
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| render_error("raster buffer does not match image size"))
}

/// Encodes `image` as PNG with its resolution recorded in pixels per metre.
pub fn save_png(path: &Path, image: &RgbImage, config: &PlotConfig) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = config.pixels_per_metre();
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Renders the error plot and writes it to `path`.
pub fn write_error_plot(path: &Path, records: &[EstimateRecord], config: &PlotConfig) -> Result<()> {
    let image = render_error_plot(records, config)?;
    save_png(path, &image, config)
}
