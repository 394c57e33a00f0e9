//! Scatter plots of traced curves, written as PNG files.

use std::{
    fs, io,
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;
use volterra_contour::{RenderError, Visualizer};

/// Errors that can occur while writing a plot.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("x and y sequences differ in length ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("failed to draw {path}: {message}")]
    Draw { path: PathBuf, message: String },
}

/// Creates the output directory, and any missing parents, if needed.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_output_dir(path: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// A [`Visualizer`] that writes `<dir>/<name>.png` for every render.
///
/// Points are drawn as small filled dots, prey on the horizontal axis and
/// predators on the vertical one, with both axes spanning the same range so
/// the curve keeps its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngPlotter {
    dir: PathBuf,
    size: (u32, u32),
    marker: u32,
}

impl PngPlotter {
    /// Default image size in pixels.
    pub const DEFAULT_SIZE: (u32, u32) = (800, 800);

    /// Creates a plotter writing into `dir`.
    ///
    /// The directory is not created here; call [`ensure_output_dir`] before
    /// the first render.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            size: Self::DEFAULT_SIZE,
            marker: 1,
        }
    }

    /// Sets the image size in pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Sets the marker radius in pixels.
    #[must_use]
    pub fn with_marker(mut self, radius: u32) -> Self {
        self.marker = radius;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a render under `name` writes to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// Writes one scatter plot and returns its path.
    ///
    /// # Errors
    ///
    /// Returns a [`PngError`] if the sequences differ in length or the
    /// image cannot be drawn or saved.
    pub fn plot(&self, xs: &[f64], ys: &[f64], name: &str) -> Result<PathBuf, PngError> {
        if xs.len() != ys.len() {
            return Err(PngError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let path = self.path_for(name);
        let draw = |message: String| PngError::Draw {
            path: path.clone(),
            message,
        };

        let (x_range, y_range) = square_ranges(xs, ys);
        {
            let root = BitMapBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(|e| draw(e.to_string()))?;

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .build_cartesian_2d(x_range, y_range)
                .map_err(|e| draw(e.to_string()))?;

            let marker = self.marker;
            chart
                .draw_series(
                    xs.iter()
                        .zip(ys)
                        .map(|(&x, &y)| Circle::new((x, y), marker, BLUE.filled())),
                )
                .map_err(|e| draw(e.to_string()))?;

            root.present().map_err(|e| draw(e.to_string()))?;
        }
        debug!(path = %path.display(), points = xs.len(), "plot written");

        Ok(path)
    }
}

impl Visualizer for PngPlotter {
    fn render(&mut self, xs: &[f64], ys: &[f64], name: &str) -> Result<(), RenderError> {
        self.plot(xs, ys, name)?;
        Ok(())
    }
}

/// Returns padded x and y ranges of equal span, centered on the data.
fn square_ranges(xs: &[f64], ys: &[f64]) -> (Range<f64>, Range<f64>) {
    let (x_lo, x_hi) = extent(xs);
    let (y_lo, y_hi) = extent(ys);
    let span = (x_hi - x_lo).max(y_hi - y_lo).max(1.0) * 1.05;

    let around = |lo: f64, hi: f64| {
        let mid = (lo + hi) / 2.0;
        (mid - span / 2.0)..(mid + span / 2.0)
    };
    (around(x_lo, x_hi), around(y_lo, y_hi))
}

fn extent(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}
