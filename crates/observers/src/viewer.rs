//! Interactive viewer for traced curves.
//!
//! See [`CurveViewer`] for usage.

use eframe::egui;
use egui_plot::{Legend, Plot, PlotPoints, Points};
use volterra_contour::{RenderError, Visualizer};

/// Configuration for rendering a [`CurveViewer`] window.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// viewer.show(ShowConfig::new().title("Level curves").legend())?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    radius: f32,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, 1 px markers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            radius: 1.0,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Sets the marker radius in points.
    #[must_use]
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Visualizer`] that collects named point series and displays them via egui.
///
/// Pass `&mut CurveViewer` wherever a visualizer is expected, then call
/// [`show`][CurveViewer::show] once tracing is done. Use
/// [`only_runs`][CurveViewer::only_runs] to skip the per-region series so
/// each run appears once.
#[derive(Debug, Default)]
pub struct CurveViewer {
    series: Vec<(String, Vec<[f64; 2]>)>,
    only_runs: bool,
}

impl CurveViewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only whole-run series, dropping `-{n}` region series.
    #[must_use]
    pub fn only_runs(mut self) -> Self {
        self.only_runs = true;
        self
    }

    /// Records a named series of points.
    pub fn record(&mut self, name: &str, xs: &[f64], ys: &[f64]) {
        if self.only_runs && is_region(name) {
            return;
        }
        let points = xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect();
        self.series.push((name.to_owned(), points));
    }

    /// Opens a blocking egui window displaying all collected series.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();
        let series = self.series;

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(ViewerApp {
                    series,
                    legend: config.legend,
                    radius: config.radius,
                }))
            }),
        )
    }
}

impl Visualizer for CurveViewer {
    fn render(&mut self, xs: &[f64], ys: &[f64], name: &str) -> Result<(), RenderError> {
        if xs.len() != ys.len() {
            return Err(format!("`{name}`: {} x values but {} y values", xs.len(), ys.len()).into());
        }
        self.record(name, xs, ys);
        Ok(())
    }
}

/// Region artifacts are named `x{x0}y{y0}-{n}`.
fn is_region(name: &str) -> bool {
    name.rsplit_once('-')
        .is_some_and(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// The egui [`eframe::App`] that renders collected series.
struct ViewerApp {
    series: Vec<(String, Vec<[f64; 2]>)>,
    legend: bool,
    radius: f32,
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("curve_viewer")
                .data_aspect(1.0)
                .x_axis_label("Prey population")
                .y_axis_label("Predator population");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.series {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.points(Points::new(plot_points).name(name).radius(self.radius));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_render_as_a_series() {
        let mut viewer = CurveViewer::new();
        viewer
            .render(&[1.0, 2.0], &[3.0, 4.0], "x20y50")
            .expect("render succeeds");

        assert_eq!(viewer.series.len(), 1);
        assert_eq!(viewer.series[0].0, "x20y50");
        assert_eq!(viewer.series[0].1, [[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    fn only_runs_skips_region_series() {
        let mut viewer = CurveViewer::new().only_runs();
        for name in ["x20y50-1", "x20y50-4", "x20y50", "combined-plot"] {
            viewer.render(&[1.0], &[1.0], name).expect("render succeeds");
        }

        let names: Vec<&str> = viewer.series.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["x20y50", "combined-plot"]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut viewer = CurveViewer::new();
        assert!(viewer.render(&[1.0, 2.0], &[1.0], "bad").is_err());
        assert!(viewer.series.is_empty());
    }
}
