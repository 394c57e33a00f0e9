//! `volterra` traces level curves of the Lotka-Volterra invariant through a
//! set of initial points and writes a scatter plot per region, per curve,
//! and for all curves combined.

mod args;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use volterra_contour::{Combined, RenderError, Run, SolveSite, Visualizer, Watch, trace_observed};
use volterra_core::LotkaVolterra;
use volterra_observers::{PngPlotter, TraceObserver, ensure_output_dir};

#[cfg(feature = "show")]
use volterra_observers::{CurveViewer, ShowConfig};

use args::Cli;
use settings::{FileConfig, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file)?;

    let mut outputs = Outputs::default();
    if settings.plots {
        ensure_output_dir(&settings.out_dir).with_context(|| {
            format!("failed to create output directory {}", settings.out_dir.display())
        })?;
        outputs.png = Some(PngPlotter::new(&settings.out_dir));
    }
    if cli.show {
        #[cfg(feature = "show")]
        {
            outputs.viewer = Some(CurveViewer::new().only_runs());
        }
        #[cfg(not(feature = "show"))]
        anyhow::bail!("--show needs volterra-cli built with the `show` feature");
    }

    let invariant = LotkaVolterra::default();
    let runs = if settings.solver_events {
        let watch = |site: SolveSite| TraceObserver::new(site.to_string());
        trace_all(&invariant, &settings, &mut outputs, &watch)?
    } else {
        trace_all(&invariant, &settings, &mut outputs, &())?
    };

    for run in &runs {
        println!("{}", summary(run));
    }

    let combined: Combined = runs.iter().collect();
    combined
        .render(&mut outputs)
        .context("failed to render the combined plot")?;
    info!(
        runs = runs.len(),
        points = combined.points.len(),
        "all level curves traced"
    );

    #[cfg(feature = "show")]
    {
        if let Some(viewer) = outputs.viewer.take() {
            viewer
                .show(ShowConfig::new().title("Predator (y) vs Prey (x)").legend())
                .map_err(|e| anyhow::anyhow!("failed to open viewer: {e}"))?;
        }
    }

    Ok(())
}

/// Traces every initial point, rendering each run as it completes.
///
/// In parallel mode the runs are traced concurrently and rendered afterward
/// in input order, so artifacts match the sequential path.
fn trace_all<W: Watch>(
    invariant: &LotkaVolterra,
    settings: &Settings,
    outputs: &mut Outputs,
    watch: &W,
) -> Result<Vec<Run>> {
    if settings.parallel {
        let runs = settings
            .points
            .par_iter()
            .map(|&initial| {
                trace_observed(invariant, initial, &settings.run, &mut (), watch)
                    .with_context(|| format!("failed to trace from ({}, {})", initial.x(), initial.y()))
            })
            .collect::<Result<Vec<_>>>()?;
        for run in &runs {
            run.render(outputs)
                .with_context(|| format!("failed to render {}", run.name()))?;
        }
        Ok(runs)
    } else {
        settings
            .points
            .iter()
            .map(|&initial| {
                trace_observed(invariant, initial, &settings.run, &mut *outputs, watch)
                    .with_context(|| format!("failed to trace from ({}, {})", initial.x(), initial.y()))
            })
            .collect()
    }
}

fn summary(run: &Run) -> String {
    let accepted: usize = run.regions.iter().map(|region| region.points.len()).sum();
    let rejected: usize = run.regions.iter().map(|region| region.rejected).sum();
    let failed: usize = run.regions.iter().map(|region| region.failed).sum();
    let [x_min, x_max] = run.bounds.x.as_array();
    let [y_min, y_max] = run.bounds.y.as_array();

    format!(
        "{}: K = {:.6}, x in [{x_min:.6}, {x_max:.6}], y in [{y_min:.6}, {y_max:.6}], \
         {accepted} points ({rejected} rejected, {failed} failed)",
        run.name(),
        run.level.value(),
    )
}

/// Every enabled output, fed the same renders.
#[derive(Default)]
struct Outputs {
    png: Option<PngPlotter>,
    #[cfg(feature = "show")]
    viewer: Option<CurveViewer>,
}

impl Visualizer for Outputs {
    fn render(&mut self, xs: &[f64], ys: &[f64], name: &str) -> Result<(), RenderError> {
        if let Some(png) = &mut self.png {
            png.render(xs, ys, name)?;
        }
        #[cfg(feature = "show")]
        {
            if let Some(viewer) = &mut self.viewer {
                viewer.render(xs, ys, name)?;
            }
        }
        Ok(())
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use volterra_contour::{RunConfig, ScanConfig};
    use volterra_core::Point;

    fn settings(parallel: bool) -> Settings {
        let run = RunConfig {
            scan: ScanConfig::new(1.0, 0).expect("valid scan config"),
            parallel,
            ..RunConfig::default()
        };
        Settings {
            points: vec![
                Point::new(20.0, 50.0).expect("valid point"),
                Point::new(200.0, 50.0).expect("valid point"),
            ],
            out_dir: "unused".into(),
            plots: false,
            parallel,
            solver_events: false,
            run,
        }
    }

    #[test]
    fn parallel_runs_match_sequential_runs() {
        let invariant = LotkaVolterra::default();

        let sequential = trace_all(&invariant, &settings(false), &mut Outputs::default(), &())
            .expect("runs succeed");
        let parallel = trace_all(&invariant, &settings(true), &mut Outputs::default(), &())
            .expect("runs succeed");

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn logging_solver_events_leaves_runs_unchanged() {
        let invariant = LotkaVolterra::default();
        let watch = |site: SolveSite| TraceObserver::new(site.to_string());

        let quiet = trace_all(&invariant, &settings(true), &mut Outputs::default(), &())
            .expect("runs succeed");
        let logged = trace_all(&invariant, &settings(true), &mut Outputs::default(), &watch)
            .expect("runs succeed");

        assert_eq!(quiet, logged);
    }

    #[test]
    fn writes_every_artifact() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut outputs = Outputs {
            png: Some(PngPlotter::new(dir.path()).with_size(120, 120)),
            ..Outputs::default()
        };
        let invariant = LotkaVolterra::default();

        let runs = trace_all(&invariant, &settings(true), &mut outputs, &()).expect("runs succeed");
        runs.iter()
            .collect::<Combined>()
            .render(&mut outputs)
            .expect("combined plot renders");

        for name in [
            "x20y50-1",
            "x20y50-4",
            "x20y50",
            "x200y50-3",
            "x200y50",
            "combined-plot",
        ] {
            assert!(dir.path().join(format!("{name}.png")).is_file(), "{name} missing");
        }
    }

    #[test]
    fn summary_reports_counts() {
        let invariant = LotkaVolterra::default();
        let runs = trace_all(&invariant, &settings(false), &mut Outputs::default(), &())
            .expect("runs succeed");

        let line = summary(&runs[0]);

        assert!(line.starts_with("x20y50: K = 1.830"), "{line}");
        assert!(line.contains("0 rejected"), "{line}");
    }
}
