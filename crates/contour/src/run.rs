//! Traces the full level curve through one initial point.

use std::error::Error as StdError;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use volterra_core::{DomainError, Invariant, IntervalError, Level, Point};
use volterra_solvers::equation::regula_falsi;

use crate::{
    boundary::{self, BoundaryConfig, BoundaryError, Bounds},
    scan::{self, Region, RegionScan, ScanConfig},
    site::Watch,
};

/// Error returned by a [`Visualizer`].
pub type RenderError = Box<dyn StdError + Send + Sync>;

/// Receives named point sequences as a run produces them.
///
/// `xs` and `ys` are parallel: the i-th point is `(xs[i], ys[i])`.
pub trait Visualizer {
    /// Renders one named sequence of points.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be produced.
    fn render(&mut self, xs: &[f64], ys: &[f64], name: &str) -> Result<(), RenderError>;
}

/// A visualizer that discards everything.
impl Visualizer for () {
    fn render(&mut self, _xs: &[f64], _ys: &[f64], _name: &str) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<V: Visualizer + ?Sized> Visualizer for &mut V {
    fn render(&mut self, xs: &[f64], ys: &[f64], name: &str) -> Result<(), RenderError> {
        (**self).render(xs, ys, name)
    }
}

/// Settings for every stage of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunConfig {
    pub boundary: BoundaryConfig,
    pub scan: ScanConfig,
    pub root: regula_falsi::Config,
    /// Scan the four regions concurrently.
    pub parallel: bool,
}

/// Errors that can abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("boundary estimation failed")]
    Boundary(#[from] BoundaryError),

    #[error("domain center lies outside the curve's extent")]
    Region(#[from] IntervalError),

    #[error("boundary crossing is not a valid point")]
    Domain(#[from] DomainError),

    #[error("failed to render `{name}`")]
    Render {
        name: String,
        #[source]
        source: RenderError,
    },
}

/// The sampled level curve through one initial point.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub initial: Point,
    pub level: Level,
    pub bounds: Bounds,
    /// Per-region results in quadrant order.
    pub regions: Vec<RegionScan>,
    /// The four boundary crossings followed by every region's points.
    pub points: Vec<Point>,
}

impl Run {
    /// Returns the artifact name of the whole run, `x{x0}y{y0}`.
    #[must_use]
    pub fn name(&self) -> String {
        artifact_name(self.initial)
    }

    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(Point::x).collect()
    }

    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(Point::y).collect()
    }

    /// Renders each region as `x{x0}y{y0}-{n}`, with `n` the 1-based
    /// quadrant number, then the whole run as `x{x0}y{y0}`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Render`] naming the first artifact that failed.
    pub fn render<V>(&self, visualizer: &mut V) -> Result<(), RunError>
    where
        V: Visualizer + ?Sized,
    {
        let name = self.name();
        for region in &self.regions {
            render(
                visualizer,
                &region.xs(),
                &region.ys(),
                format!("{name}-{}", region.quadrant.number()),
            )?;
        }
        render(visualizer, &self.xs(), &self.ys(), name)
    }
}

/// Samples the level curve of `invariant` that passes through `initial`.
///
/// The finished run is handed to `visualizer` through [`Run::render`], in
/// quadrant order whether or not the regions were scanned in parallel.
///
/// # Errors
///
/// Returns a [`RunError`] if the boundaries cannot be found or the
/// visualizer fails. Failures at individual scan steps are counted in the
/// region results instead.
pub fn trace<I, V>(
    invariant: &I,
    initial: Point,
    config: &RunConfig,
    visualizer: &mut V,
) -> Result<Run, RunError>
where
    I: Invariant + Sync,
    V: Visualizer + ?Sized,
{
    trace_observed(invariant, initial, config, visualizer, &())
}

/// Like [`trace`], attaching an observer from `watch` to every root-finder
/// solve of the run.
///
/// # Errors
///
/// Returns the same errors as [`trace`].
pub fn trace_observed<I, V, W>(
    invariant: &I,
    initial: Point,
    config: &RunConfig,
    visualizer: &mut V,
    watch: &W,
) -> Result<Run, RunError>
where
    I: Invariant + Sync,
    V: Visualizer + ?Sized,
    W: Watch + ?Sized,
{
    let level = Level::through(invariant, initial);
    let center = config.boundary.center();
    debug!(x0 = initial.x(), y0 = initial.y(), level = level.value(), "tracing level curve");

    let bounds = boundary::estimate_observed(
        invariant,
        level,
        initial,
        &config.boundary,
        &config.root,
        watch,
    )?;
    let regions = Region::quadrants(&bounds, center)?;

    let f = |x: f64, y: f64| invariant.residual(x, y, level);
    let solve = |region: &Region| scan::scan_observed(f, region, &config.scan, &config.root, watch);
    let regions: Vec<RegionScan> = if config.parallel {
        regions.par_iter().map(solve).collect()
    } else {
        regions.iter().map(solve).collect()
    };

    let mut points = bounds.crossings(center)?.to_vec();
    for region in &regions {
        points.extend_from_slice(&region.points);
    }

    let run = Run {
        initial,
        level,
        bounds,
        regions,
        points,
    };
    run.render(visualizer)?;

    info!(
        name = %run.name(),
        level = level.value(),
        points = run.points.len(),
        "level curve traced",
    );
    Ok(run)
}

/// Renders under `name`, attaching the name to any failure.
pub(crate) fn render<V>(
    visualizer: &mut V,
    xs: &[f64],
    ys: &[f64],
    name: String,
) -> Result<(), RunError>
where
    V: Visualizer + ?Sized,
{
    visualizer
        .render(xs, ys, &name)
        .map_err(|source| RunError::Render { name, source })
}

fn artifact_name(initial: Point) -> String {
    format!("x{}y{}", initial.x(), initial.y())
}
