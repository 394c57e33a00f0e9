//! Extent of a level curve along the lines through the domain center.
//!
//! For each axis the invariant is restricted to the line through the center
//! parallel to that axis, and regula falsi finds the two crossings of the
//! level: one between a small positive seed and the center, one between the
//! center and the square of the initial coordinate. The outer seed is only a
//! heuristic over-estimate. A seed at or below the center is rejected before
//! any solve; if the curve reaches beyond a seed above the center, the bracket
//! holds no sign change and estimation fails.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use volterra_core::{Axis, DomainError, Interval, IntervalError, Invariant, Level, Point};
use volterra_solvers::equation::regula_falsi;

use crate::site::{SolveSite, Watch};

/// Lower seed used by [`BoundaryConfig::default`].
pub const DEFAULT_LOWER_SEED: f64 = 1e-4;

/// Errors that can occur when validating a [`BoundaryConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundaryConfigError {
    #[error("lower_seed must be finite, positive, and below the center on both axes, got {0}")]
    LowerSeed(f64),
}

/// Where boundary searches start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    center: Point,
    lower_seed: f64,
}

impl Default for BoundaryConfig {
    /// Centers the search on the equilibrium of the default invariant, (50, 40).
    fn default() -> Self {
        Self {
            // Known-good values, unwrap is safe
            center: Point::new(50.0, 40.0).unwrap(),
            lower_seed: DEFAULT_LOWER_SEED,
        }
    }
}

impl BoundaryConfig {
    /// Creates a config with a validated lower seed.
    ///
    /// # Errors
    ///
    /// Returns an error if `lower_seed` is non-finite, not positive, or not
    /// below both center coordinates.
    pub fn new(center: Point, lower_seed: f64) -> Result<Self, BoundaryConfigError> {
        let below_center = lower_seed < center.x() && lower_seed < center.y();
        if !lower_seed.is_finite() || lower_seed <= 0.0 || !below_center {
            return Err(BoundaryConfigError::LowerSeed(lower_seed));
        }

        Ok(Self { center, lower_seed })
    }

    /// Returns the domain center the curve is traced around.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the inner end of each lower bracket.
    #[must_use]
    pub fn lower_seed(&self) -> f64 {
        self.lower_seed
    }
}

/// Which crossing of the level curve a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Between the lower seed and the center.
    Lower,
    /// Between the center and the outer seed.
    Upper,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Lower => f.write_str("lower"),
            Side::Upper => f.write_str("upper"),
        }
    }
}

/// Errors that can occur while estimating the extent of a level curve.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to find the {side} {axis} boundary")]
    Solve {
        axis: Axis,
        side: Side,
        #[source]
        source: regula_falsi::Error,
    },

    #[error("outer seed {seed} for the {axis} boundary does not exceed the center at {center}")]
    OuterSeedShort { axis: Axis, seed: f64, center: f64 },

    #[error("boundary roots out of order: {0}")]
    Interval(#[from] IntervalError),
}

/// Crossings of a level curve with the lines through the domain center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// `[x_min, x_max]` along the horizontal line through the center.
    pub x: Interval,
    /// `[y_min, y_max]` along the vertical line through the center.
    pub y: Interval,
}

impl Bounds {
    /// Returns the extent along `axis`.
    #[must_use]
    pub fn along(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns the four crossings as points, in the order
    /// `(cx, y_min)`, `(cx, y_max)`, `(x_min, cy)`, `(x_max, cy)`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if a crossing is not a valid point.
    pub fn crossings(&self, center: Point) -> Result<[Point; 4], DomainError> {
        Ok([
            Point::new(center.x(), self.y.lo())?,
            Point::new(center.x(), self.y.hi())?,
            Point::new(self.x.lo(), center.y())?,
            Point::new(self.x.hi(), center.y())?,
        ])
    }
}

/// Finds `x_min`, `x_max`, `y_min`, and `y_max` of the curve at `level`.
///
/// `initial` supplies the outer seeds: the upper search along each axis
/// ends at the square of the initial point's coordinate on that axis.
///
/// # Errors
///
/// Returns [`BoundaryError::OuterSeedShort`] if the square of an initial
/// coordinate does not exceed the center on that axis, or another
/// [`BoundaryError`] naming the axis and side whose search failed.
pub fn estimate<I>(
    invariant: &I,
    level: Level,
    initial: Point,
    config: &BoundaryConfig,
    root: &regula_falsi::Config,
) -> Result<Bounds, BoundaryError>
where
    I: Invariant + ?Sized,
{
    estimate_observed(invariant, level, initial, config, root, &())
}

/// Like [`estimate`], attaching an observer from `watch` to each of the four
/// searches.
///
/// # Errors
///
/// Returns the same errors as [`estimate`].
pub fn estimate_observed<I, W>(
    invariant: &I,
    level: Level,
    initial: Point,
    config: &BoundaryConfig,
    root: &regula_falsi::Config,
    watch: &W,
) -> Result<Bounds, BoundaryError>
where
    I: Invariant + ?Sized,
    W: Watch + ?Sized,
{
    let x = extent(invariant, level, Axis::X, initial, config, root, watch)?;
    let y = extent(invariant, level, Axis::Y, initial, config, root, watch)?;

    Ok(Bounds { x, y })
}

fn extent<I, W>(
    invariant: &I,
    level: Level,
    axis: Axis,
    initial: Point,
    config: &BoundaryConfig,
    root: &regula_falsi::Config,
    watch: &W,
) -> Result<Interval, BoundaryError>
where
    I: Invariant + ?Sized,
    W: Watch + ?Sized,
{
    let center = config.center.coord(axis);
    let across = config.center.coord(axis.other());
    let outer = initial.coord(axis).powi(2);
    if outer <= center {
        return Err(BoundaryError::OuterSeedShort {
            axis,
            seed: outer,
            center,
        });
    }

    let slice = |t: f64| -> Result<f64, DomainError> {
        let point = axis.point(t, across)?;
        Ok(invariant.value(point) - level.value())
    };

    let solve = |side: Side, bracket: [f64; 2]| {
        let observer = watch.observer(SolveSite::Boundary { axis, side });
        regula_falsi::solve(slice, bracket, root, observer)
            .map(|solution| solution.x)
            .map_err(|source| BoundaryError::Solve { axis, side, source })
    };

    let lower = solve(Side::Lower, [config.lower_seed, center])?;
    let upper = solve(Side::Upper, [center, outer])?;
    debug!(%axis, lower, upper, "level curve extent");

    Ok(Interval::new(lower, upper)?)
}
