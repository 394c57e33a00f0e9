//! Fixed-step sweeps over one quadrant of a level curve.
//!
//! A region pairs a scan interval on x with the y range its solutions must
//! land in. The scanner walks x across the scan interval at a fixed step,
//! rounding after every increment so thousands of additions do not drift,
//! and solves for y at each step with regula falsi. A root outside the
//! region's y range belongs to another branch of the curve and is dropped.

use std::{error::Error as StdError, fmt};

use thiserror::Error;
use tracing::{debug, trace, warn};

use volterra_core::{Interval, IntervalError, Point};
use volterra_solvers::equation::regula_falsi;

use crate::{
    boundary::Bounds,
    site::{SolveSite, Watch},
};

/// Step used by [`ScanConfig::default`].
pub const DEFAULT_STEP: f64 = 0.01;

/// Rounding precision used by [`ScanConfig::default`].
pub const DEFAULT_DECIMALS: u32 = 2;

/// Errors that can occur when validating a [`ScanConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScanConfigError {
    #[error("step must be finite and positive, got {0}")]
    Step(f64),

    #[error("step {step} is smaller than the rounding precision of {decimals} decimal places")]
    BelowPrecision { step: f64, decimals: u32 },

    #[error("at most 15 decimal places are supported, got {0}")]
    Decimals(u32),
}

/// Step size and rounding for region scans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    step: f64,
    decimals: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl ScanConfig {
    /// Creates a validated scan config.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is non-finite or not positive, if
    /// `decimals` exceeds 15, or if `step` would vanish when rounded to
    /// `decimals` places.
    pub fn new(step: f64, decimals: u32) -> Result<Self, ScanConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ScanConfigError::Step(step));
        }
        if decimals > 15 {
            return Err(ScanConfigError::Decimals(decimals));
        }
        if step < 10f64.powi(-(decimals as i32)) {
            return Err(ScanConfigError::BelowPrecision { step, decimals });
        }

        Ok(Self { step, decimals })
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Rounds `value` to the configured number of decimal places, with ties
    /// away from zero.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (value * scale).round() / scale
    }
}

/// One of the four regions around the domain center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// All quadrants in scan order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::UpperLeft,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Returns the 1-based position of this quadrant in scan order.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Quadrant::UpperRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::LowerLeft => 3,
            Quadrant::LowerRight => 4,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quadrant::UpperRight => f.write_str("upper-right"),
            Quadrant::UpperLeft => f.write_str("upper-left"),
            Quadrant::LowerLeft => f.write_str("lower-left"),
            Quadrant::LowerRight => f.write_str("lower-right"),
        }
    }
}

/// A quadrant's scan interval on x and the y range its points must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub quadrant: Quadrant,
    /// Interval swept on x.
    pub scan: Interval,
    /// Bracket for the y solve, and the range accepted roots must lie in.
    pub solve: Interval,
}

impl Region {
    /// Splits the extent of a level curve at `center` into four regions,
    /// in [`Quadrant::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns an [`IntervalError`] if `center` does not lie within `bounds`.
    pub fn quadrants(bounds: &Bounds, center: Point) -> Result<[Region; 4], IntervalError> {
        let left = Interval::new(bounds.x.lo(), center.x())?;
        let right = Interval::new(center.x(), bounds.x.hi())?;
        let below = Interval::new(bounds.y.lo(), center.y())?;
        let above = Interval::new(center.y(), bounds.y.hi())?;

        Ok(Quadrant::ALL.map(|quadrant| {
            let (scan, solve) = match quadrant {
                Quadrant::UpperRight => (right, above),
                Quadrant::UpperLeft => (left, above),
                Quadrant::LowerLeft => (left, below),
                Quadrant::LowerRight => (right, below),
            };
            Region {
                quadrant,
                scan,
                solve,
            }
        }))
    }
}

/// Points found in one region, with counts of the steps that yielded none.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionScan {
    pub quadrant: Quadrant,
    /// Accepted points in ascending x order.
    pub points: Vec<Point>,
    /// Steps whose root fell outside the region's y range.
    pub rejected: usize,
    /// Steps where the root finder failed.
    pub failed: usize,
}

impl RegionScan {
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(Point::x).collect()
    }

    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(Point::y).collect()
    }
}

/// Sweeps `region` and solves `f(x, y) = 0` for y at each scan step.
///
/// The first scan value is the region's lower x rounded to the configured
/// precision; the sweep includes the upper x when a step lands on it. Steps
/// where the root finder fails are counted and skipped.
pub fn scan<F, E>(
    f: F,
    region: &Region,
    config: &ScanConfig,
    root: &regula_falsi::Config,
) -> RegionScan
where
    F: Fn(f64, f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    scan_observed(f, region, config, root, &())
}

/// Like [`scan`], attaching an observer from `watch` to each step's solve.
pub fn scan_observed<F, E, W>(
    f: F,
    region: &Region,
    config: &ScanConfig,
    root: &regula_falsi::Config,
    watch: &W,
) -> RegionScan
where
    F: Fn(f64, f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
    W: Watch + ?Sized,
{
    let mut result = RegionScan {
        quadrant: region.quadrant,
        points: Vec::new(),
        rejected: 0,
        failed: 0,
    };

    let mut x = config.round(region.scan.lo());
    while x <= region.scan.hi() {
        let observer = watch.observer(SolveSite::Step {
            quadrant: region.quadrant,
            x,
        });
        match regula_falsi::solve(|y| f(x, y), region.solve.as_array(), root, observer) {
            Ok(solution) if region.solve.contains(solution.x) => {
                match Point::new(x, solution.x) {
                    Ok(point) => result.points.push(point),
                    Err(error) => {
                        debug!(x, %error, "solved point outside the domain");
                        result.failed += 1;
                    }
                }
            }
            Ok(solution) => {
                trace!(x, y = solution.x, "root on another branch, rejected");
                result.rejected += 1;
            }
            Err(error) => {
                debug!(x, %error, "no root at scan step");
                result.failed += 1;
            }
        }

        let next = config.round(x + config.step());
        if next <= x {
            warn!(x, step = config.step(), "scan stalled");
            break;
        }
        x = next;
    }

    if result.points.is_empty() {
        warn!(quadrant = %region.quadrant, "region yielded no points");
    }
    debug!(
        quadrant = %region.quadrant,
        accepted = result.points.len(),
        rejected = result.rejected,
        failed = result.failed,
        "region scanned",
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use volterra_core::{Invariant, Level, LotkaVolterra};

    use crate::boundary::{self, BoundaryConfig};

    fn interval(lo: f64, hi: f64) -> Interval {
        Interval::new(lo, hi).expect("valid interval")
    }

    fn region(scan: [f64; 2], solve: [f64; 2]) -> Region {
        Region {
            quadrant: Quadrant::UpperRight,
            scan: interval(scan[0], scan[1]),
            solve: interval(solve[0], solve[1]),
        }
    }

    fn halfway(x: f64, y: f64) -> Result<f64, Infallible> {
        Ok(y - x / 2.0)
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let config = ScanConfig::default();
        assert_relative_eq!(config.round(19.647_225), 19.65);
        assert_relative_eq!(config.round(0.125), 0.13);
        assert_relative_eq!(config.round(50.0), 50.0);
    }

    #[test]
    fn rejects_invalid_steps() {
        assert_eq!(ScanConfig::new(0.0, 2), Err(ScanConfigError::Step(0.0)));
        assert_eq!(
            ScanConfig::new(0.001, 2),
            Err(ScanConfigError::BelowPrecision {
                step: 0.001,
                decimals: 2
            })
        );
        assert_eq!(ScanConfig::new(0.1, 20), Err(ScanConfigError::Decimals(20)));
        assert!(ScanConfig::new(0.5, 1).is_ok());
    }

    #[test]
    fn quadrants_follow_scan_order() {
        let bounds = Bounds {
            x: interval(10.0, 90.0),
            y: interval(5.0, 80.0),
        };
        let center = Point::new(50.0, 40.0).expect("valid point");

        let regions = Region::quadrants(&bounds, center).expect("center inside bounds");

        let expected = [
            ([50.0, 90.0], [40.0, 80.0]),
            ([10.0, 50.0], [40.0, 80.0]),
            ([10.0, 50.0], [5.0, 40.0]),
            ([50.0, 90.0], [5.0, 40.0]),
        ];
        for ((region, quadrant), (scan, solve)) in regions.iter().zip(Quadrant::ALL).zip(expected) {
            assert_eq!(region.quadrant, quadrant);
            assert_eq!(region.scan.as_array(), scan);
            assert_eq!(region.solve.as_array(), solve);
        }
        assert_eq!(
            Quadrant::ALL.map(Quadrant::number),
            [1, 2, 3, 4],
        );
    }

    #[test]
    fn quadrants_reject_center_outside_bounds() {
        let bounds = Bounds {
            x: interval(60.0, 90.0),
            y: interval(5.0, 80.0),
        };
        let center = Point::new(50.0, 40.0).expect("valid point");

        assert_eq!(
            Region::quadrants(&bounds, center),
            Err(IntervalError::Reversed)
        );
    }

    #[test]
    fn skips_steps_without_a_root() {
        // Roots at y = x/2 leave the [0.1, 0.8] bracket once x passes 1.6.
        let region = region([1.0, 2.0], [0.1, 0.8]);

        let result = scan(
            halfway,
            &region,
            &ScanConfig::default(),
            &regula_falsi::Config::default(),
        );

        assert_eq!(result.points.len(), 61);
        assert_eq!(result.failed, 40);
        assert_eq!(result.rejected, 0);
        assert_relative_eq!(result.xs()[60], 1.6);
        assert_relative_eq!(result.ys()[60], 0.8);
    }

    #[test]
    fn starts_at_the_rounded_lower_bound() {
        let region = region([0.996, 1.03], [0.1, 0.8]);

        let xs = scan(
            halfway,
            &region,
            &ScanConfig::default(),
            &regula_falsi::Config::default(),
        )
        .xs();

        assert_eq!(xs.len(), 4);
        assert_relative_eq!(xs[0], 1.0);
        assert_relative_eq!(xs[3], 1.03);
    }

    #[test]
    fn upper_right_region_of_a_level_curve() {
        let invariant = LotkaVolterra::default();
        let initial = Point::new(20.0, 50.0).expect("valid point");
        let level = Level::through(&invariant, initial);
        let config = BoundaryConfig::default();
        let root = regula_falsi::Config::default();

        let bounds = boundary::estimate(&invariant, level, initial, &config, &root)
            .expect("bounds exist");
        let [upper_right, ..] =
            Region::quadrants(&bounds, config.center()).expect("center inside bounds");

        let result = scan(
            |x, y| invariant.residual(x, y, level),
            &upper_right,
            &ScanConfig::default(),
            &root,
        );

        let xs = result.xs();
        let last = (bounds.x.hi() * 100.0).floor() / 100.0;
        assert_relative_eq!(xs[0], 50.0);
        assert_relative_eq!(xs[xs.len() - 1], last, epsilon = 1e-9);
        assert!(xs.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(result.points.len(), 5200);
        assert_eq!(result.failed, 0);
        assert!(result.ys().iter().all(|&y| bounds.y.hi() >= y && y >= 40.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn accepted_points_stay_inside_the_solve_bracket(
            x0 in 15.0..45.0f64,
            y0 in 45.0..90.0f64,
        ) {
            let invariant = LotkaVolterra::default();
            let initial = Point::new(x0, y0).unwrap();
            let level = Level::through(&invariant, initial);
            let config = BoundaryConfig::default();
            let root = regula_falsi::Config::default();
            let coarse = ScanConfig::new(0.5, 1).unwrap();

            let bounds = boundary::estimate(&invariant, level, initial, &config, &root).unwrap();
            let regions = Region::quadrants(&bounds, config.center()).unwrap();

            for region in &regions {
                let result = scan(|x, y| invariant.residual(x, y, level), region, &coarse, &root);
                for point in &result.points {
                    prop_assert!(region.solve.contains(point.y()));
                }
            }
        }
    }
}
