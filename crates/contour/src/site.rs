//! Names for the individual root-finder solves inside a run.

use std::fmt;

use volterra_core::{Axis, Observer};
use volterra_solvers::equation::regula_falsi;

use crate::{boundary::Side, scan::Quadrant};

/// Where in a run a root-finder solve takes place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveSite {
    /// One of the four boundary searches.
    Boundary { axis: Axis, side: Side },
    /// One scan step, solving for y at `x`.
    Step { quadrant: Quadrant, x: f64 },
}

impl fmt::Display for SolveSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveSite::Boundary { axis, side } => write!(f, "{side} {axis} boundary"),
            SolveSite::Step { quadrant, x } => write!(f, "{quadrant} x={x}"),
        }
    }
}

/// Builds one root-finder observer per solve.
///
/// Closures `Fn(SolveSite) -> O` implement `Watch`, so callers can attach a
/// fresh observer to every solve of a run, including solves running on
/// several threads. `()` attaches no observer.
pub trait Watch: Sync {
    type Observer: Observer<regula_falsi::Event, regula_falsi::Action>;

    /// Returns the observer for the solve at `site`.
    fn observer(&self, site: SolveSite) -> Self::Observer;
}

impl Watch for () {
    type Observer = ();

    fn observer(&self, _site: SolveSite) -> Self::Observer {}
}

impl<F, O> Watch for F
where
    F: Fn(SolveSite) -> O + Sync,
    O: Observer<regula_falsi::Event, regula_falsi::Action>,
{
    type Observer = O;

    fn observer(&self, site: SolveSite) -> O {
        self(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_name_the_solve() {
        let boundary = SolveSite::Boundary {
            axis: Axis::Y,
            side: Side::Lower,
        };
        let step = SolveSite::Step {
            quadrant: Quadrant::LowerLeft,
            x: 20.5,
        };

        assert_eq!(boundary.to_string(), "lower y boundary");
        assert_eq!(step.to_string(), "lower-left x=20.5");
    }
}
