//! Traces a level curve of a conserved quantity through the positive quadrant.
//!
//! A run starts from an initial state, takes the invariant's value there as
//! the target level, and samples the closed curve at that level in three
//! stages:
//!
//! 1. [`boundary::estimate`] finds where the curve crosses the horizontal and
//!    vertical lines through the domain center.
//! 2. [`Region::quadrants`] splits the plane at the center into four regions,
//!    each pairing a scan interval with the range its solutions must land in.
//! 3. [`scan::scan`] sweeps each region at a fixed step and solves for the
//!    matching coordinate with regula falsi, discarding roots that fall on the
//!    wrong branch of the curve.
//!
//! [`run::trace`] ties the stages together and hands each region's points to
//! a [`Visualizer`]. The `_observed` variants take a [`Watch`] that attaches
//! a root-finder observer to every solve.

pub mod boundary;
pub mod run;
pub mod scan;
pub mod site;

mod combined;

pub use boundary::{BoundaryConfig, BoundaryConfigError, BoundaryError, Bounds, Side};
pub use combined::Combined;
pub use run::{RenderError, Run, RunConfig, RunError, Visualizer, trace, trace_observed};
pub use scan::{Quadrant, Region, RegionScan, ScanConfig, ScanConfigError, scan};
pub use site::{SolveSite, Watch};
