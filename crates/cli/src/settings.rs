//! Settings assembled from the command line and an optional TOML file.
//!
//! Command-line flags win over file values, and file values win over the
//! library defaults.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use volterra_contour::{BoundaryConfig, RunConfig, ScanConfig};
use volterra_core::Point;
use volterra_solvers::equation::regula_falsi;

use crate::args::Cli;

/// Initial points traced when neither the command line nor the file names any.
pub const DEFAULT_POINTS: [[f64; 2]; 3] = [[20.0, 50.0], [20.0, 150.0], [200.0, 50.0]];

/// Output directory used when none is configured.
pub const DEFAULT_OUT_DIR: &str = "plots";

/// Contents of a `--config` file.
///
/// ```toml
/// points = [[20.0, 50.0], [200.0, 50.0]]
/// out_dir = "plots"
/// parallel = true
///
/// [scan]
/// step = 0.01
/// decimals = 2
///
/// [root]
/// tolerance = 1e-6
/// max_iters = 100000
///
/// [boundary]
/// center = [50.0, 40.0]
/// lower_seed = 1e-4
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub points: Option<Vec<[f64; 2]>>,
    pub out_dir: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub plots: Option<bool>,
    pub scan: ScanSection,
    pub root: RootSection,
    pub boundary: BoundarySection,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSection {
    pub step: Option<f64>,
    pub decimals: Option<u32>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RootSection {
    pub tolerance: Option<f64>,
    pub max_iters: Option<usize>,
    /// Iterate without a cap; overrides `max_iters`.
    pub uncapped: Option<bool>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BoundarySection {
    pub center: Option<[f64; 2]>,
    pub lower_seed: Option<f64>,
}

impl FileConfig {
    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub points: Vec<Point>,
    pub out_dir: PathBuf,
    pub plots: bool,
    /// Trace the initial points concurrently.
    pub parallel: bool,
    /// Log every root-finder event, enabled by `-vv`.
    pub solver_events: bool,
    pub run: RunConfig,
}

impl Settings {
    /// Merges command-line flags over file values over defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a point lies outside the positive quadrant or a
    /// solver setting fails validation.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let points = if cli.points.is_empty() {
            file.points.unwrap_or_else(|| DEFAULT_POINTS.to_vec())
        } else {
            cli.points.clone()
        };
        let points = points
            .into_iter()
            .map(|[x, y]| Point::new(x, y).with_context(|| format!("invalid initial point ({x}, {y})")))
            .collect::<Result<Vec<_>>>()?;

        let defaults = ScanConfig::default();
        let scan = ScanConfig::new(
            cli.step.or(file.scan.step).unwrap_or(defaults.step()),
            cli.decimals.or(file.scan.decimals).unwrap_or(defaults.decimals()),
        )
        .context("invalid scan settings")?;

        let uncapped = cli.no_iter_cap || file.root.uncapped.unwrap_or(false);
        let max_iters = if uncapped {
            None
        } else {
            Some(
                cli.max_iters
                    .or(file.root.max_iters)
                    .unwrap_or(regula_falsi::DEFAULT_MAX_ITERS),
            )
        };
        let root = regula_falsi::Config::new(
            cli.tolerance
                .or(file.root.tolerance)
                .unwrap_or(regula_falsi::DEFAULT_RESIDUAL_TOL),
            max_iters,
        )
        .context("invalid root finder settings")?;

        let default_boundary = BoundaryConfig::default();
        let center = match file.boundary.center {
            Some([x, y]) => Point::new(x, y).context("invalid boundary center")?,
            None => default_boundary.center(),
        };
        let boundary = BoundaryConfig::new(
            center,
            file.boundary
                .lower_seed
                .unwrap_or(default_boundary.lower_seed()),
        )
        .context("invalid boundary settings")?;

        let parallel = cli.parallel || file.parallel.unwrap_or(false);

        Ok(Self {
            points,
            out_dir: cli
                .out
                .clone()
                .or(file.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            plots: !cli.no_plots && file.plots.unwrap_or(true),
            parallel,
            solver_events: cli.verbose >= 2,
            run: RunConfig {
                boundary,
                scan,
                root,
                parallel,
            },
        })
    }
}
