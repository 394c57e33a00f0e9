use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Traces level curves of the Lotka-Volterra invariant and plots them.
#[derive(Debug, Parser)]
#[command(name = "volterra", author, version, about)]
pub struct Cli {
    /// Initial point as `X,Y`; repeat for several curves
    #[arg(long = "point", value_name = "X,Y", value_parser = parse_point)]
    pub points: Vec<[f64; 2]>,

    /// TOML file with points and solver settings
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory the PNG plots are written to [default: plots]
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub out: Option<PathBuf>,

    /// Scan step along x [default: 0.01]
    #[arg(long)]
    pub step: Option<f64>,

    /// Decimal places scan values are rounded to [default: 2]
    #[arg(long)]
    pub decimals: Option<u32>,

    /// Residual tolerance of the root finder [default: 1e-6]
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Iteration cap of the root finder [default: 100000]
    #[arg(long, conflicts_with = "no_iter_cap")]
    pub max_iters: Option<usize>,

    /// Let the root finder iterate until it converges
    #[arg(long)]
    pub no_iter_cap: bool,

    /// Trace curves and their regions in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Skip writing PNG plots
    #[arg(long)]
    pub no_plots: bool,

    /// Open an interactive window with the traced curves (needs the `show` feature)
    #[arg(long)]
    pub show: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_point(value: &str) -> Result<[f64; 2], String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{value}`"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{s}`: {e}"))
    };
    Ok([coord(x)?, coord(y)?])
}
