//! Observers and visualizers for level-curve tracing.
//!
//! This crate provides [`Observer`] implementations that work across solvers,
//! along with the [`Visualizer`] implementations that turn traced curves into
//! artifacts.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasResidual`], [`CanStopEarly`])
//! - [`TraceObserver`] — logs solver events through `tracing`
//! - [`IterationLimit`] — stops a solver after enough good-enough events
//! - [`PngPlotter`] — writes scatter plots as PNG files
//!
//! # Features
//!
//! - `show` — Enables [`CurveViewer`] for inspecting curves in an egui window.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: volterra_core::Observer
//! [`Visualizer`]: volterra_contour::Visualizer
//! [`HasResidual`]: traits::HasResidual
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod limit;
mod png;
mod trace;

#[cfg(feature = "show")]
mod viewer;

pub use limit::IterationLimit;
pub use png::{PngError, PngPlotter, ensure_output_dir};
pub use trace::TraceObserver;

#[cfg(feature = "show")]
pub use viewer::{CurveViewer, ShowConfig};
