//! Core traits and types for tracing level curves of a conserved quantity.
//!
//! This crate defines the shared abstractions that the root finder, the
//! contour tracer, and the observers build on:
//!
//! - [`Point`] — a state with strictly positive prey (`x`) and predator (`y`)
//!   populations
//! - [`Axis`] — selects one coordinate of a [`Point`]
//! - [`Interval`] — an ordered pair of bounds used as a search bracket
//! - [`Invariant`] — a conserved quantity of the state, and [`Level`], the
//!   target value that picks one of its level curves
//! - [`LotkaVolterra`] — the predator-prey invariant
//! - [`Observer`] — receives solver events and optionally returns control actions

mod axis;
mod interval;
mod invariant;
mod observer;
mod point;

pub use axis::Axis;
pub use interval::{Interval, IntervalError};
pub use invariant::{Coefficients, CoefficientsError, Invariant, Level, LotkaVolterra};
pub use observer::Observer;
pub use point::{DomainError, Point};
