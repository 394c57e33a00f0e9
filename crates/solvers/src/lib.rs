//! Numerical solvers used to trace level curves.
//!
//! - [`equation::regula_falsi`] — bracketed false-position root finding for
//!   scalar functions of one variable

pub mod equation;
