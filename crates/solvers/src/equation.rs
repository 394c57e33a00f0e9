//! Solvers for scalar equations, finding `t` such that `f(t) = 0`.
//!
//! Functions are plain closures `Fn(f64) -> Result<f64, E>`, so a caller can
//! hold one coordinate of a two-dimensional function fixed and solve for the
//! other.
//!
//! # Solvers
//!
//! - [`regula_falsi`] — false position on a sign-changing bracket

pub mod regula_falsi;
