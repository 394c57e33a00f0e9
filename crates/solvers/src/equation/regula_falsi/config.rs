use thiserror::Error;

/// Residual magnitude at which a root is accepted.
pub const DEFAULT_RESIDUAL_TOL: f64 = 1e-6;

/// Iteration cap applied by [`Config::default`].
///
/// Well-posed brackets on the predator-prey invariant converge in a few
/// hundred iterations at most.
pub const DEFAULT_MAX_ITERS: usize = 100_000;

/// Configuration for the regula falsi solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    residual_tol: f64,
    max_iters: Option<usize>,
}

/// Errors that can occur when validating a regula falsi solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be finite and positive")]
    ResidualTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            residual_tol: DEFAULT_RESIDUAL_TOL,
            max_iters: Some(DEFAULT_MAX_ITERS),
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// `max_iters = None` lets the solver iterate until the residual
    /// tolerance is met, however long that takes.
    ///
    /// # Errors
    ///
    /// Returns an error if `residual_tol` is non-finite or not positive.
    pub fn new(residual_tol: f64, max_iters: Option<usize>) -> Result<Self, ConfigError> {
        if !residual_tol.is_finite() || residual_tol <= 0.0 {
            return Err(ConfigError::ResidualTol);
        }

        Ok(Self {
            residual_tol,
            max_iters,
        })
    }

    /// Returns the residual magnitude at which a root is accepted.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }

    /// Returns the iteration cap, if any.
    #[must_use]
    pub fn max_iters(&self) -> Option<usize> {
        self.max_iters
    }
}
