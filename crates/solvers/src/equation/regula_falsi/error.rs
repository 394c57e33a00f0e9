use std::error::Error as StdError;

use thiserror::Error;

use super::bracket::BracketError;

/// Errors that can occur during regula falsi solving.
///
/// Every failure is explicit: the solver never substitutes a default value
/// for a root it could not find.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("secant step undefined on [{left}, {right}]: both residuals equal {residual}")]
    FlatSecant { left: f64, right: f64, residual: f64 },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("no convergence after {iters} iterations, best residual {residual} at x = {x}")]
    MaxIters { iters: usize, x: f64, residual: f64 },

    #[error("residual evaluation failed at x = {x}")]
    Residual {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(super) fn residual<E>(x: f64, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Residual {
            x,
            source: Box::new(source),
        }
    }
}
