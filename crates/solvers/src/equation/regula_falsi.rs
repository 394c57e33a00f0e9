//! Regula falsi (false position) root finding for scalar functions.
//!
//! # Algorithm
//!
//! Given a bracket `[t0, t1]` on which `f` changes sign, each iteration draws
//! the chord through `(t0, f(t0))` and `(t1, f(t1))` and evaluates `f` where
//! the chord crosses zero:
//!
//! ```text
//! t_next = (t0·f(t1) − t1·f(t0)) / (f(t1) − f(t0))
//! ```
//!
//! The endpoint whose residual shares the sign of `f(t_next)` is replaced, so
//! the bracket always straddles a root. Unlike bisection, the bracket need not
//! halve each step: on strongly convex or concave functions one endpoint may
//! stay fixed for many iterations. The solver stops as soon as
//! `|f(t_next)| <= residual_tol`.
//!
//! # Failure modes
//!
//! The solver never returns a root it has not verified against the residual
//! tolerance. Instead it fails with an [`Error`] when:
//!
//! - the endpoints do not bracket a sign change ([`BracketError::NoSignChange`])
//! - the chord is flat because both residuals are equal ([`Error::FlatSecant`])
//! - `f` returns an error or a non-finite value
//! - the optional iteration cap is reached ([`Error::MaxIters`])
//!
//! # Observer Events
//!
//! The solver emits an [`Event::Endpoint`] for each bracket endpoint and an
//! [`Event::Iterate`] for each secant point. Observers can return
//! [`Action::StopEarly`] to halt with the best point found so far.

mod action;
mod best;
mod bracket;
mod config;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use bracket::{BracketError, Sign};
pub use config::{Config, ConfigError, DEFAULT_MAX_ITERS, DEFAULT_RESIDUAL_TOL};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use std::error::Error as StdError;

use volterra_core::Observer;

use best::Best;
use bracket::{Bounds, Bracket};

/// Finds a root of `f` inside `bracket` using regula falsi.
///
/// The bracket may be given in either order. If an endpoint already meets
/// the residual tolerance it is returned without iterating.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if `f` fails or returns a non-finite value, if a secant step is
/// undefined, or if the iteration cap is reached.
pub fn solve<F, E, Obs>(
    f: F,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
    Obs: Observer<Event, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let tol = config.residual_tol();

    let left = bounds.left();
    let left_residual = evaluate(&f, left)?;
    let mut best = Best::new(left, left_residual);
    if stops(&mut observer, Event::Endpoint { x: left, residual: left_residual }) {
        return Ok(best.finish(Status::StoppedByObserver, 0));
    }
    if left_residual.abs() <= tol {
        return Ok(best.finish(Status::Converged, 0));
    }

    let right = bounds.right();
    let right_residual = evaluate(&f, right)?;
    best.update(right, right_residual);
    if stops(&mut observer, Event::Endpoint { x: right, residual: right_residual }) {
        return Ok(best.finish(Status::StoppedByObserver, 0));
    }
    if right_residual.abs() <= tol {
        return Ok(Solution {
            status: Status::Converged,
            x: right,
            residual: right_residual,
            iters: 0,
        });
    }

    let mut bracket = Bracket::new(bounds, left_residual, right_residual)?;

    let mut iter = 0;
    loop {
        if config.max_iters().is_some_and(|max| iter >= max) {
            return Err(best.exhausted(iter));
        }
        iter += 1;

        let x = bracket.secant()?;
        let residual = evaluate(&f, x)?;
        best.update(x, residual);

        let event = Event::Iterate {
            iter,
            x,
            residual,
            bracket: bracket.as_array(),
        };
        if stops(&mut observer, event) {
            return Ok(best.finish(Status::StoppedByObserver, iter));
        }

        if residual.abs() <= tol {
            return Ok(Solution {
                status: Status::Converged,
                x,
                residual,
                iters: iter,
            });
        }

        bracket.shrink(x, residual);
    }
}

/// Runs regula falsi without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<F, E>(f: F, bracket: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    solve(f, bracket, config, ())
}

/// Evaluates `f` at `x`, rejecting errors and non-finite residuals.
fn evaluate<F, E>(f: &F, x: f64) -> Result<f64, Error>
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    let residual = f(x).map_err(|source| Error::residual(x, source))?;
    if !residual.is_finite() {
        return Err(Error::NonFiniteResidual { x, residual });
    }
    Ok(residual)
}

/// Emits an event and reports whether the observer asked to stop.
fn stops<Obs>(observer: &mut Obs, event: Event) -> bool
where
    Obs: Observer<Event, Action>,
{
    matches!(observer.observe(&event), Some(Action::StopEarly))
}
