use volterra_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// An observer that stops a solver once enough events are within tolerance.
///
/// Each event whose residual magnitude is at most `tolerance` counts toward
/// the limit; when `count` such events have been seen the observer returns
/// the solver's stop action. Works with any solver whose events implement
/// [`HasResidual`] and whose actions implement [`CanStopEarly`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationLimit {
    tolerance: f64,
    count: usize,
    seen: usize,
}

impl IterationLimit {
    #[must_use]
    pub fn new(tolerance: f64, count: usize) -> Self {
        Self {
            tolerance,
            count,
            seen: 0,
        }
    }

    /// Returns how many events within tolerance have been seen.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<E, A> Observer<E, A> for IterationLimit
where
    E: HasResidual,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.residual().abs() <= self.tolerance {
            self.seen += 1;
        }
        (self.seen >= self.count).then(A::stop_early)
    }
}

impl<E, A> Observer<E, A> for &mut IterationLimit
where
    E: HasResidual,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
