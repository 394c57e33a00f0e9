use std::fmt::Debug;

use tracing::trace;
use volterra_core::Observer;

use crate::traits::HasResidual;

/// An observer that logs every solver event at `trace` level.
///
/// Events are tagged with a caller-supplied label so interleaved solves can
/// be told apart in the log. The `volterra` binary attaches one per solve at
/// `-vv`, labelled with the boundary search or scan step it belongs to.
/// It never returns an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceObserver {
    label: String,
    events: usize,
}

impl TraceObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            events: 0,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns how many events have been logged.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }
}

impl<E, A> Observer<E, A> for TraceObserver
where
    E: HasResidual + Debug,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.events += 1;
        trace!(
            label = %self.label,
            n = self.events,
            residual = event.residual(),
            ?event,
            "solver event",
        );
        None
    }
}

/// Allows `&mut TraceObserver` to be passed to solvers that take an observer
/// by value, so the event count can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut TraceObserver
where
    E: HasResidual + Debug,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
