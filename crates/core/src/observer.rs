/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers watch or steer the root finder without changing its
/// API, for logging, recording iterates for a plot, or stopping early.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures implement `Observer`, and `()` is a no-op observer that always
/// returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_never_acts() {
        let action: Option<()> = ().observe(&1.0_f64);
        assert!(action.is_none());
    }

    #[test]
    fn closure_sees_every_event() {
        let mut seen = Vec::new();
        let mut observer = |event: &f64| {
            seen.push(*event);
            (*event > 1.0).then_some("stop")
        };

        assert_eq!(observer.observe(&0.5), None);
        assert_eq!(observer.observe(&2.0), Some("stop"));
        assert_eq!(seen, [0.5, 2.0]);
    }
}
