/// Event emitted by the regula falsi solver for each evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Bracket endpoint evaluation, emitted before the sign check.
    Endpoint {
        /// The endpoint that was evaluated.
        x: f64,
        /// Residual at the endpoint.
        residual: f64,
    },
    /// False-position iterate.
    Iterate {
        /// Iteration counter (1-based).
        iter: usize,
        /// The secant point that was evaluated.
        x: f64,
        /// Residual at the secant point.
        residual: f64,
        /// Bracket the secant point was drawn from.
        bracket: [f64; 2],
    },
}

impl Event {
    /// Returns the evaluated x value.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Endpoint { x, .. } | Event::Iterate { x, .. } => *x,
        }
    }

    /// Returns the residual at the evaluated x value.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self {
            Event::Endpoint { residual, .. } | Event::Iterate { residual, .. } => *residual,
        }
    }

    /// Returns the iteration counter, or zero for endpoint evaluations.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Event::Endpoint { .. } => 0,
            Event::Iterate { iter, .. } => *iter,
        }
    }
}
