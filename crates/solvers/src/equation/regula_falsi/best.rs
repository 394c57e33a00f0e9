use super::{Error, Solution, Status};

/// Tracks the evaluated point with the smallest residual magnitude.
#[derive(Debug, Clone, Copy)]
pub(super) struct Best {
    x: f64,
    residual: f64,
}

impl Best {
    pub(super) fn new(x: f64, residual: f64) -> Self {
        Self { x, residual }
    }

    /// Updates the best point if the residual magnitude improves.
    pub(super) fn update(&mut self, x: f64, residual: f64) {
        if residual.abs() < self.residual.abs() {
            self.x = x;
            self.residual = residual;
        }
    }

    pub(super) fn finish(self, status: Status, iters: usize) -> Solution {
        Solution {
            status,
            x: self.x,
            residual: self.residual,
            iters,
        }
    }

    pub(super) fn exhausted(self, iters: usize) -> Error {
        Error::MaxIters {
            iters,
            x: self.x,
            residual: self.residual,
        }
    }
}
