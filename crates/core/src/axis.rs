use std::fmt;

use crate::{DomainError, Point};

/// One of the two state coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Prey population.
    X,
    /// Predator population.
    Y,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Builds a point with `along` on this axis and `across` on the other.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if either coordinate is outside the domain.
    pub fn point(self, along: f64, across: f64) -> Result<Point, DomainError> {
        match self {
            Axis::X => Point::new(along, across),
            Axis::Y => Point::new(across, along),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}
