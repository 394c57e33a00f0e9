use thiserror::Error;

use crate::Axis;

/// Errors raised when a coordinate falls outside the invariant's domain.
///
/// The invariant takes logarithms of both coordinates, so only strictly
/// positive, finite values are meaningful.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("{axis} must be strictly positive, got {value}")]
    NonPositive { axis: Axis, value: f64 },

    #[error("{axis} must be finite, got {value}")]
    NonFinite { axis: Axis, value: f64 },
}

/// A state of the predator-prey system.
///
/// `x` is the prey population and `y` is the predator population.
/// Both are guaranteed finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point after validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if either coordinate is non-finite or not
    /// strictly positive. The `x` coordinate is checked first.
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        check(Axis::X, x)?;
        check(Axis::Y, y)?;
        Ok(Self { x, y })
    }

    /// Returns the prey coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the predator coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the coordinate along `axis`.
    #[must_use]
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns the point as an `[x, y]` pair.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl TryFrom<[f64; 2]> for Point {
    type Error = DomainError;

    fn try_from([x, y]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        point.as_array()
    }
}

fn check(axis: Axis, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { axis, value });
    }
    if value <= 0.0 {
        return Err(DomainError::NonPositive { axis, value });
    }
    Ok(())
}
