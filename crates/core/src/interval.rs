use thiserror::Error;

/// Errors that can occur when creating an [`Interval`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// The lower endpoint exceeds the upper one.
    #[error("lower endpoint exceeds upper endpoint")]
    Reversed,
}

/// A closed interval `[lo, hi]` on one coordinate.
///
/// Intervals bound both the scan coordinate of a region and the range a
/// solved coordinate must land in. They are also handed to the root finder
/// as brackets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates an interval from ordered, finite endpoints.
    ///
    /// A zero-width interval is allowed here; the root finder rejects it
    /// separately when used as a bracket.
    ///
    /// # Errors
    ///
    /// Returns an [`IntervalError`] if an endpoint is non-finite or `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, IntervalError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(IntervalError::NonFinite);
        }
        if lo > hi {
            return Err(IntervalError::Reversed);
        }
        Ok(Self { lo, hi })
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Returns true if `value` lies within the interval, endpoints included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Returns the endpoints as `[lo, hi]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.lo, self.hi]
    }
}
