use thiserror::Error;

use super::Error as SolveError;

/// Errors that can occur when creating a [`Bracket`] or validating bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
    /// Residual signs do not bracket a root.
    #[error("no sign change: f({left})={left_residual}, f({right})={right_residual}")]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },
}

/// Current bracket bounds and their residuals.
///
/// The residuals at `left` and `right` always have opposite [`Sign`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    left: f64,
    right: f64,
    left_residual: f64,
    right_residual: f64,
}

impl Bracket {
    /// Creates a validated bracket from bounds and their residuals.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::NoSignChange` if the residuals share a sign.
    pub(super) fn new(
        bounds: Bounds,
        left_residual: f64,
        right_residual: f64,
    ) -> Result<Self, BracketError> {
        if Sign::of(left_residual) == Sign::of(right_residual) {
            return Err(BracketError::NoSignChange {
                left: bounds.left,
                right: bounds.right,
                left_residual,
                right_residual,
            });
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_residual,
            right_residual,
        })
    }

    /// Returns the bracket bounds as an array.
    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the false-position point, where the chord through both
    /// endpoints crosses zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::FlatSecant` if the endpoint residuals are equal, which
    /// leaves the chord parallel to the axis.
    pub(super) fn secant(&self) -> Result<f64, SolveError> {
        let denominator = self.right_residual - self.left_residual;

        if denominator == 0.0 {
            return Err(SolveError::FlatSecant {
                left: self.left,
                right: self.right,
                residual: self.left_residual,
            });
        }

        Ok((self.left * self.right_residual - self.right * self.left_residual) / denominator)
    }

    /// Replaces the endpoint whose residual shares the sign of `residual`.
    pub(super) fn shrink(&mut self, x: f64, residual: f64) {
        if Sign::of(self.left_residual) == Sign::of(residual) {
            self.left = x;
            self.left_residual = residual;
        } else {
            self.right = x;
            self.right_residual = residual;
        }
    }
}

/// The sign of a residual for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive (or zero).
    Positive,
    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Ordered finite bounds for a bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or zero width.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [left, right] = bracket;

        if !left.is_finite() || !right.is_finite() {
            return Err(BracketError::NonFinite);
        }

        if left == right {
            return Err(BracketError::ZeroWidth);
        }

        if left < right {
            Ok(Self { left, right })
        } else {
            Ok(Self {
                left: right,
                right: left,
            })
        }
    }

    pub(super) fn left(&self) -> f64 {
        self.left
    }

    pub(super) fn right(&self) -> f64 {
        self.right
    }
}
