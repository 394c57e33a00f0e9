use thiserror::Error;

use crate::{DomainError, Invariant, Point};

/// Errors that can occur when validating [`Coefficients`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientsError {
    #[error("coefficient `{name}` must be finite and strictly positive")]
    NotPositive { name: &'static str },
}

/// Rate coefficients of the predator-prey invariant.
///
/// With these coefficients the conserved quantity is
///
/// ```text
/// H(x, y) = ln(y^a · x^b) − c·y − d·x
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 0.5,
            c: 0.005,
            d: 0.01,
        }
    }
}

impl Coefficients {
    /// Creates validated coefficients.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first coefficient that is non-finite or
    /// not strictly positive.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self, CoefficientsError> {
        for (name, value) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoefficientsError::NotPositive { name });
            }
        }
        Ok(Self { a, b, c, d })
    }

    /// Exponent of the predator population inside the logarithm.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Exponent of the prey population inside the logarithm.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Linear predator coefficient.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Linear prey coefficient.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }
}

/// The conserved quantity of the Lotka-Volterra predator-prey model.
///
/// `H` is strictly concave with a single maximum at the interior equilibrium
/// `(b/d, a/c)`. Every level below that maximum is a closed curve around the
/// equilibrium, so along any line through the equilibrium the level is
/// crossed exactly once on each side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LotkaVolterra {
    coefficients: Coefficients,
}

impl LotkaVolterra {
    #[must_use]
    pub fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Returns the interior equilibrium `(b/d, a/c)`, where the invariant is maximal.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if a ratio overflows, which only happens for
    /// extreme coefficients.
    pub fn equilibrium(&self) -> Result<Point, DomainError> {
        let Coefficients { a, b, c, d } = self.coefficients;
        Point::new(b / d, a / c)
    }
}

impl Invariant for LotkaVolterra {
    fn value(&self, point: Point) -> f64 {
        let Coefficients { a, b, c, d } = self.coefficients;
        let (x, y) = (point.x(), point.y());

        // ln(y^a · x^b) expanded so large populations cannot overflow the powers.
        a * y.ln() + b * x.ln() - c * y - d * x
    }
}
