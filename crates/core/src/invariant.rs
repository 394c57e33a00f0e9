mod lotka_volterra;

pub use lotka_volterra::{Coefficients, CoefficientsError, LotkaVolterra};

use crate::{DomainError, Point};

/// A scalar quantity conserved along trajectories of a two-dimensional system.
///
/// Level curves of the invariant are the closed orbits of the system.
/// Implementors only provide [`value`](Invariant::value), which is total on
/// validated points; [`residual`](Invariant::residual) adds the domain check
/// for raw coordinates and the offset by a target [`Level`].
pub trait Invariant {
    /// Evaluates the conserved quantity at `point`.
    fn value(&self, point: Point) -> f64;

    /// Evaluates the invariant at `(x, y)` minus the target level.
    ///
    /// A zero residual means `(x, y)` lies on the level curve.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `x` or `y` is not finite and strictly positive.
    fn residual(&self, x: f64, y: f64, level: Level) -> Result<f64, DomainError> {
        let point = Point::new(x, y)?;
        Ok(self.value(point) - level.value())
    }
}

impl<T: Invariant + ?Sized> Invariant for &T {
    fn value(&self, point: Point) -> f64 {
        (**self).value(point)
    }
}

/// The target value `K` that selects one level curve of an [`Invariant`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Level(f64);

impl Level {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the level of the curve passing through `point`.
    ///
    /// This is the invariant evaluated at `point` with a zero target, so
    /// `point` lies exactly on the returned level.
    #[must_use]
    pub fn through(invariant: &impl Invariant, point: Point) -> Self {
        Self(invariant.value(point))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<Level> for f64 {
    fn from(level: Level) -> Self {
        level.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn initial_point_is_on_its_own_level() {
        let invariant = LotkaVolterra::default();
        let initial = Point::new(20.0, 50.0).expect("valid point");
        let level = Level::through(&invariant, initial);

        let residual = invariant
            .residual(initial.x(), initial.y(), level)
            .expect("valid domain");
        assert_relative_eq!(residual, 0.0);
    }

    #[test]
    fn residual_rejects_non_positive_coordinates() {
        let invariant = LotkaVolterra::default();
        let level = Level::new(0.0);

        assert!(invariant.residual(0.0, 40.0, level).is_err());
        assert!(invariant.residual(50.0, -1.0, level).is_err());
    }

    proptest! {
        #[test]
        fn residual_is_linear_in_level(
            x in 1e-3..1e4f64,
            y in 1e-3..1e4f64,
            k in -50.0..50.0f64,
        ) {
            let invariant = LotkaVolterra::default();
            let shifted = invariant.residual(x, y, Level::new(k)).unwrap();
            let base = invariant.residual(x, y, Level::new(0.0)).unwrap();
            prop_assert_eq!(shifted, base - k);
        }
    }
}
