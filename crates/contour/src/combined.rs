use volterra_core::Point;

use crate::run::{Run, RunError, Visualizer, render};

/// Points gathered from several runs for a single overview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combined {
    pub points: Vec<Point>,
}

impl Combined {
    /// Artifact name used by [`Combined::render`].
    pub const NAME: &'static str = "combined-plot";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every point of `run`, boundary crossings included.
    pub fn extend(&mut self, run: &Run) {
        self.points.extend_from_slice(&run.points);
    }

    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(Point::x).collect()
    }

    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(Point::y).collect()
    }

    /// Renders all collected points as `combined-plot`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Render`] if the visualizer fails.
    pub fn render<V>(&self, visualizer: &mut V) -> Result<(), RunError>
    where
        V: Visualizer + ?Sized,
    {
        render(visualizer, &self.xs(), &self.ys(), Self::NAME.to_owned())
    }
}

impl<'a> FromIterator<&'a Run> for Combined {
    fn from_iter<T: IntoIterator<Item = &'a Run>>(iter: T) -> Self {
        let mut combined = Self::new();
        for run in iter {
            combined.extend(run);
        }
        combined
    }
}
