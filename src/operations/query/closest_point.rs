use crate::error::Result;
use crate::geometry::spline::{CubicSpline, ProjectionParams};
use crate::math::Point2;

/// Result of a closest point query.
#[derive(Debug, Clone, Copy)]
pub struct ClosestPointResult {
    /// The closest point on the spline.
    pub point: Point2,
    /// The spline parameter at the closest point.
    pub parameter: f64,
    /// The distance from the query point to the closest point.
    pub distance: f64,
}

/// Finds the closest point on a spline to a given point.
pub struct ClosestPointOnSpline {
    point: Point2,
    params: ProjectionParams,
}

impl ClosestPointOnSpline {
    /// Creates a new `ClosestPointOnSpline` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            params: ProjectionParams::default(),
        }
    }

    /// Overrides the projection settings.
    #[must_use]
    pub fn with_params(mut self, params: ProjectionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the closest point result.
    ///
    /// Each segment is projected through the roots of its projection
    /// polynomial, falling back to a parameter sweep where root finding
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is empty.
    pub fn execute(&self, spline: &CubicSpline) -> Result<ClosestPointResult> {
        let parameter = spline.nearest_parameter_with(&self.point, &self.params)?;
        let closest = spline.point(parameter)?;
        let distance = (self.point - closest).norm();

        Ok(ClosestPointResult {
            point: closest,
            parameter,
            distance,
        })
    }
}
