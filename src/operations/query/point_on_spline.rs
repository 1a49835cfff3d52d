use crate::error::Result;
use crate::geometry::spline::CubicSpline;
use crate::math::Point2;

/// Evaluates a point on a spline at a given parameter.
pub struct PointOnSpline {
    t: f64,
}

impl PointOnSpline {
    /// Creates a new `PointOnSpline` query.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self { t }
    }

    /// Executes the query, returning the 2D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is empty or the parameter is outside
    /// its domain.
    pub fn execute(&self, spline: &CubicSpline) -> Result<Point2> {
        spline.point(self.t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_on_line_midpoint() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let p = PointOnSpline::new(0.5).execute(&spline).unwrap();
        assert!((p.x - 5.0).abs() < 1e-10);
        assert!(p.y.abs() < 1e-10);
    }

    #[test]
    fn point_outside_domain_fails() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert!(PointOnSpline::new(1.5).execute(&spline).is_err());
        assert!(PointOnSpline::new(0.0).execute(&CubicSpline::new()).is_err());
    }
}
