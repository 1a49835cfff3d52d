use tracing::debug;

use super::CubicSpline;
use crate::error::{CuglError, Result, SplineError};
use crate::math::bezier_2d;
use crate::math::polynomial::{BairstowParams, Polynomial, Root};
use crate::math::{Point2, TOLERANCE};

/// Default depth of the fallback sweep. A segment is sampled at
/// `2^SAMPLE_DEPTH` equal steps.
pub const SAMPLE_DEPTH: u32 = 8;

/// Newton steps spent polishing each root of the projection polynomial.
const REFINE_STEPS: usize = 8;

/// Parameters for nearest-point queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Root finder settings for the projection polynomial.
    pub roots: BairstowParams,
    /// The fallback sweep samples `2^sample_depth` steps per segment.
    pub sample_depth: u32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            roots: BairstowParams::with_epsilon(1.0 / f64::from(1u32 << (SAMPLE_DEPTH + 1))),
            sample_depth: SAMPLE_DEPTH,
        }
    }
}

impl ProjectionParams {
    /// Number of sweep steps per segment.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        1u32 << self.sample_depth.min(24)
    }
}

/// Nearest parameter on one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Local parameter in `[0, 1]`.
    pub parameter: f64,
    /// Squared distance from the query point.
    pub distance_squared: f64,
}

impl CubicSpline {
    /// Returns the projection polynomial `(B(t) - point) · B'(t)` of a
    /// segment. Its real roots in `[0, 1]` are the candidates for the
    /// nearest point.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::SegmentOutOfRange`] for a missing segment.
    pub fn projection_polynomial(&self, point: &Point2, segment: usize) -> Result<Polynomial> {
        self.check_segment(segment)?;
        let quad = self.segment_quad(segment);
        let mut poly =
            Polynomial::from_coefficients(bezier_2d::projection_coefficients(&quad, point));
        poly.validate();
        Ok(poly)
    }

    /// Projects `point` onto a segment through the roots of the projection
    /// polynomial. Both segment ends are always candidates.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing segment, or
    /// [`PolynomialError::RootsNotFound`](crate::error::PolynomialError::RootsNotFound)
    /// when root finding fails.
    pub fn projection_fast(
        &self,
        point: &Point2,
        segment: usize,
        params: &BairstowParams,
    ) -> Result<SegmentProjection> {
        let poly = self.projection_polynomial(point, segment)?;
        let roots = poly.roots_with(params)?;
        let slope = poly.derivative();

        let interior = roots
            .into_iter()
            .filter_map(Root::real)
            .filter(|t| (0.0..=1.0).contains(t))
            .map(|t| refine_root(&poly, &slope, t));

        let quad = self.segment_quad(segment);
        Ok(closest_candidate(&quad, point, [0.0, 1.0].into_iter().chain(interior)))
    }

    /// Projects `point` onto a segment by sampling `resolution + 1` evenly
    /// spaced parameters, ends included.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::SegmentOutOfRange`] for a missing segment.
    pub fn projection_slow(
        &self,
        point: &Point2,
        segment: usize,
        resolution: u32,
    ) -> Result<SegmentProjection> {
        self.check_segment(segment)?;
        let quad = self.segment_quad(segment);
        let steps = resolution.max(1);
        let samples = (0..=steps).map(|j| f64::from(j) / f64::from(steps));
        Ok(closest_candidate(&quad, point, samples))
    }

    /// Returns the spline parameter of the point nearest to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] for an empty spline.
    pub fn nearest_parameter(&self, point: &Point2) -> Result<f64> {
        self.nearest_parameter_with(point, &ProjectionParams::default())
    }

    /// Like [`CubicSpline::nearest_parameter`] with explicit settings.
    ///
    /// Segments whose projection polynomial defeats the root finder are
    /// sampled instead.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] for an empty spline.
    pub fn nearest_parameter_with(&self, point: &Point2, params: &ProjectionParams) -> Result<f64> {
        if self.points.is_empty() {
            return Err(SplineError::Empty.into());
        }

        let mut best: Option<(usize, SegmentProjection)> = None;
        for segment in 0..self.segment_count() {
            let projection = match self.projection_fast(point, segment, &params.roots) {
                Ok(projection) => projection,
                Err(CuglError::Polynomial(err)) => {
                    debug!(segment, %err, "projection root finding failed, sampling segment");
                    self.projection_slow(point, segment, params.resolution())?
                }
                Err(err) => return Err(err),
            };
            match best {
                Some((_, current)) if current.distance_squared <= projection.distance_squared => {}
                _ => best = Some((segment, projection)),
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let parameter = best.map_or(0.0, |(segment, projection)| {
            segment as f64 + projection.parameter
        });
        Ok(parameter)
    }

    /// Returns the point on the spline nearest to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] for an empty spline.
    pub fn nearest_point(&self, point: &Point2) -> Result<Point2> {
        let tp = self.nearest_parameter(point)?;
        self.point(tp)
    }

    /// Returns the index of the anchor nearest to `point` among those whose
    /// squared distance is below `threshold`. Ties go to the lower index.
    #[must_use]
    pub fn nearest_anchor(&self, point: &Point2, threshold: f64) -> Option<usize> {
        nearest_index(
            (0..self.anchor_count()).map(|i| (i, self.points[3 * i])),
            point,
            threshold,
        )
    }

    /// Returns the index of the tangent nearest to `point` among those whose
    /// squared distance is below `threshold`. Ties go to the lower index.
    #[must_use]
    pub fn nearest_tangent(&self, point: &Point2, threshold: f64) -> Option<usize> {
        nearest_index(
            (0..self.tangent_count()).map(|i| (i, self.points[Self::tangent_slot(i)])),
            point,
            threshold,
        )
    }
}

fn closest_candidate<I>(quad: &[Point2; 4], point: &Point2, candidates: I) -> SegmentProjection
where
    I: IntoIterator<Item = f64>,
{
    let mut best = SegmentProjection {
        parameter: 0.0,
        distance_squared: f64::INFINITY,
    };
    for t in candidates {
        let d = (bezier_2d::bezier_point(quad, t) - point).norm_squared();
        if d < best.distance_squared {
            best = SegmentProjection {
                parameter: t,
                distance_squared: d,
            };
        }
    }
    best
}

/// Newton iteration on a root of `poly`, kept inside `[0, 1]`.
fn refine_root(poly: &Polynomial, slope: &Polynomial, mut t: f64) -> f64 {
    for _ in 0..REFINE_STEPS {
        let d = slope.evaluate(t);
        if d.abs() < TOLERANCE {
            break;
        }
        let next = (t - poly.evaluate(t) / d).clamp(0.0, 1.0);
        let step = (next - t).abs();
        t = next;
        if step < TOLERANCE {
            break;
        }
    }
    t
}

fn nearest_index<I>(candidates: I, point: &Point2, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Point2)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates {
        let d = (candidate - point).norm_squared();
        if d >= threshold {
            continue;
        }
        match best {
            Some((_, current)) if current <= d => {}
            _ => best = Some((index, d)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arch() -> CubicSpline {
        CubicSpline::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 3.0),
            Point2::new(4.0, 3.0),
            Point2::new(5.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn default_params() {
        let params = ProjectionParams::default();
        assert_abs_diff_eq!(params.roots.epsilon, 1.0 / 512.0);
        assert_eq!(params.resolution(), 256);
    }

    #[test]
    fn projection_polynomial_vanishes_at_foot() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let poly = spline
            .projection_polynomial(&Point2::new(5.0, 3.0), 0)
            .unwrap();
        assert_eq!(poly.degree(), 5);
        assert_abs_diff_eq!(poly.evaluate(0.5), 0.0, epsilon = 1e-9);
        assert!(spline.projection_polynomial(&Point2::origin(), 1).is_err());
    }

    #[test]
    fn nearest_on_line() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let query = Point2::new(5.0, 3.0);
        let tp = spline.nearest_parameter(&query).unwrap();
        assert_abs_diff_eq!(tp, 0.5, epsilon = 1e-6);
        let p = spline.nearest_point(&query).unwrap();
        assert_abs_diff_eq!(p, Point2::new(5.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn nearest_clamps_to_end() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let tp = spline.nearest_parameter(&Point2::new(15.0, 1.0)).unwrap();
        assert_abs_diff_eq!(tp, 1.0, epsilon = 1e-6);
        let tp = spline.nearest_parameter(&Point2::new(-3.0, -1.0)).unwrap();
        assert_abs_diff_eq!(tp, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn nearest_on_arch_apex() {
        let spline = arch();
        let query = Point2::new(2.5, 5.0);
        let tp = spline.nearest_parameter(&query).unwrap();
        assert_abs_diff_eq!(tp, 0.5, epsilon = 1e-6);
        let p = spline.nearest_point(&query).unwrap();
        assert_abs_diff_eq!(p, Point2::new(2.5, 2.25), epsilon = 1e-6);
    }

    #[test]
    fn nearest_picks_best_segment() {
        let mut spline = arch();
        spline.add_anchor(Point2::new(10.0, 0.0), Point2::new(9.0, -3.0)).unwrap();
        let tp = spline.nearest_parameter(&Point2::new(7.5, -5.0)).unwrap();
        assert!(tp > 1.0 && tp < 2.0);
    }

    #[test]
    fn slow_projection_agrees_with_fast() {
        let spline = arch();
        let params = ProjectionParams::default();
        for query in [
            Point2::new(1.0, 4.0),
            Point2::new(3.5, 1.0),
            Point2::new(6.0, 2.0),
        ] {
            let fast = spline.projection_fast(&query, 0, &params.roots).unwrap();
            let slow = spline
                .projection_slow(&query, 0, params.resolution())
                .unwrap();
            assert!(fast.distance_squared <= slow.distance_squared + 1e-12);
            assert_abs_diff_eq!(fast.parameter, slow.parameter, epsilon = 1.0 / 256.0);
        }
    }

    #[test]
    fn failed_root_finding_falls_back_to_sampling() {
        let spline = arch();
        let query = Point2::new(2.5, 5.0);
        let params = ProjectionParams {
            roots: BairstowParams {
                max_iterations: 0,
                ..BairstowParams::default()
            },
            sample_depth: SAMPLE_DEPTH,
        };
        assert!(spline.projection_fast(&query, 0, &params.roots).is_err());
        let tp = spline.nearest_parameter_with(&query, &params).unwrap();
        assert_abs_diff_eq!(tp, 0.5, epsilon = 1.0 / 256.0);
    }

    #[test]
    fn single_anchor_and_empty() {
        let mut spline = CubicSpline::new();
        assert!(spline.nearest_parameter(&Point2::origin()).is_err());
        spline.add_anchor_point(Point2::new(1.0, 1.0)).unwrap();
        assert_abs_diff_eq!(spline.nearest_parameter(&Point2::origin()).unwrap(), 0.0);
    }

    #[test]
    fn degenerate_segment_projects_to_point() {
        let spline = CubicSpline::from_point(Point2::new(1.0, 1.0));
        let p = spline.nearest_point(&Point2::new(4.0, 5.0)).unwrap();
        assert_eq!(p, Point2::new(1.0, 1.0));
    }

    #[test]
    fn nearest_anchor_threshold_and_ties() {
        let spline = CubicSpline::line(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0));
        assert_eq!(spline.nearest_anchor(&Point2::new(0.1, 0.0), 1.0), Some(0));
        assert_eq!(spline.nearest_anchor(&Point2::new(1.9, 0.0), 1.0), Some(1));
        // Equidistant: lower index wins
        assert_eq!(spline.nearest_anchor(&Point2::new(1.0, 0.0), 2.0), Some(0));
        // Squared distance must be strictly below the threshold
        assert_eq!(spline.nearest_anchor(&Point2::new(1.0, 0.0), 1.0), None);
    }

    #[test]
    fn nearest_tangent_indexes() {
        let spline = arch();
        assert_eq!(spline.nearest_tangent(&Point2::new(1.1, 3.0), 0.5), Some(0));
        assert_eq!(spline.nearest_tangent(&Point2::new(3.9, 3.0), 0.5), Some(1));
        assert_eq!(spline.nearest_tangent(&Point2::new(2.5, 3.0), 0.5), None);
    }

    #[test]
    fn closed_spline_skips_duplicate_anchor() {
        let mut spline = arch();
        spline.set_closed(true).unwrap();
        assert_eq!(spline.anchor_count(), 2);
        assert_eq!(spline.nearest_anchor(&Point2::new(0.0, 0.1), 1.0), Some(0));
    }
}
