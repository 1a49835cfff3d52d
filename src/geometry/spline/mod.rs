mod edit;
mod projection;

pub use projection::{ProjectionParams, SegmentProjection, SAMPLE_DEPTH};

use crate::error::{GeometryError, Result, SplineError};
use crate::geometry::curve::{Curve, CurveDomain};
use crate::math::bezier_2d;
use crate::math::polynomial::Polynomial;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Maximum squared difference between the unit tangent directions at an
/// interior anchor for the anchor to be detected as smooth.
pub const SMOOTH_TOLERANCE: f64 = 1e-4;

/// A spline of cubic Bézier segments.
///
/// Control points are stored as anchor, tangent, tangent, anchor, ... so
/// that a spline with `n` segments has `3n + 1` points. Segment `i` is the
/// Bézier with control points `3i..=3i+3`. A closed spline stores its first
/// anchor a second time as the last point.
///
/// Every stored anchor carries a smoothness flag. A smooth anchor keeps its
/// two tangents antiparallel when one of them is edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CubicSpline {
    points: Vec<Point2>,
    smooth: Vec<bool>,
    closed: bool,
}

impl CubicSpline {
    /// Creates an empty spline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a degenerate closed spline with a single segment collapsed
    /// onto `point`.
    #[must_use]
    pub fn from_point(point: Point2) -> Self {
        Self::line(point, point)
    }

    /// Creates a single straight segment from `start` to `end`.
    ///
    /// The tangents coincide with their anchors. The spline is closed if
    /// the two anchors are the same point.
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self {
            points: vec![start, start, end, end],
            smooth: vec![true, true],
            closed: start == end,
        }
    }

    /// Creates an open spline from control points.
    ///
    /// Interior anchors whose tangents are already antiparallel are marked
    /// smooth. End anchors are always smooth.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::MalformedControlPoints`] unless the length is
    /// `3k + 1`.
    pub fn from_points(points: Vec<Point2>) -> Result<Self> {
        if points.len() % 3 != 1 {
            return Err(SplineError::MalformedControlPoints {
                len: points.len(),
                modulus: 3,
                remainder: 1,
            }
            .into());
        }
        let smooth = detect_smoothness(&points);
        Ok(Self {
            points,
            smooth,
            closed: false,
        })
    }

    /// Creates an open spline from interleaved `x, y` coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::MalformedControlPoints`] unless the length is
    /// `6k + 2`.
    pub fn from_coords(coords: &[f64]) -> Result<Self> {
        if coords.len() % 6 != 2 {
            return Err(SplineError::MalformedControlPoints {
                len: coords.len(),
                modulus: 6,
                remainder: 2,
            }
            .into());
        }
        let points = coords
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect();
        Self::from_points(points)
    }

    /// Returns the number of Bézier segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1) / 3
    }

    /// Returns the number of distinct anchors.
    ///
    /// This is `n + 1` for an open spline with `n` segments and `n` for a
    /// closed one.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        if self.closed {
            self.segment_count()
        } else {
            self.points.len().div_ceil(3)
        }
    }

    /// Returns the number of tangents, two per segment.
    #[must_use]
    pub fn tangent_count(&self) -> usize {
        2 * self.segment_count()
    }

    /// Returns true if the spline has no control points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns whether the spline is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns all control points, anchors and tangents interleaved.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the control points as interleaved `x, y` coordinates.
    #[must_use]
    pub fn control_coords(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Returns the spline point at parameter `tp`.
    ///
    /// The integer part of `tp` selects the segment and the fraction is the
    /// position within it, so integral values are anchors and `tp == n` is
    /// the last anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is empty or `tp` is outside `[0, n]`.
    pub fn point(&self, tp: f64) -> Result<Point2> {
        self.check_parameter(tp)?;
        let size = self.segment_count();
        if size == 0 {
            return Ok(self.points[0]);
        }
        let (segment, t) = split_parameter(tp, size);
        Ok(bezier_2d::bezier_point(&self.segment_quad(segment), t))
    }

    /// Returns the point at local parameter `t` of a single segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment does not exist or `t` is outside
    /// `[0, 1]`.
    pub fn segment_point(&self, segment: usize, t: f64) -> Result<Point2> {
        self.check_segment(segment)?;
        check_unit_parameter(t)?;
        Ok(bezier_2d::bezier_point(&self.segment_quad(segment), t))
    }

    /// Returns the x-axis polynomial of a segment in the power basis.
    ///
    /// The leading coefficient may be zero for degenerate segments.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::SegmentOutOfRange`] for a missing segment.
    pub fn polynomial_x(&self, segment: usize) -> Result<Polynomial> {
        self.check_segment(segment)?;
        let q = self.segment_quad(segment);
        Ok(Polynomial::from_coefficients(
            bezier_2d::power_coefficients(q[0].x, q[1].x, q[2].x, q[3].x),
        ))
    }

    /// Returns the y-axis polynomial of a segment in the power basis.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::SegmentOutOfRange`] for a missing segment.
    pub fn polynomial_y(&self, segment: usize) -> Result<Polynomial> {
        self.check_segment(segment)?;
        let q = self.segment_quad(segment);
        Ok(Polynomial::from_coefficients(
            bezier_2d::power_coefficients(q[0].y, q[1].y, q[2].y, q[3].y),
        ))
    }

    fn segment_quad(&self, segment: usize) -> [Point2; 4] {
        let start = 3 * segment;
        let mut quad = [Point2::origin(); 4];
        quad.copy_from_slice(&self.points[start..start + 4]);
        quad
    }

    /// Point index of tangent `index`.
    fn tangent_slot(index: usize) -> usize {
        index + index / 2 + 1
    }

    fn check_segment(&self, segment: usize) -> Result<()> {
        let size = self.segment_count();
        if segment < size {
            Ok(())
        } else {
            Err(SplineError::SegmentOutOfRange { segment, size }.into())
        }
    }

    fn check_parameter(&self, tp: f64) -> Result<()> {
        if self.points.is_empty() {
            return Err(SplineError::Empty.into());
        }
        #[allow(clippy::cast_precision_loss)]
        let max = self.segment_count() as f64;
        if (0.0..=max).contains(&tp) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "tp",
                value: tp,
                min: 0.0,
                max,
            }
            .into())
        }
    }
}

impl Curve for CubicSpline {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        self.point(t)
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        self.check_parameter(t)?;
        let size = self.segment_count();
        if size == 0 {
            return Err(GeometryError::ZeroVector.into());
        }
        let (segment, local) = split_parameter(t, size);
        let quad = self.segment_quad(segment);
        let direction = bezier_2d::bezier_derivative(&quad, local)
            .try_normalize(TOLERANCE)
            .or_else(|| limit_direction(&quad, local))
            .ok_or(GeometryError::ZeroVector)?;
        Ok(direction)
    }

    fn domain(&self) -> CurveDomain {
        #[allow(clippy::cast_precision_loss)]
        let max = self.segment_count() as f64;
        CurveDomain::new(0.0, max)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Splits a spline parameter into segment and local parameter. `size` must
/// be nonzero and `tp` inside `[0, size]`.
fn split_parameter(tp: f64, size: usize) -> (usize, f64) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segment = (tp.floor() as usize).min(size - 1);
    #[allow(clippy::cast_precision_loss)]
    let t = tp - segment as f64;
    (segment, t)
}

fn check_unit_parameter(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

/// Direction of travel where the derivative vanishes because a tangent
/// coincides with its anchor.
fn limit_direction(quad: &[Point2; 4], t: f64) -> Option<Vector2> {
    let candidates = if t < 0.5 {
        [quad[2] - quad[0], quad[3] - quad[0]]
    } else {
        [quad[3] - quad[1], quad[3] - quad[0]]
    };
    candidates
        .into_iter()
        .find_map(|v| v.try_normalize(TOLERANCE))
}

fn detect_smoothness(points: &[Point2]) -> Vec<bool> {
    let anchors = points.len().div_ceil(3);
    (0..anchors)
        .map(|i| {
            i == 0
                || i + 1 == anchors
                || is_smooth_joint(&points[3 * i - 1], &points[3 * i], &points[3 * i + 1])
        })
        .collect()
}

/// A joint is smooth when the incoming and outgoing directions agree. A
/// collapsed tangent has no direction and counts as smooth.
fn is_smooth_joint(left: &Point2, anchor: &Point2, right: &Point2) -> bool {
    let incoming = (anchor - left).try_normalize(TOLERANCE);
    let outgoing = (right - anchor).try_normalize(TOLERANCE);
    match (incoming, outgoing) {
        (Some(a), Some(b)) => (a - b).norm_squared() < SMOOTH_TOLERANCE,
        _ => true,
    }
}
