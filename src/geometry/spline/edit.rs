use super::{check_unit_parameter, is_smooth_joint, split_parameter, CubicSpline};
use crate::error::{GeometryError, Result, SplineError};
use crate::math::{bezier_2d, Point2, TOLERANCE};

impl CubicSpline {
    /// Sets the spline point at parameter `tp`.
    ///
    /// An integral `tp` moves that anchor. Otherwise a new anchor is
    /// inserted at `tp` and then moved, which shifts the parameterization of
    /// every later anchor by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is empty or `tp` is outside `[0, n]`.
    pub fn set_point(&mut self, tp: f64, point: Point2) -> Result<()> {
        self.check_parameter(tp)?;
        let size = self.segment_count();
        if size == 0 {
            return self.set_anchor(0, point);
        }
        let (segment, t) = split_parameter(tp, size);
        if t <= 0.0 {
            return self.set_anchor(segment, point);
        }
        if t >= 1.0 {
            let index = if self.closed { 0 } else { segment + 1 };
            return self.set_anchor(index, point);
        }
        self.insert_anchor_in(segment, t)?;
        self.set_anchor(segment + 1, point)
    }

    /// Returns the anchor at `index`. On a closed spline the index wraps
    /// around, so `anchor(n) == anchor(0)`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last anchor of an
    /// open spline.
    pub fn anchor(&self, index: usize) -> Result<Point2> {
        let size = self.segment_count();
        if self.closed && size > 0 {
            return Ok(self.points[3 * (index % size)]);
        }
        self.check_anchor(index)?;
        Ok(self.points[3 * index])
    }

    /// Moves the anchor at `index`, translating both of its tangents by the
    /// same offset so the curve keeps its local shape.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last anchor.
    pub fn set_anchor(&mut self, index: usize, point: Point2) -> Result<()> {
        self.check_anchor(index)?;
        let size = self.segment_count();
        let slot = 3 * index;
        let delta = point - self.points[slot];

        if index > 0 {
            self.points[slot - 1] += delta;
        } else if self.closed {
            self.points[3 * size - 1] += delta;
        }
        if index < size {
            self.points[slot + 1] += delta;
        }

        self.points[slot] = point;
        if index == 0 && self.closed {
            self.points[3 * size] = point;
        }
        Ok(())
    }

    /// Returns the smoothness of the anchor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last anchor.
    pub fn smooth(&self, index: usize) -> Result<bool> {
        self.check_anchor(index)?;
        Ok(self.smooth[index])
    }

    /// Sets the smoothness of the anchor at `index`.
    ///
    /// Making an anchor smooth averages the directions of its two tangents
    /// into a common axis. Each tangent keeps its length.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last anchor.
    pub fn set_smooth(&mut self, index: usize, flag: bool) -> Result<()> {
        self.check_anchor(index)?;
        self.set_smooth_flag(index, flag);
        if flag {
            if let Some((left, right)) = self.joint_tangents(index) {
                self.align_tangents(3 * index, left, right);
            }
        }
        Ok(())
    }

    /// Returns tangent `index` as a point.
    ///
    /// Tangent `2i` is the right tangent of anchor `i` and tangent `2i + 1`
    /// the left tangent of anchor `i + 1`. In a closed spline the last
    /// tangent is the left tangent of the first anchor.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last tangent.
    pub fn tangent(&self, index: usize) -> Result<Point2> {
        self.check_tangent(index)?;
        Ok(self.points[Self::tangent_slot(index)])
    }

    /// Sets tangent `index`.
    ///
    /// If the owning anchor is smooth, the opposite tangent is rotated to
    /// stay antiparallel and keeps its length. With `symmetric` the opposite
    /// tangent becomes the exact mirror image, smooth or not. End anchors of
    /// an open spline have no opposite tangent.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last tangent.
    pub fn set_tangent(&mut self, index: usize, point: Point2, symmetric: bool) -> Result<()> {
        self.check_tangent(index)?;
        let (anchor, opposite) = self.tangent_joint(index);
        let origin = self.points[3 * anchor];

        if let Some(other) = opposite {
            let mirror = origin - point;
            if symmetric {
                self.points[other] = origin + mirror;
            } else if self.smooth[anchor] {
                let length = (self.points[other] - origin).norm();
                if let Some(direction) = mirror.try_normalize(TOLERANCE) {
                    self.points[other] = origin + direction * length;
                }
            }
        }

        self.points[Self::tangent_slot(index)] = point;
        Ok(())
    }

    /// Opens or closes the spline.
    ///
    /// Closing a spline whose ends differ appends a segment from the last
    /// anchor back to the first. The seam anchor is smooth only if its two
    /// tangents already line up.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::Empty`] when closing an empty spline.
    pub fn set_closed(&mut self, flag: bool) -> Result<()> {
        if !flag {
            self.closed = false;
            return Ok(());
        }
        if self.closed {
            return Ok(());
        }
        let first = *self.points.first().ok_or(SplineError::Empty)?;
        if self.segment_count() == 0 || self.points.last() != Some(&first) {
            self.add_anchor_point(first)?;
        }
        self.closed = true;
        let size = self.segment_count();
        let head = is_smooth_joint(&self.points[3 * size - 1], &self.points[0], &self.points[1]);
        self.set_smooth_flag(0, head);
        Ok(())
    }

    /// Appends a segment ending at `point`, with `tangent` as the left
    /// tangent of the new anchor. Returns the new segment count.
    ///
    /// The right tangent of the previous end mirrors its left tangent if that
    /// anchor is smooth and coincides with it otherwise. Appending to an
    /// empty spline only places the first anchor.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::ClosedSpline`] for a closed spline.
    pub fn add_anchor(&mut self, point: Point2, tangent: Point2) -> Result<usize> {
        if self.closed {
            return Err(SplineError::ClosedSpline.into());
        }
        let Some(&end) = self.points.last() else {
            self.points.push(point);
            self.smooth.push(true);
            return Ok(0);
        };

        let size = self.segment_count();
        let out = if size > 0 && self.smooth[size] {
            end + (end - self.points[3 * size - 1])
        } else {
            end
        };

        self.points.extend([out, tangent, point]);
        self.smooth.push(true);
        Ok(self.segment_count())
    }

    /// Appends a segment ending at `point` with a collapsed left tangent.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::ClosedSpline`] for a closed spline.
    pub fn add_anchor_point(&mut self, point: Point2) -> Result<usize> {
        self.add_anchor(point, point)
    }

    /// Deletes the anchor at `index` together with both of its tangents.
    ///
    /// The neighbouring segments merge into one and later anchors shift down
    /// by one. A closed spline stays closed. Deleting the only anchor clears
    /// the spline.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] past the last anchor.
    pub fn delete_anchor(&mut self, index: usize) -> Result<()> {
        self.check_anchor(index)?;
        if self.anchor_count() == 1 {
            self.clear();
            return Ok(());
        }

        let size = self.segment_count();
        if self.closed && index == 0 {
            // Drop the stored duplicate and the first anchor's left tangent,
            // then rotate so the old anchor 1 leads.
            self.points.truncate(3 * size - 1);
            self.points.drain(0..2);
            self.points.rotate_left(1);
            let head = self.points[0];
            self.points.push(head);

            self.smooth.pop();
            self.smooth.remove(0);
            let head = self.smooth[0];
            self.smooth.push(head);
            return Ok(());
        }

        let slot = 3 * index;
        if index == 0 {
            self.points.drain(0..3);
        } else if index == size {
            self.points.drain(slot - 2..=slot);
        } else {
            self.points.drain(slot - 1..=slot + 1);
        }
        self.smooth.remove(index);

        if !self.closed {
            self.smooth[0] = true;
            let last = self.smooth.len() - 1;
            self.smooth[last] = true;
        }
        Ok(())
    }

    /// Inserts an anchor at spline parameter `tp` without changing the
    /// shape of the curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `tp` is out of range or falls on an existing
    /// anchor.
    pub fn insert_anchor(&mut self, tp: f64) -> Result<()> {
        self.check_parameter(tp)?;
        let size = self.segment_count();
        if size == 0 {
            return Err(SplineError::SegmentOutOfRange { segment: 0, size }.into());
        }
        let (segment, t) = split_parameter(tp, size);
        self.insert_anchor_in(segment, t)
    }

    /// Inserts an anchor at local parameter `t` of `segment`, splitting it
    /// with de Casteljau's algorithm. The new anchor is smooth.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment does not exist or `t` is not strictly
    /// inside `(0, 1)`.
    pub fn insert_anchor_in(&mut self, segment: usize, t: f64) -> Result<()> {
        self.check_segment(segment)?;
        if t <= 0.0 || t >= 1.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }

        let (left, right) = bezier_2d::subdivide(&self.segment_quad(segment), t);
        let start = 3 * segment;
        self.points
            .splice(start..start + 4, left.into_iter().chain(right.into_iter().skip(1)));
        self.smooth.insert(segment + 1, true);
        Ok(())
    }

    /// Splits the Bézier starting at `src[offset]` at parameter `t`.
    ///
    /// Works on any control point list, so callers can subdivide
    /// recursively without building a spline.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than four points follow `offset` or `t` is
    /// outside `[0, 1]`.
    pub fn subdivide(
        src: &[Point2],
        offset: usize,
        t: f64,
    ) -> Result<([Point2; 4], [Point2; 4])> {
        let quad: &[Point2; 4] = src
            .get(offset..offset + 4)
            .and_then(|s| s.try_into().ok())
            .ok_or(SplineError::IndexOutOfRange {
                kind: "control point",
                index: offset + 3,
                count: src.len(),
            })?;
        check_unit_parameter(t)?;
        Ok(bezier_2d::subdivide(quad, t))
    }

    /// Splits `segment` at local parameter `t`, leaving the spline as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment does not exist or `t` is outside
    /// `[0, 1]`.
    pub fn subdivide_segment(&self, segment: usize, t: f64) -> Result<([Point2; 4], [Point2; 4])> {
        self.check_segment(segment)?;
        check_unit_parameter(t)?;
        Ok(bezier_2d::subdivide(&self.segment_quad(segment), t))
    }

    /// Removes every control point, leaving an empty open spline.
    pub fn clear(&mut self) {
        self.points.clear();
        self.smooth.clear();
        self.closed = false;
    }

    fn check_anchor(&self, index: usize) -> Result<()> {
        let count = self.anchor_count();
        if index < count {
            Ok(())
        } else {
            Err(SplineError::IndexOutOfRange {
                kind: "anchor",
                index,
                count,
            }
            .into())
        }
    }

    fn check_tangent(&self, index: usize) -> Result<()> {
        let count = self.tangent_count();
        if index < count {
            Ok(())
        } else {
            Err(SplineError::IndexOutOfRange {
                kind: "tangent",
                index,
                count,
            }
            .into())
        }
    }

    /// Keeps the stored duplicate of a closed spline's first anchor in step.
    fn set_smooth_flag(&mut self, index: usize, flag: bool) {
        self.smooth[index] = flag;
        if index == 0 && self.closed {
            if let Some(last) = self.smooth.last_mut() {
                *last = flag;
            }
        }
    }

    /// Owning anchor of tangent `index` and the point index of the tangent
    /// on the other side of that anchor, if there is one.
    fn tangent_joint(&self, index: usize) -> (usize, Option<usize>) {
        let size = self.segment_count();
        let anchor = index.div_ceil(2);
        let opposite = if index % 2 == 0 {
            if anchor > 0 {
                Some(3 * anchor - 1)
            } else if self.closed {
                Some(3 * size - 1)
            } else {
                None
            }
        } else if anchor < size {
            Some(3 * anchor + 1)
        } else if self.closed {
            Some(1)
        } else {
            None
        };
        (anchor, opposite)
    }

    /// Left and right tangent point indices around anchor `index`.
    fn joint_tangents(&self, index: usize) -> Option<(usize, usize)> {
        let size = self.segment_count();
        let slot = 3 * index;
        if index > 0 && index < size {
            Some((slot - 1, slot + 1))
        } else if index == 0 && self.closed && size > 0 {
            Some((3 * size - 1, 1))
        } else {
            None
        }
    }

    fn align_tangents(&mut self, anchor: usize, left: usize, right: usize) {
        let origin = self.points[anchor];
        let back = self.points[left] - origin;
        let ahead = origin - self.points[right];

        let axis = match (back.try_normalize(TOLERANCE), ahead.try_normalize(TOLERANCE)) {
            (Some(a), Some(b)) => (a + b).try_normalize(TOLERANCE).unwrap_or(a),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return,
        };

        self.points[left] = origin + axis * back.norm();
        self.points[right] = origin - axis * ahead.norm();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CuglError;
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn corner() -> CubicSpline {
        CubicSpline::from_points(vec![
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(3.0, 0.0),
            p(4.0, 1.0),
            p(5.0, 1.0),
            p(6.0, 0.0),
        ])
        .unwrap()
    }

    fn square() -> CubicSpline {
        let mut spline = CubicSpline::new();
        spline.add_anchor_point(p(0.0, 0.0)).unwrap();
        spline.add_anchor_point(p(4.0, 0.0)).unwrap();
        spline.add_anchor_point(p(4.0, 4.0)).unwrap();
        spline.add_anchor_point(p(0.0, 4.0)).unwrap();
        spline.set_closed(true).unwrap();
        spline
    }

    /// Open loop whose ends meet at the origin with a corner.
    fn lobe() -> CubicSpline {
        CubicSpline::from_points(vec![
            p(0.0, 0.0),
            p(1.0, 2.0),
            p(4.0, 2.0),
            p(5.0, 0.0),
            p(6.0, -2.0),
            p(-1.0, -3.0),
            p(0.0, 0.0),
        ])
        .unwrap()
    }

    fn cross(a: &Vector2, b: &Vector2) -> f64 {
        a.x * b.y - a.y * b.x
    }

    #[test]
    fn set_anchor_moves_tangents() {
        let mut spline = corner();
        spline.set_anchor(1, p(3.0, 2.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[2], p(2.0, 3.0));
        assert_eq!(pts[3], p(3.0, 2.0));
        assert_eq!(pts[4], p(4.0, 3.0));
        assert_eq!(pts[0], p(0.0, 0.0));
    }

    #[test]
    fn closed_first_anchor_moves_duplicate() {
        let mut spline = square();
        assert_eq!(spline.anchor_count(), 4);
        spline.set_anchor(0, p(-1.0, -1.0)).unwrap();
        assert_eq!(spline.anchor(0).unwrap(), p(-1.0, -1.0));
        assert_eq!(spline.point(4.0).unwrap(), p(-1.0, -1.0));
        assert_eq!(spline.anchor(4).unwrap(), spline.anchor(0).unwrap());
        assert_eq!(spline.anchor(5).unwrap(), spline.anchor(1).unwrap());
        assert!(spline.set_anchor(4, p(0.0, 0.0)).is_err());
    }

    #[test]
    fn set_smooth_aligns_tangents() {
        let mut spline = corner();
        assert!(!spline.smooth(1).unwrap());
        spline.set_smooth(1, true).unwrap();
        assert!(spline.smooth(1).unwrap());

        let anchor = spline.anchor(1).unwrap();
        let left = spline.tangent(1).unwrap() - anchor;
        let right = spline.tangent(2).unwrap() - anchor;
        assert_abs_diff_eq!(cross(&left, &right), 0.0, epsilon = TOL);
        assert!(left.dot(&right) < 0.0);
        assert_abs_diff_eq!(left.norm(), 2.0_f64.sqrt(), epsilon = TOL);
        assert_abs_diff_eq!(right.norm(), 2.0_f64.sqrt(), epsilon = TOL);
        // Averaged axis is horizontal
        assert_abs_diff_eq!(left, Vector2::new(-2.0_f64.sqrt(), 0.0), epsilon = TOL);
    }

    #[test]
    fn tangent_indexing() {
        let spline = corner();
        assert_eq!(spline.tangent_count(), 4);
        assert_eq!(spline.tangent(0).unwrap(), p(1.0, 1.0));
        assert_eq!(spline.tangent(1).unwrap(), p(2.0, 1.0));
        assert_eq!(spline.tangent(2).unwrap(), p(4.0, 1.0));
        assert_eq!(spline.tangent(3).unwrap(), p(5.0, 1.0));
        assert!(matches!(
            spline.tangent(4),
            Err(CuglError::Spline(SplineError::IndexOutOfRange {
                kind: "tangent",
                index: 4,
                count: 4
            }))
        ));
    }

    #[test]
    fn set_tangent_on_smooth_anchor_rotates_opposite() {
        let mut spline = corner();
        spline.set_smooth(1, true).unwrap();
        let anchor = spline.anchor(1).unwrap();
        let before = (spline.tangent(2).unwrap() - anchor).norm();

        spline.set_tangent(1, p(3.0, 2.0), false).unwrap();
        assert_eq!(spline.tangent(1).unwrap(), p(3.0, 2.0));
        let right = spline.tangent(2).unwrap() - anchor;
        assert_abs_diff_eq!(right, Vector2::new(0.0, -before), epsilon = TOL);
    }

    #[test]
    fn set_tangent_symmetric_mirrors() {
        let mut spline = corner();
        spline.set_tangent(2, p(5.0, 0.0), true).unwrap();
        assert_eq!(spline.tangent(2).unwrap(), p(5.0, 0.0));
        assert_eq!(spline.tangent(1).unwrap(), p(1.0, 0.0));
    }

    #[test]
    fn set_tangent_on_corner_leaves_opposite() {
        let mut spline = corner();
        spline.set_tangent(2, p(5.0, 0.0), false).unwrap();
        assert_eq!(spline.tangent(1).unwrap(), p(2.0, 1.0));
    }

    #[test]
    fn closed_last_tangent_pairs_with_first() {
        let mut spline = square();
        let last = spline.tangent_count() - 1;
        spline.set_tangent(0, p(1.0, -1.0), true).unwrap();
        assert_eq!(spline.tangent(last).unwrap(), p(-1.0, 1.0));
    }

    #[test]
    fn closing_keeps_seam_corner() {
        let mut spline = lobe();
        assert!(spline.smooth(0).unwrap());
        spline.set_closed(true).unwrap();
        assert_eq!(spline.segment_count(), 2);
        assert!(!spline.smooth(0).unwrap());

        // A one-sided edit leaves the other side of the corner alone
        let last = spline.tangent_count() - 1;
        spline.set_tangent(0, p(2.0, 1.0), false).unwrap();
        assert_eq!(spline.tangent(last).unwrap(), p(-1.0, -3.0));
    }

    #[test]
    fn closing_detects_aligned_seam() {
        let mut points = lobe().control_points().to_vec();
        points[5] = p(-1.0, -2.0);
        let mut spline = CubicSpline::from_points(points).unwrap();
        spline.set_closed(true).unwrap();
        assert!(spline.smooth(0).unwrap());
    }

    #[test]
    fn set_smooth_aligns_across_seam() {
        let mut spline = lobe();
        spline.set_closed(true).unwrap();
        spline.set_smooth(0, true).unwrap();
        assert!(spline.smooth(0).unwrap());

        let anchor = spline.anchor(0).unwrap();
        let last = spline.tangent_count() - 1;
        let left = spline.tangent(last).unwrap() - anchor;
        let right = spline.tangent(0).unwrap() - anchor;
        assert_abs_diff_eq!(cross(&left, &right), 0.0, epsilon = TOL);
        assert!(left.dot(&right) < 0.0);
        assert_abs_diff_eq!(left.norm(), 10.0_f64.sqrt(), epsilon = TOL);
        assert_abs_diff_eq!(right.norm(), 5.0_f64.sqrt(), epsilon = TOL);
    }

    #[test]
    fn seam_tangent_rotates_first_tangent() {
        let mut spline = lobe();
        spline.set_closed(true).unwrap();
        spline.set_smooth(0, true).unwrap();

        let last = spline.tangent_count() - 1;
        spline.set_tangent(last, p(-2.0, 1.0), false).unwrap();
        assert_eq!(spline.tangent(last).unwrap(), p(-2.0, 1.0));

        let left = Vector2::new(-2.0, 1.0);
        let right = spline.tangent(0).unwrap() - spline.anchor(0).unwrap();
        assert_abs_diff_eq!(cross(&left, &right), 0.0, epsilon = TOL);
        assert!(left.dot(&right) < 0.0);
        // Rotated, with its length of sqrt(5) kept
        assert_abs_diff_eq!(spline.tangent(0).unwrap(), p(2.0, -1.0), epsilon = TOL);
    }

    #[test]
    fn add_anchor_extends_open_spline() {
        let mut spline = CubicSpline::line(p(0.0, 0.0), p(2.0, 0.0));
        // End anchor is smooth with a collapsed left tangent
        let size = spline.add_anchor(p(4.0, 2.0), p(4.0, 1.0)).unwrap();
        assert_eq!(size, 2);
        assert_eq!(spline.anchor_count(), 3);
        assert_eq!(spline.control_points()[4], p(2.0, 0.0));
        assert_eq!(spline.tangent(3).unwrap(), p(4.0, 1.0));

        spline.add_anchor_point(p(6.0, 2.0)).unwrap();
        // Mirror of left tangent (4, 1) about (4, 2)
        assert_eq!(spline.tangent(4).unwrap(), p(4.0, 3.0));
    }

    #[test]
    fn add_anchor_from_empty() {
        let mut spline = CubicSpline::new();
        assert_eq!(spline.add_anchor_point(p(1.0, 1.0)).unwrap(), 0);
        assert_eq!(spline.anchor_count(), 1);
        assert_eq!(spline.point(0.0).unwrap(), p(1.0, 1.0));
        assert_eq!(spline.add_anchor_point(p(2.0, 1.0)).unwrap(), 1);
    }

    #[test]
    fn add_anchor_rejected_when_closed() {
        let mut spline = square();
        assert!(matches!(
            spline.add_anchor_point(p(9.0, 9.0)),
            Err(CuglError::Spline(SplineError::ClosedSpline))
        ));
    }

    #[test]
    fn set_closed_appends_return_segment() {
        let spline = square();
        assert!(spline.is_closed());
        assert_eq!(spline.segment_count(), 4);
        assert_eq!(spline.anchor(0).unwrap(), spline.point(4.0).unwrap());

        let mut open = spline.clone();
        open.set_closed(false).unwrap();
        assert!(!open.is_closed());
        assert_eq!(open.anchor_count(), 5);
        assert!(CubicSpline::new().set_closed(true).is_err());
    }

    #[test]
    fn delete_interior_anchor() {
        let mut spline = square();
        spline.set_closed(false).unwrap();
        spline.delete_anchor(2).unwrap();
        assert_eq!(spline.anchor_count(), 4);
        assert_eq!(spline.segment_count(), 3);
        assert_eq!(spline.anchor(1).unwrap(), p(4.0, 0.0));
        assert_eq!(spline.anchor(2).unwrap(), p(0.0, 4.0));
    }

    #[test]
    fn delete_open_ends() {
        let mut spline = corner();
        spline.delete_anchor(0).unwrap();
        assert_eq!(spline.control_points()[0], p(3.0, 0.0));
        assert_eq!(spline.segment_count(), 1);
        assert!(spline.smooth(0).unwrap());

        let mut spline = corner();
        spline.delete_anchor(2).unwrap();
        assert_eq!(spline.control_points().len(), 4);
        assert_eq!(spline.anchor(1).unwrap(), p(3.0, 0.0));
        assert!(spline.smooth(1).unwrap());
    }

    #[test]
    fn delete_closed_first_anchor() {
        let mut spline = square();
        spline.delete_anchor(0).unwrap();
        assert!(spline.is_closed());
        assert_eq!(spline.anchor_count(), 3);
        assert_eq!(spline.anchor(0).unwrap(), p(4.0, 0.0));
        assert_eq!(spline.anchor(2).unwrap(), p(0.0, 4.0));
        assert_eq!(spline.point(3.0).unwrap(), p(4.0, 0.0));
    }

    #[test]
    fn delete_last_anchor_clears() {
        let mut spline = CubicSpline::from_point(p(1.0, 2.0));
        spline.delete_anchor(0).unwrap();
        assert!(spline.is_empty());
        assert!(!spline.is_closed());
    }

    #[test]
    fn insert_anchor_preserves_shape() {
        let before = corner();
        let mut spline = before.clone();
        spline.insert_anchor(0.25).unwrap();
        assert_eq!(spline.segment_count(), 3);
        assert_abs_diff_eq!(
            spline.anchor(1).unwrap(),
            before.point(0.25).unwrap(),
            epsilon = TOL
        );
        for i in 0..=8 {
            let u = f64::from(i) / 8.0;
            assert_abs_diff_eq!(
                spline.point(u).unwrap(),
                before.point(0.25 * u).unwrap(),
                epsilon = TOL
            );
            assert_abs_diff_eq!(
                spline.point(1.0 + u).unwrap(),
                before.point(0.25 + 0.75 * u).unwrap(),
                epsilon = TOL
            );
        }
        assert_abs_diff_eq!(
            spline.point(2.5).unwrap(),
            before.point(1.5).unwrap(),
            epsilon = TOL
        );
    }

    #[test]
    fn insert_anchor_rejects_anchors() {
        let mut spline = corner();
        assert!(spline.insert_anchor(1.0).is_err());
        assert!(spline.insert_anchor(2.0).is_err());
        assert!(spline.insert_anchor_in(0, 0.0).is_err());
        assert!(spline.insert_anchor_in(2, 0.5).is_err());
        assert_eq!(spline, corner());
    }

    #[test]
    fn set_point_between_anchors_inserts() {
        let mut spline = corner();
        spline.set_point(0.5, p(1.5, 2.0)).unwrap();
        assert_eq!(spline.anchor_count(), 4);
        assert_eq!(spline.anchor(1).unwrap(), p(1.5, 2.0));

        spline.set_point(0.0, p(-1.0, 0.0)).unwrap();
        assert_eq!(spline.anchor(0).unwrap(), p(-1.0, 0.0));
        assert_eq!(spline.anchor_count(), 4);
    }

    #[test]
    fn subdivide_control_list() {
        let src = corner().control_points().to_vec();
        let (left, right) = CubicSpline::subdivide(&src, 3, 0.5).unwrap();
        assert_eq!(left[0], p(3.0, 0.0));
        assert_eq!(right[3], p(6.0, 0.0));
        assert_eq!(left[3], right[0]);
        assert_abs_diff_eq!(left[3], corner().point(1.5).unwrap(), epsilon = TOL);

        assert!(CubicSpline::subdivide(&src, 4, 0.5).is_err());
        assert!(CubicSpline::subdivide(&src, 0, 1.5).is_err());
    }

    #[test]
    fn subdivide_segment_matches_list() {
        let spline = corner();
        let from_list = CubicSpline::subdivide(spline.control_points(), 0, 0.3).unwrap();
        assert_eq!(spline.subdivide_segment(0, 0.3).unwrap(), from_list);
        assert!(spline.subdivide_segment(2, 0.3).is_err());
    }
}
