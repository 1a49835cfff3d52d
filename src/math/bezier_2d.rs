//! 2D cubic Bézier math utilities.
//!
//! A segment is four control points `[p0, p1, p2, p3]`: the start anchor,
//! its tangent, the end tangent, and the end anchor. The curve is the
//! Bernstein blend
//!
//! `B(t) = (1-t)^3 p0 + 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3 p3`
//!
//! for `t` in `[0, 1]`.

use super::{Point2, Vector2};

/// Evaluates the segment at parameter `t`.
#[must_use]
pub fn bezier_point(p: &[Point2; 4], t: f64) -> Point2 {
    let s = 1.0 - t;
    let a = s * s * s;
    let b = 3.0 * s * s * t;
    let c = 3.0 * s * t * t;
    let d = t * t * t;
    Point2::from(p[0].coords * a + p[1].coords * b + p[2].coords * c + p[3].coords * d)
}

/// Returns the (non-normalized) derivative `B'(t)`.
#[must_use]
pub fn bezier_derivative(p: &[Point2; 4], t: f64) -> Vector2 {
    let s = 1.0 - t;
    (p[1] - p[0]) * (3.0 * s * s) + (p[2] - p[1]) * (6.0 * s * t) + (p[3] - p[2]) * (3.0 * t * t)
}

/// Splits a segment at `t` with de Casteljau's algorithm.
///
/// Returns the control points of the pieces covering `[0, t]` and `[t, 1]`.
/// The two share the split point: `left[3] == right[0]`.
#[must_use]
pub fn subdivide(p: &[Point2; 4], t: f64) -> ([Point2; 4], [Point2; 4]) {
    let p01 = p[0].lerp(&p[1], t);
    let p12 = p[1].lerp(&p[2], t);
    let p23 = p[2].lerp(&p[3], t);

    let p012 = p01.lerp(&p12, t);
    let p123 = p12.lerp(&p23, t);

    let mid = p012.lerp(&p123, t);

    ([p[0], p01, p012, mid], [mid, p123, p23, p[3]])
}

/// Expands one coordinate of a segment into power-basis coefficients,
/// highest degree first.
///
/// `x(t) = (-p0 + 3p1 - 3p2 + p3) t^3 + (3p0 - 6p1 + 3p2) t^2 + (3p1 - 3p0) t + p0`
#[must_use]
pub fn power_coefficients(p0: f64, p1: f64, p2: f64, p3: f64) -> [f64; 4] {
    [
        -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        3.0 * p0 - 6.0 * p1 + 3.0 * p2,
        3.0 * (p1 - p0),
        p0,
    ]
}

/// Returns the coefficients (highest degree first) of the projection
/// polynomial `(B(t) - q) · B'(t)`.
///
/// Its roots are the parameters where the segment is locally nearest to
/// (or farthest from) `q`. Writing `B(t) = a t^3 + b t^2 + c t + p0`:
///
/// ```text
/// t^5: 3 a·a
/// t^4: 5 a·b
/// t^3: 4 a·c + 2 b·b
/// t^2: 3 b·c + 3 a·(p0 - q)
/// t^1: c·c + 2 b·(p0 - q)
/// t^0: c·(p0 - q)
/// ```
#[must_use]
pub fn projection_coefficients(p: &[Point2; 4], q: &Point2) -> [f64; 6] {
    let a = (p[3] - p[0]) + (p[1] - p[2]) * 3.0;
    let b = ((p[2] - p[1]) - (p[1] - p[0])) * 3.0;
    let c = (p[1] - p[0]) * 3.0;
    let d = p[0] - q;

    [
        3.0 * a.dot(&a),
        5.0 * a.dot(&b),
        4.0 * a.dot(&c) + 2.0 * b.dot(&b),
        3.0 * b.dot(&c) + 3.0 * a.dot(&d),
        c.dot(&c) + 2.0 * b.dot(&d),
        c.dot(&d),
    ]
}
