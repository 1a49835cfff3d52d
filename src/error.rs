use thiserror::Error;

use crate::math::polynomial::Root;

/// Top-level error type for the CUGL math library.
#[derive(Debug, Error)]
pub enum CuglError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Polynomial(#[from] PolynomialError),

    #[error(transparent)]
    Spline(#[from] SplineError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to polynomial arithmetic and root finding.
#[derive(Debug, Error)]
pub enum PolynomialError {
    #[error("division by invalid polynomial {0}")]
    InvalidDivisor(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("polynomial has a zero leading coefficient")]
    ZeroLeadingCoefficient,

    /// Bairstow's method gave up. `found` holds the roots resolved before
    /// the failure; the remaining `unresolved` roots are unknown.
    #[error("root finding did not converge ({unresolved} roots unresolved)")]
    RootsNotFound { found: Vec<Root>, unresolved: usize },
}

/// Errors related to spline construction and editing.
#[derive(Debug, Error)]
pub enum SplineError {
    #[error("{kind} index {index} is out of range (count {count})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("segment {segment} is out of range (spline has {size} segments)")]
    SegmentOutOfRange { segment: usize, size: usize },

    #[error("cannot append an anchor to a closed spline")]
    ClosedSpline,

    #[error("control point buffer of length {len} must be {modulus}k + {remainder}")]
    MalformedControlPoints {
        len: usize,
        modulus: usize,
        remainder: usize,
    },

    #[error("spline has no control points")]
    Empty,
}

/// Convenience type alias for results using [`CuglError`].
pub type Result<T> = std::result::Result<T, CuglError>;
