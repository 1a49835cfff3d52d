pub mod curve;
pub mod spline;

pub use curve::{Curve, CurveDomain};
pub use spline::CubicSpline;
