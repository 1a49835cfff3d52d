pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{CuglError, Result};
pub use geometry::spline::CubicSpline;
pub use math::polynomial::{Polynomial, Root};
