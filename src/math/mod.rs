pub mod bezier_2d;
pub mod polynomial;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default error tolerance for approximate numerical methods such as
/// root finding.
pub const EPSILON: f64 = 5e-4;
