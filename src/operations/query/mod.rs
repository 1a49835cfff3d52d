mod closest_point;
mod point_on_spline;

pub use closest_point::{ClosestPointOnSpline, ClosestPointResult};
pub use point_on_spline::PointOnSpline;
