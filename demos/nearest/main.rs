//! Nearest-point demo for `CubicSpline`.
//!
//! Builds a small S-shaped spline, edits it, and projects a handful of query
//! points onto it.
//!
//! Usage:
//! ```text
//! cargo run --example nearest
//! RUST_LOG=cugl_math=debug cargo run --example nearest   # root finder fallbacks
//! ```

use cugl_math::geometry::Curve;
use cugl_math::math::Point2;
use cugl_math::operations::query::{ClosestPointOnSpline, PointOnSpline};
use cugl_math::{CubicSpline, CuglError, Polynomial};
use tracing::info;

fn main() -> Result<(), CuglError> {
    // Default: WARN for everything, INFO for the demo and the library.
    // Override with RUST_LOG env var (e.g. RUST_LOG=cugl_math=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("nearest=info".parse().unwrap_or_default())
        .add_directive("cugl_math=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut spline = CubicSpline::from_points(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 3.0),
        Point2::new(4.0, 3.0),
        Point2::new(5.0, 0.0),
    ])?;
    spline.add_anchor(Point2::new(10.0, 0.0), Point2::new(9.0, -3.0))?;
    spline.insert_anchor(0.5)?;
    info!(
        segments = spline.segment_count(),
        anchors = spline.anchor_count(),
        "built spline"
    );

    let domain = spline.domain();
    for i in 0..=4 {
        let t = domain.t_min + (domain.t_max - domain.t_min) * f64::from(i) / 4.0;
        let p = PointOnSpline::new(t).execute(&spline)?;
        info!(t, x = p.x, y = p.y, "sample");
    }

    for query in [
        Point2::new(2.5, 5.0),
        Point2::new(7.5, -5.0),
        Point2::new(12.0, 1.0),
    ] {
        let result = ClosestPointOnSpline::new(query).execute(&spline)?;
        info!(
            qx = query.x,
            qy = query.y,
            parameter = result.parameter,
            distance = result.distance,
            "closest point"
        );
    }

    let x = spline.polynomial_x(0)?;
    info!(segment = 0, polynomial = %x, "x(t)");

    let cubic = Polynomial::from_coefficients([1.0, -6.0, 11.0, -6.0]);
    let roots = cubic.roots(1e-9)?;
    info!(polynomial = %cubic, ?roots, "roots");

    Ok(())
}
