use tracing::{debug, trace};

use super::Polynomial;
use crate::error::PolynomialError;
use crate::math::EPSILON;

/// A root of a real polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    /// A real root.
    Real(f64),
    /// One member of a complex-conjugate pair.
    Complex { re: f64, im: f64 },
}

impl Root {
    /// Returns the value of a real root, or `None` for a complex one.
    #[must_use]
    pub fn real(self) -> Option<f64> {
        match self {
            Root::Real(value) => Some(value),
            Root::Complex { .. } => None,
        }
    }

    /// Returns true for a real root.
    #[must_use]
    pub fn is_real(self) -> bool {
        matches!(self, Root::Real(_))
    }

    /// Encodes the root as a float, with NaN standing in for complex roots.
    #[must_use]
    pub fn as_nan_sentinel(self) -> f64 {
        self.real().unwrap_or(f64::NAN)
    }
}

/// Parameters controlling Bairstow's method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BairstowParams {
    /// Convergence bound on the Newton update of the quadratic factor.
    pub epsilon: f64,
    /// Newton iterations allowed per initial guess.
    pub max_iterations: usize,
    /// Consecutive failed initial guesses before giving up.
    pub max_attempts: usize,
}

impl Default for BairstowParams {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            max_iterations: 100,
            max_attempts: 10,
        }
    }
}

impl BairstowParams {
    /// Default parameters with the given tolerance.
    #[must_use]
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }
}

impl Polynomial {
    /// Computes the roots with Bairstow's method using default iteration
    /// limits.
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::RootsNotFound`] if a quadratic factor
    /// cannot be extracted.
    pub fn roots(&self, epsilon: f64) -> Result<Vec<Root>, PolynomialError> {
        self.roots_with(&BairstowParams::with_epsilon(epsilon))
    }

    /// Computes the roots with Bairstow's method.
    ///
    /// Quadratic factors are split off one at a time by Newton iteration on
    /// the remainder of dividing by the current guess, until at most a
    /// quadratic is left. Each factor is solved with the quadratic formula.
    /// On success the result holds `degree()` roots; constant polynomials
    /// (including zero) have none.
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::RootsNotFound`], carrying the roots found
    /// so far, if `max_attempts` consecutive guesses fail to converge.
    pub fn roots_with(&self, params: &BairstowParams) -> Result<Vec<Root>, PolynomialError> {
        let mut work = self.clone();
        work.validate();
        let mut roots = Vec::with_capacity(work.degree());
        if work.is_constant() {
            return Ok(roots);
        }

        while work.coeffs.len() > 1 && work.constant_term() == 0.0 {
            roots.push(Root::Real(0.0));
            work.coeffs.pop();
        }
        work.normalize()?;

        // Lowest degree first from here on.
        let mut low: Vec<f64> = work.coeffs.iter().rev().copied().collect();
        let mut attempts = 0;
        let mut seed = 0;
        while low.len() > 3 {
            if attempts >= params.max_attempts {
                debug!(
                    degree = low.len() - 1,
                    attempts, "bairstow's method did not converge"
                );
                return Err(PolynomialError::RootsNotFound {
                    found: roots,
                    unresolved: low.len() - 1,
                });
            }
            // First guess per factor in [0, 1), retries over the root bound.
            let radius = (attempts > 0).then(|| root_bound(&low));
            let guess = initial_guess(seed, radius);
            seed += 1;
            if let Some(factor) = extract_quadratic(&low, guess, params) {
                solve_quadratic(1.0, factor.u, factor.v, &mut roots);
                low = factor.quotient;
                attempts = 0;
            } else {
                trace!(seed, "bairstow guess rejected");
                attempts += 1;
            }
        }

        match low.len() {
            3 => solve_quadratic(low[2], low[1], low[0], &mut roots),
            2 => roots.push(Root::Real(-low[0] / low[1])),
            _ => {}
        }
        Ok(roots)
    }
}

/// A converged factor `x^2 + u x + v` and the deflated quotient.
struct QuadraticFactor {
    u: f64,
    v: f64,
    quotient: Vec<f64>,
}

/// Initial factor `(x - a)(x - b)` with `a, b` walking `[0, 1)` along
/// golden-ratio sequences, so retries never repeat. With a `radius` the
/// walk is stretched over `[-radius, radius)`.
#[allow(clippy::cast_precision_loss)]
fn initial_guess(seed: usize, radius: Option<f64>) -> (f64, f64) {
    let k = seed as f64;
    let mut a = (0.5 + k * 0.618_033_988_749_895).fract();
    let mut b = (0.25 + k * 0.754_877_666_246_692_7).fract();
    if let Some(r) = radius {
        a = r * (2.0 * a - 1.0);
        b = r * (2.0 * b - 1.0);
    }
    (-(a + b), a * b)
}

/// Cauchy bound on the root magnitudes of a monic polynomial, lowest degree
/// first.
fn root_bound(monic: &[f64]) -> f64 {
    let lower = monic.split_last().map_or(&[][..], |(_, rest)| rest);
    1.0 + lower.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
}

/// Newton iteration on the remainder `c x + d` of dividing `p` (lowest
/// degree first) by `x^2 + u x + v`. Returns `None` on a singular Jacobian,
/// a non-finite step, or running out of iterations.
fn extract_quadratic(
    p: &[f64],
    (mut u, mut v): (f64, f64),
    params: &BairstowParams,
) -> Option<QuadraticFactor> {
    for _ in 0..params.max_iterations {
        let (quotient, c, d) = divide_quadratic(p, u, v);
        if c == 0.0 && d == 0.0 {
            return Some(QuadraticFactor { u, v, quotient });
        }
        let (_, g, h) = divide_quadratic(&quotient, u, v);

        let det = v * g * g + h * (h - u * g);
        if det == 0.0 {
            return None;
        }
        let du = (g * d - h * c) / det;
        let dv = ((g * u - h) * d - g * v * c) / det;
        u -= du;
        v -= dv;
        if !u.is_finite() || !v.is_finite() {
            return None;
        }

        if du.abs() < params.epsilon && dv.abs() < params.epsilon {
            let (quotient, _, _) = divide_quadratic(p, u, v);
            return Some(QuadraticFactor { u, v, quotient });
        }
    }
    None
}

/// Divides `p` (lowest degree first) by `x^2 + u x + v`, returning the
/// quotient and the remainder `c x + d`.
fn divide_quadratic(p: &[f64], u: f64, v: f64) -> (Vec<f64>, f64, f64) {
    let n = p.len();
    let mut b = vec![0.0; n.saturating_sub(2)];
    for i in (0..b.len()).rev() {
        let b1 = b.get(i + 1).copied().unwrap_or(0.0);
        let b2 = b.get(i + 2).copied().unwrap_or(0.0);
        b[i] = p[i + 2] - u * b1 - v * b2;
    }
    let b0 = b.first().copied().unwrap_or(0.0);
    let b1 = b.get(1).copied().unwrap_or(0.0);
    let c = p.get(1).copied().unwrap_or(0.0) - u * b0 - v * b1;
    let d = p.first().copied().unwrap_or(0.0) - v * b0;
    (b, c, d)
}

/// Appends both roots of `a x^2 + b x + c`, using the cancellation-free
/// form of the quadratic formula.
fn solve_quadratic(a: f64, b: f64, c: f64, roots: &mut Vec<Root>) {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a).abs();
        roots.push(Root::Complex { re, im });
        roots.push(Root::Complex { re, im: -im });
        return;
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        roots.push(Root::Real(0.0));
        roots.push(Root::Real(0.0));
    } else {
        roots.push(Root::Real(q / a));
        roots.push(Root::Real(c / q));
    }
}
