//! Single-variable polynomials with real coefficients.
//!
//! Coefficients are stored from the highest degree down to the constant
//! term, so `[1, -1, 2, 0, -3]` is `x^4 - x^3 + 2x^2 - 3`.

mod ops;
mod roots;

pub use roots::{BairstowParams, Root};

use std::cmp::Ordering;
use std::fmt;

use crate::error::PolynomialError;

/// Operands must both exceed this degree before `*` switches from
/// [`Polynomial::iterative_multiply`] to [`Polynomial::recursive_multiply`].
pub const MULTIPLY_THRESHOLD: usize = 5;

/// A polynomial in one variable.
///
/// A polynomial is *valid* when it has a single coefficient, or when its
/// leading coefficient is nonzero. Arithmetic keeps results valid;
/// [`Polynomial::from_coefficients`] trusts the caller, and
/// [`Polynomial::validate`] restores the invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl Polynomial {
    /// The zero polynomial `[0]`.
    #[must_use]
    pub fn zero() -> Self {
        Self { coeffs: vec![0.0] }
    }

    /// The unit polynomial `[1]`.
    #[must_use]
    pub fn one() -> Self {
        Self { coeffs: vec![1.0] }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            coeffs: vec![value],
        }
    }

    /// The monomial `x^degree`.
    #[must_use]
    pub fn monomial(degree: usize) -> Self {
        let mut coeffs = vec![0.0; degree + 1];
        coeffs[0] = 1.0;
        Self { coeffs }
    }

    /// A polynomial of the given degree with every coefficient set to `value`.
    #[must_use]
    pub fn filled(degree: usize, value: f64) -> Self {
        Self {
            coeffs: vec![value; degree + 1],
        }
    }

    /// Creates a polynomial from coefficients ordered highest degree first.
    ///
    /// The coefficients are taken as given; call [`Polynomial::validate`]
    /// if they may carry leading zeros. An empty sequence is the zero
    /// polynomial.
    #[must_use]
    pub fn from_coefficients<I: IntoIterator<Item = f64>>(coeffs: I) -> Self {
        let coeffs: Vec<f64> = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            return Self::zero();
        }
        Self { coeffs }
    }

    /// Returns the degree (number of coefficients minus one).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns the number of coefficients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always false; a polynomial has at least one coefficient.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the coefficients, highest degree first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Iterates over the coefficients, highest degree first.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.coeffs.iter()
    }

    /// Returns the coefficient of the highest-degree term.
    #[must_use]
    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    /// Returns the constant term.
    #[must_use]
    pub fn constant_term(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns true if this polynomial has a single coefficient.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns true if this polynomial has no superfluous leading zeros.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.coeffs.len() == 1 || self.coeffs[0] != 0.0
    }

    /// Returns true if this is the zero polynomial `[0]`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == 0.0
    }

    /// Evaluates the polynomial at `x` using Horner's rule.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// Returns the derivative.
    ///
    /// The derivative has degree one less than this polynomial; the
    /// derivative of a constant is the zero polynomial.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let n = self.coeffs.len();
        if n == 1 {
            return Self::zero();
        }
        #[allow(clippy::cast_precision_loss)]
        let coeffs = self.coeffs[..n - 1]
            .iter()
            .enumerate()
            .map(|(i, c)| c * (n - 1 - i) as f64)
            .collect();
        Self { coeffs }
    }

    /// Trims leading zero coefficients, keeping at least one.
    pub fn validate(&mut self) {
        let first = self
            .coeffs
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(self.coeffs.len() - 1);
        self.coeffs.drain(..first);
    }

    /// Divides through by the leading coefficient, making this polynomial
    /// monic. Returns the divisor.
    ///
    /// # Errors
    ///
    /// Returns an error if the leading coefficient is zero.
    pub fn normalize(&mut self) -> Result<f64, PolynomialError> {
        let lead = self.coeffs[0];
        if lead == 0.0 {
            return Err(PolynomialError::ZeroLeadingCoefficient);
        }
        for c in &mut self.coeffs {
            *c /= lead;
        }
        Ok(lead)
    }

    /// Multiplies two polynomials with a nested convolution loop.
    ///
    /// This is O(nm), but has the least overhead for small polynomials.
    #[must_use]
    pub fn iterative_multiply(a: &Self, b: &Self) -> Self {
        let mut coeffs = vec![0.0; a.coeffs.len() + b.coeffs.len() - 1];
        for (i, bc) in b.coeffs.iter().enumerate() {
            for (j, ac) in a.coeffs.iter().enumerate() {
                coeffs[i + j] += ac * bc;
            }
        }
        Self { coeffs }
    }

    /// Multiplies two polynomials by Karatsuba divide and conquer.
    ///
    /// Three half-size products per level give O(n^1.585) in the larger
    /// degree. The recursion overhead makes this slower than
    /// [`Polynomial::iterative_multiply`] below [`MULTIPLY_THRESHOLD`].
    #[must_use]
    pub fn recursive_multiply(a: &Self, b: &Self) -> Self {
        Self {
            coeffs: karatsuba(&a.coeffs, &b.coeffs),
        }
    }

    /// Performs generalized synthetic division by `divisor`.
    ///
    /// The resulting buffer holds the quotient as its prefix and the
    /// remainder as its suffix, and normally has this polynomial's length.
    /// If the divisor has a higher degree, the buffer is one entry longer: a
    /// single zero quotient followed by this polynomial as the remainder.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor is invalid or zero.
    pub fn synthetic_divide(&self, divisor: &Self) -> Result<SyntheticDivision, PolynomialError> {
        divisor.check_divisor()?;
        if divisor.coeffs.len() > self.coeffs.len() {
            let mut buffer = Vec::with_capacity(self.coeffs.len() + 1);
            buffer.push(0.0);
            buffer.extend_from_slice(&self.coeffs);
            return Ok(SyntheticDivision { buffer, split: 1 });
        }

        let mut buffer = self.coeffs.clone();
        let normalizer = divisor.coeffs[0];
        let cols = self.coeffs.len() - divisor.coeffs.len() + 1;
        for i in 0..cols {
            buffer[i] /= normalizer;
            let coef = buffer[i];
            if coef != 0.0 {
                for (j, d) in divisor.coeffs.iter().enumerate().skip(1) {
                    buffer[i + j] -= d * coef;
                }
            }
        }
        Ok(SyntheticDivision {
            buffer,
            split: cols,
        })
    }

    /// Returns the quotient and remainder of dividing by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor is invalid or zero.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let division = self.synthetic_divide(divisor)?;
        Ok((division.quotient(), division.remainder()))
    }

    /// Returns the quotient of dividing by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor is invalid or zero.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        Ok(self.synthetic_divide(divisor)?.quotient())
    }

    /// Returns the remainder of dividing by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor is invalid or zero.
    pub fn checked_rem(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        Ok(self.synthetic_divide(divisor)?.remainder())
    }

    /// Divides every coefficient by `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is zero.
    pub fn checked_div_scalar(&self, value: f64) -> Result<Self, PolynomialError> {
        if value == 0.0 {
            return Err(PolynomialError::DivisionByZero);
        }
        Ok(Self {
            coeffs: self.coeffs.iter().map(|c| c / value).collect(),
        })
    }

    /// Formats the coefficients as a list, e.g. `[1,-1,2,0,-3]`.
    #[must_use]
    pub fn to_coefficient_string(&self) -> String {
        let parts: Vec<String> = self.coeffs.iter().map(ToString::to_string).collect();
        format!("[{}]", parts.join(","))
    }

    fn check_divisor(&self) -> Result<(), PolynomialError> {
        if !self.is_valid() {
            return Err(PolynomialError::InvalidDivisor(self.to_coefficient_string()));
        }
        if self.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }
        Ok(())
    }
}

/// The in-place result of synthetic division: quotient followed by
/// remainder in a single buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDivision {
    buffer: Vec<f64>,
    split: usize,
}

impl SyntheticDivision {
    /// Returns the raw buffer (quotient prefix, remainder suffix).
    #[must_use]
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    /// Returns the number of leading buffer entries holding the quotient.
    #[must_use]
    pub fn split(&self) -> usize {
        self.split
    }

    /// Returns the quotient.
    #[must_use]
    pub fn quotient(&self) -> Polynomial {
        let mut quotient = Polynomial::from_coefficients(self.buffer[..self.split].iter().copied());
        quotient.validate();
        quotient
    }

    /// Returns the remainder. A constant divisor leaves the zero remainder.
    #[must_use]
    pub fn remainder(&self) -> Polynomial {
        let mut remainder =
            Polynomial::from_coefficients(self.buffer[self.split..].iter().copied());
        remainder.validate();
        remainder
    }
}

/// Convolves two coefficient sequences by Karatsuba splitting.
///
/// Convolution does not depend on coefficient order, so this works on the
/// highest-degree-first layout directly.
fn karatsuba(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    if a.len() == 1 {
        return b.iter().map(|c| c * a[0]).collect();
    }
    if b.len() == 1 {
        return a.iter().map(|c| c * b[0]).collect();
    }

    let half = a.len().max(b.len()) / 2;
    let (a0, a1) = a.split_at(half.min(a.len()));
    let (b0, b1) = b.split_at(half.min(b.len()));

    let low = karatsuba(a0, b0);
    let high = karatsuba(a1, b1);
    let mut mid = karatsuba(&add_slices(a0, a1), &add_slices(b0, b1));
    for (m, l) in mid.iter_mut().zip(&low) {
        *m -= l;
    }
    for (m, h) in mid.iter_mut().zip(&high) {
        *m -= h;
    }

    let mut result = vec![0.0; a.len() + b.len() - 1];
    accumulate(&mut result, &low, 0);
    accumulate(&mut result, &mid, half);
    accumulate(&mut result, &high, 2 * half);
    result
}

fn add_slices(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut sum = vec![0.0; a.len().max(b.len())];
    for (s, v) in sum.iter_mut().zip(a) {
        *s += v;
    }
    for (s, v) in sum.iter_mut().zip(b) {
        *s += v;
    }
    sum
}

// Entries past the end of `target` are cancellation residue and dropped.
fn accumulate(target: &mut [f64], values: &[f64], offset: usize) {
    if let Some(tail) = target.get_mut(offset..) {
        for (t, v) in tail.iter_mut().zip(values) {
            *t += v;
        }
    }
}

impl std::ops::Index<usize> for Polynomial {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coeffs[index]
    }
}

impl<'a> IntoIterator for &'a Polynomial {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.coeffs.iter()
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::from_coefficients(coeffs)
    }
}

impl FromIterator<f64> for Polynomial {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_coefficients(iter)
    }
}

/// Polynomials order by degree first, then coefficient by coefficient from
/// the highest degree. This is a sorting order, not a numeric one.
impl PartialOrd for Polynomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.coeffs.len().cmp(&other.coeffs.len()) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        for (a, b) in self.coeffs.iter().zip(&other.coeffs) {
            match a.partial_cmp(b)? {
                Ordering::Equal => {}
                ord => return Some(ord),
            }
        }
        Some(Ordering::Equal)
    }
}

impl PartialEq<f64> for Polynomial {
    fn eq(&self, other: &f64) -> bool {
        self.is_constant() && self.coeffs[0] == *other
    }
}

/// A non-constant polynomial is greater than every scalar.
impl PartialOrd<f64> for Polynomial {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if self.is_constant() {
            self.coeffs[0].partial_cmp(other)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.coeffs.len();
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = n - 1 - i;
            if c > 0.0 && !first {
                f.write_str("+")?;
            }
            if power == 0 || (c != 1.0 && c != -1.0) {
                write!(f, "{c}")?;
            } else if c == -1.0 {
                f.write_str("-")?;
            }
            match power {
                0 => {}
                1 => f.write_str("x")?,
                _ => write!(f, "x^{power}")?,
            }
            first = false;
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}
