//! Arithmetic operators for [`Polynomial`].
//!
//! Division operators panic on an invalid or zero divisor, the way integer
//! division panics on zero. Use [`Polynomial::div_rem`],
//! [`Polynomial::checked_div`] or [`Polynomial::checked_rem`] to get a
//! `Result` instead.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use super::{Polynomial, MULTIPLY_THRESHOLD};

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        self.pad_to(rhs.coeffs.len());
        let offset = self.coeffs.len() - rhs.coeffs.len();
        for (c, r) in self.coeffs[offset..].iter_mut().zip(&rhs.coeffs) {
            *c += r;
        }
        self.validate();
    }
}

impl SubAssign<&Polynomial> for Polynomial {
    fn sub_assign(&mut self, rhs: &Polynomial) {
        self.pad_to(rhs.coeffs.len());
        let offset = self.coeffs.len() - rhs.coeffs.len();
        for (c, r) in self.coeffs[offset..].iter_mut().zip(&rhs.coeffs) {
            *c -= r;
        }
        self.validate();
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let recursive = self.degree() > MULTIPLY_THRESHOLD && rhs.degree() > MULTIPLY_THRESHOLD;
        let mut product = if recursive {
            Polynomial::recursive_multiply(self, rhs)
        } else {
            Polynomial::iterative_multiply(self, rhs)
        };
        product.validate();
        product
    }
}

impl MulAssign<&Polynomial> for Polynomial {
    fn mul_assign(&mut self, rhs: &Polynomial) {
        *self = &*self * rhs;
    }
}

/// # Panics
///
/// Panics if the divisor is invalid or the zero polynomial.
impl Div<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn div(self, rhs: &Polynomial) -> Polynomial {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("{err}"),
        }
    }
}

impl DivAssign<&Polynomial> for Polynomial {
    fn div_assign(&mut self, rhs: &Polynomial) {
        *self = &*self / rhs;
    }
}

/// # Panics
///
/// Panics if the divisor is invalid or the zero polynomial.
impl Rem<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn rem(self, rhs: &Polynomial) -> Polynomial {
        match self.checked_rem(rhs) {
            Ok(remainder) => remainder,
            Err(err) => panic!("{err}"),
        }
    }
}

impl RemAssign<&Polynomial> for Polynomial {
    fn rem_assign(&mut self, rhs: &Polynomial) {
        *self = &*self % rhs;
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

/// Derives the owned-operand forms of a binary operator from the
/// reference form.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl $imp<Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                (&self).$method(rhs)
            }
        }

        impl $imp<Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                self.$method(&rhs)
            }
        }

        impl $assign<Polynomial> for Polynomial {
            fn $assign_method(&mut self, rhs: Polynomial) {
                self.$assign_method(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

// ── scalar operands ──

impl AddAssign<f64> for Polynomial {
    fn add_assign(&mut self, rhs: f64) {
        if let Some(last) = self.coeffs.last_mut() {
            *last += rhs;
        }
    }
}

impl SubAssign<f64> for Polynomial {
    fn sub_assign(&mut self, rhs: f64) {
        if let Some(last) = self.coeffs.last_mut() {
            *last -= rhs;
        }
    }
}

impl MulAssign<f64> for Polynomial {
    fn mul_assign(&mut self, rhs: f64) {
        if rhs == 0.0 {
            *self = Polynomial::zero();
        } else {
            for c in &mut self.coeffs {
                *c *= rhs;
            }
        }
    }
}

/// # Panics
///
/// Panics if `rhs` is zero.
impl DivAssign<f64> for Polynomial {
    fn div_assign(&mut self, rhs: f64) {
        match self.checked_div_scalar(rhs) {
            Ok(quotient) => *self = quotient,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Any polynomial divides evenly by a nonzero scalar, so the remainder is
/// always zero.
///
/// # Panics
///
/// Panics if `rhs` is zero.
impl RemAssign<f64> for Polynomial {
    fn rem_assign(&mut self, rhs: f64) {
        assert!(rhs != 0.0, "division by zero");
        *self = Polynomial::zero();
    }
}

macro_rules! scalar_binop {
    ($imp:ident, $method:ident, $assign_method:ident) => {
        impl $imp<f64> for Polynomial {
            type Output = Polynomial;

            fn $method(mut self, rhs: f64) -> Polynomial {
                self.$assign_method(rhs);
                self
            }
        }

        impl $imp<f64> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: f64) -> Polynomial {
                self.clone().$method(rhs)
            }
        }
    };
}

scalar_binop!(Add, add, add_assign);
scalar_binop!(Sub, sub, sub_assign);
scalar_binop!(Mul, mul, mul_assign);
scalar_binop!(Div, div, div_assign);
scalar_binop!(Rem, rem, rem_assign);

impl Add<&Polynomial> for f64 {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        rhs + self
    }
}

impl Sub<&Polynomial> for f64 {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        -rhs + self
    }
}

impl Mul<&Polynomial> for f64 {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        rhs * self
    }
}

/// The quotient is zero unless the polynomial is constant.
///
/// # Panics
///
/// Panics if `rhs` is invalid or the zero polynomial.
impl Div<&Polynomial> for f64 {
    type Output = Polynomial;

    fn div(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::constant(self) / rhs
    }
}

/// The remainder is `self` unless the polynomial is constant.
///
/// # Panics
///
/// Panics if `rhs` is invalid or the zero polynomial.
impl Rem<&Polynomial> for f64 {
    type Output = Polynomial;

    fn rem(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::constant(self) % rhs
    }
}

impl Polynomial {
    /// Pads the high-degree end with zeros up to `len` coefficients.
    fn pad_to(&mut self, len: usize) {
        if len > self.coeffs.len() {
            let extra = len - self.coeffs.len();
            self.coeffs.splice(0..0, std::iter::repeat_n(0.0, extra));
        }
    }
}
