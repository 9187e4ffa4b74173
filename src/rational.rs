//! Canonical rational numbers (numerator/denominator, denominator > 0,
//! `gcd(|num|, den) == 1`), backed by [`num_rational::BigRational`] which
//! already maintains that canonical form on every operation.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::integer::Integer;

/// A canonical arbitrary-precision rational number.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// Builds `num / den`; panics (debug) if `den == 0`.
    pub fn new(num: Integer, den: Integer) -> Self {
        debug_assert!(!den.is_zero(), "Rational: zero denominator");
        Rational(BigRational::new(num.as_bigint().clone(), den.as_bigint().clone()))
    }

    /// Builds a rational equal to the given integer.
    pub fn from_integer(n: Integer) -> Self {
        Rational(BigRational::from_integer(n.as_bigint().clone()))
    }

    /// The rational zero.
    pub fn zero() -> Self {
        Rational(BigRational::from_integer(BigInt::zero()))
    }

    /// True iff this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True iff this value is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// True iff this value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Numerator (sign-carrying); denominator is always positive.
    pub fn numer(&self) -> Integer {
        Integer::from_bigint(self.0.numer().clone())
    }

    /// Denominator (always strictly positive).
    pub fn denom(&self) -> Integer {
        Integer::from_bigint(self.0.denom().clone())
    }

    /// Smallest integer `>= self`.
    pub fn round_up(&self) -> Integer {
        let num = self.0.numer();
        let den = self.0.denom();
        let (q, r) = num_integer::Integer::div_mod_floor(num, den);
        if r.is_zero() {
            Integer::from_bigint(q)
        } else {
            Integer::from_bigint(q + 1)
        }
    }

    /// Largest integer `<= self`.
    pub fn round_down(&self) -> Integer {
        let num = self.0.numer();
        let den = self.0.denom();
        Integer::from_bigint(num_integer::Integer::div_floor(num, den))
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}
impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        Rational(self.0 + rhs.0)
    }
}
impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        Rational(self.0 - rhs.0)
    }
}
impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        Rational(self.0 * rhs.0)
    }
}

impl PartialOrd<i64> for Rational {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.0.partial_cmp(&BigRational::from_integer(BigInt::from(*other)))
    }
}
impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.0 == BigRational::from_integer(BigInt::from(*other))
    }
}

/// Least common multiple of the denominators of `rs`, as used when
/// converting a vector of rationals back to an integer row (e.g. when
/// reading an H/V-style `real`/rational row into a strong-normalized
/// `Con`/`Gen`).
pub fn lcm_dens(rs: &[Rational]) -> Integer {
    let mut l = Integer::one();
    for r in rs {
        l = Integer::lcm(&l, &r.denom());
    }
    l
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        let r = Rational::new(Integer::from_i64(6), Integer::from_i64(-4));
        assert_eq!(r.numer(), Integer::from_i64(-3));
        assert_eq!(r.denom(), Integer::from_i64(2));
    }

    #[test]
    fn round_up_down() {
        let r = Rational::new(Integer::from_i64(7), Integer::from_i64(2));
        assert_eq!(r.round_up(), Integer::from_i64(4));
        assert_eq!(r.round_down(), Integer::from_i64(3));
        let neg = Rational::new(Integer::from_i64(-7), Integer::from_i64(2));
        assert_eq!(neg.round_up(), Integer::from_i64(-3));
        assert_eq!(neg.round_down(), Integer::from_i64(-4));
    }

    #[test]
    fn lcm_of_denoms() {
        let rs = vec![
            Rational::new(Integer::from_i64(1), Integer::from_i64(2)),
            Rational::new(Integer::from_i64(1), Integer::from_i64(3)),
        ];
        assert_eq!(lcm_dens(&rs), Integer::from_i64(6));
    }
}
