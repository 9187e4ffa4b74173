//! Arbitrary-precision signed integers.
//!
//! [`Integer`] is a thin wrapper around [`num_bigint::BigInt`] providing the
//! small set of operations the rest of the crate needs: addition,
//! multiplication, exact division, gcd/lcm, sign and comparison. There is no
//! representation of infinity; every [`Integer`] is a finite value and zero
//! is unique (`BigInt`'s `Zero` impl already guarantees this).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

/// An arbitrary-precision signed integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// The integer zero.
    pub fn zero() -> Self {
        Integer(BigInt::zero())
    }

    /// The integer one.
    pub fn one() -> Self {
        Integer(BigInt::one())
    }

    /// Builds an `Integer` from any type convertible to `i64`.
    pub fn from_i64(v: i64) -> Self {
        Integer(BigInt::from(v))
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

    /// -1, 0 or 1 according to the sign of `self`.
    pub fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Integer(self.0.abs())
    }

    /// In-place negation.
    pub fn neg_assign(&mut self) {
        self.0 = -std::mem::replace(&mut self.0, BigInt::zero());
    }

    /// Greatest common divisor of `x` and `y` (always non-negative).
    pub fn gcd(x: &Integer, y: &Integer) -> Integer {
        Integer(x.0.gcd(&y.0))
    }

    /// Least common multiple of `x` and `y` (always non-negative).
    pub fn lcm(x: &Integer, y: &Integer) -> Integer {
        Integer(x.0.lcm(&y.0))
    }

    /// Exact division: requires `y` divides `x` (i.e. `x % y == 0`).
    ///
    /// # Panics
    /// In debug builds, panics if the division is not exact; this is a
    /// precondition violation per the error-handling design (programming
    /// bug, not a recoverable error).
    pub fn exact_div(x: &Integer, y: &Integer) -> Integer {
        debug_assert!(!y.is_zero(), "exact_div by zero");
        debug_assert!(
            (&x.0 % &y.0).is_zero(),
            "exact_div: {} does not divide {}",
            y.0,
            x.0
        );
        Integer(&x.0 / &y.0)
    }

    /// Truncating division remainder, as used by `exact_div`'s precondition
    /// check and by integral-split arithmetic.
    pub fn rem(&self, y: &Integer) -> Integer {
        Integer(&self.0 % &y.0)
    }

    /// Floor division (rounds towards negative infinity).
    pub fn div_floor(&self, y: &Integer) -> Integer {
        Integer(self.0.div_floor(&y.0))
    }

    /// Ceiling division (rounds towards positive infinity).
    pub fn div_ceil(&self, y: &Integer) -> Integer {
        let (q, r) = self.0.div_mod_floor(&y.0);
        if r.is_zero() {
            Integer(q)
        } else {
            Integer(q + BigInt::one())
        }
    }

    /// Converts to `i64` when representable.
    pub fn to_i64(&self) -> Option<i64> {
        use num_traits::ToPrimitive;
        self.0.to_i64()
    }

    /// Reference to the underlying `BigInt`, for interop with `Rational`.
    pub(crate) fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub(crate) fn from_bigint(v: BigInt) -> Self {
        Integer(v)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Integer::from_i64(v)
    }
}
impl From<i32> for Integer {
    fn from(v: i32) -> Self {
        Integer::from_i64(v as i64)
    }
}

impl Neg for Integer {
    type Output = Integer;
    fn neg(mut self) -> Integer {
        self.neg_assign();
        self
    }
}
impl Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Integer {
            type Output = Integer;
            fn $method(self, rhs: Integer) -> Integer {
                Integer(&self.0 $op &rhs.0)
            }
        }
        impl $trait for &Integer {
            type Output = Integer;
            fn $method(self, rhs: &Integer) -> Integer {
                Integer(&self.0 $op &rhs.0)
            }
        }
    };
}
forward_binop!(Add, add, +);
forward_binop!(Sub, sub, -);
forward_binop!(Mul, mul, *);

impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, rhs: &Integer) {
        self.0 += &rhs.0;
    }
}
impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, rhs: &Integer) {
        self.0 -= &rhs.0;
    }
}
impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, rhs: &Integer) {
        self.0 *= &rhs.0;
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.0 == BigInt::from(*other)
    }
}
impl PartialOrd<i64> for Integer {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.0.partial_cmp(&BigInt::from(*other))
    }
}

/// Computes coprime cofactors `(x/gcd, y/gcd)` in a single pass, mirroring
/// `get_coprimes` in the original `Integer.hh`: reuses storage the way the
/// C++ does (here just two fresh values, Rust has no aliasing trick to
/// reproduce and doesn't need one).
pub fn get_coprimes(x: &Integer, y: &Integer) -> (Integer, Integer) {
    let g = Integer::gcd(x, y);
    if g.is_zero() {
        return (Integer::zero(), Integer::zero());
    }
    (Integer::exact_div(x, &g), Integer::exact_div(y, &g))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_lcm() {
        let a = Integer::from_i64(12);
        let b = Integer::from_i64(18);
        assert_eq!(Integer::gcd(&a, &b), Integer::from_i64(6));
        assert_eq!(Integer::lcm(&a, &b), Integer::from_i64(36));
    }

    #[test]
    fn exact_div_ok() {
        let a = Integer::from_i64(12);
        let b = Integer::from_i64(4);
        assert_eq!(Integer::exact_div(&a, &b), Integer::from_i64(3));
    }

    #[test]
    fn coprimes() {
        let (cx, cy) = get_coprimes(&Integer::from_i64(12), &Integer::from_i64(18));
        assert_eq!(cx, Integer::from_i64(2));
        assert_eq!(cy, Integer::from_i64(3));
    }

    #[test]
    fn sign_and_abs() {
        let n = Integer::from_i64(-5);
        assert_eq!(n.sign(), -1);
        assert_eq!(n.abs(), Integer::from_i64(5));
    }
}
