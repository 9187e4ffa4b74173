//! Constraints: `(expr, inhomo, type)` triples with
//! `type in {EQ, NSI, SI}`, meaning respectively `<expr,x> + inhomo = 0`,
//! `>= 0`, `> 0`.

use std::cmp::Ordering;

use crate::globals::DimType;
use crate::integer::Integer;
use crate::linear_expr::{self, LinearExpr};
use crate::var::Var;

/// The kind of a constraint row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConType {
    /// `<expr,x> + inhomo = 0`.
    Equality,
    /// `<expr,x> + inhomo >= 0`.
    NonStrictIneq,
    /// `<expr,x> + inhomo > 0`.
    StrictIneq,
}

/// A linear constraint in strong-normalized canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Con {
    expr: LinearExpr,
    inhomo: Integer,
    ty: ConType,
}

impl Con {
    /// Builds a constraint, strong-normalizing it immediately.
    pub fn new(expr: LinearExpr, inhomo: Integer, ty: ConType) -> Self {
        let mut c = Con { expr, inhomo, ty };
        c.strong_normalize();
        c
    }

    /// The canonical 0-dimensional false constraint `1 = 0`.
    pub fn zero_dim_false() -> Self {
        Con::new(LinearExpr::new(), Integer::one(), ConType::Equality)
    }

    /// The canonical strict-positivity constraint `1 > 0`.
    pub fn zero_dim_positivity() -> Self {
        Con::new(LinearExpr::new(), Integer::one(), ConType::StrictIneq)
    }

    /// Space dimension of the underlying linear expression.
    pub fn space_dim(&self) -> DimType {
        self.expr.space_dim()
    }

    /// Resizes the underlying expression.
    pub fn set_space_dim(&mut self, dim: DimType) {
        self.expr.set_space_dim(dim);
    }

    /// The constraint kind.
    pub fn con_type(&self) -> ConType {
        self.ty
    }

    /// Overwrites the constraint kind without touching the row (used
    /// during conversion/simplification type promotions).
    pub fn set_type(&mut self, ty: ConType) {
        self.ty = ty;
    }

    /// True iff this is an equality.
    pub fn is_equality(&self) -> bool {
        self.ty == ConType::Equality
    }
    /// True iff this is any kind of inequality.
    pub fn is_inequality(&self) -> bool {
        self.ty != ConType::Equality
    }
    /// True iff this is a non-strict inequality.
    pub fn is_nonstrict_inequality(&self) -> bool {
        self.ty == ConType::NonStrictIneq
    }
    /// True iff this is a strict inequality.
    pub fn is_strict_inequality(&self) -> bool {
        self.ty == ConType::StrictIneq
    }
    /// Equalities double as the "singular" rows of a constraint system.
    pub fn is_line_or_equality(&self) -> bool {
        self.is_equality()
    }

    /// The underlying linear expression.
    pub fn linear_expr(&self) -> &LinearExpr {
        &self.expr
    }
    /// Mutable access, for in-place row surgery (callers must
    /// re-normalize afterwards).
    pub fn linear_expr_mut(&mut self) -> &mut LinearExpr {
        &mut self.expr
    }
    /// Coefficient of `v`.
    pub fn coeff(&self, v: Var) -> Integer {
        self.expr.get_var(v)
    }
    /// The inhomogeneous term.
    pub fn inhomo_term(&self) -> &Integer {
        &self.inhomo
    }

    /// `<expr,x> + inhomo` evaluated at a rational point represented as
    /// integer homogeneous coordinates over a common divisor `div`
    /// (used for scalar products against generators elsewhere; exposed
    /// here for direct constraint evaluation in tests).
    pub fn scalar_value(&self, point: &[Integer], div: &Integer) -> Integer {
        let mut acc = self.inhomo.clone() * div.clone();
        for (i, p) in point.iter().enumerate() {
            acc += &(self.expr.get(i as DimType) * p.clone());
        }
        acc
    }

    fn sign_normalize(&mut self) {
        if self.is_equality() {
            self.expr.sign_normalize(&mut self.inhomo);
        }
    }

    /// Strong-normalizes `(expr, inhomo)` and, for equalities, the sign.
    pub fn strong_normalize(&mut self) {
        self.expr.normalize(&mut self.inhomo);
        self.sign_normalize();
    }

    /// Eliminates coordinate `dim` between `self` and `y` (Gaussian
    /// elimination step), re-normalizing afterwards.
    pub fn linear_combine(&mut self, y: &Con, dim: DimType) {
        let mut inhomo = self.inhomo.clone();
        self.expr.linear_combine(&y.expr, dim, &mut inhomo, &y.inhomo);
        self.inhomo = inhomo;
        self.strong_normalize();
    }

    /// True iff trivially satisfied by every point (`0 = 0`, `0 >= 0`
    /// for a nonnegative inhomo, `0 > 0` with strictly positive inhomo).
    pub fn is_tautological(&self) -> bool {
        if !self.expr.is_zero() {
            return false;
        }
        match self.ty {
            ConType::Equality => self.inhomo.is_zero(),
            ConType::NonStrictIneq => !self.inhomo.is_negative(),
            ConType::StrictIneq => self.inhomo.is_positive(),
        }
    }

    /// True iff no point can ever satisfy it (`0 = c != 0`, etc.).
    pub fn is_inconsistent(&self) -> bool {
        if !self.expr.is_zero() {
            return false;
        }
        match self.ty {
            ConType::Equality => !self.inhomo.is_zero(),
            ConType::NonStrictIneq => self.inhomo.is_negative(),
            ConType::StrictIneq => !self.inhomo.is_positive(),
        }
    }

    /// Structural (post-normalization) equality.
    pub fn is_equal_to(&self, y: &Con) -> bool {
        self.ty == y.ty && self.inhomo == y.inhomo && self.expr.is_equal_to(&y.expr)
    }
}

impl PartialEq for Con {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}
impl Eq for Con {}

impl PartialOrd for Con {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare(self, other))
    }
}
impl Ord for Con {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

/// Canonical comparator: equalities precede inequalities, non-strict
/// inequalities precede strict ones, then lexicographic on the row.
pub fn compare(x: &Con, y: &Con) -> Ordering {
    let x_eq = x.is_equality();
    let y_eq = y.is_equality();
    if x_eq != y_eq {
        return if y_eq { Ordering::Greater } else { Ordering::Less };
    }
    let x_si = x.is_strict_inequality();
    let y_si = y.is_strict_inequality();
    if x_si != y_si {
        return if x_si { Ordering::Greater } else { Ordering::Less };
    }
    let r = linear_expr::compare(&x.expr, &y.expr);
    if r != Ordering::Equal {
        return r;
    }
    x.inhomo.cmp(&y.inhomo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(vals: &[i64]) -> LinearExpr {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        e
    }

    #[test]
    fn strong_normalization_divides_gcd() {
        let c = Con::new(expr(&[4, 2]), Integer::from_i64(6), ConType::NonStrictIneq);
        assert_eq!(c.coeff(Var::new(0)), Integer::from_i64(2));
        assert_eq!(c.coeff(Var::new(1)), Integer::from_i64(1));
        assert_eq!(*c.inhomo_term(), Integer::from_i64(3));
    }

    #[test]
    fn equality_sign_normalized() {
        let c = Con::new(expr(&[-1, 2]), Integer::from_i64(-3), ConType::Equality);
        assert_eq!(c.coeff(Var::new(0)), Integer::from_i64(1));
        assert_eq!(c.coeff(Var::new(1)), Integer::from_i64(-2));
        assert_eq!(*c.inhomo_term(), Integer::from_i64(3));
    }

    #[test]
    fn zero_dim_false_is_inconsistent() {
        assert!(Con::zero_dim_false().is_inconsistent());
        assert!(!Con::zero_dim_false().is_tautological());
    }

    #[test]
    fn ordering_equalities_before_inequalities() {
        let eq = Con::new(expr(&[1]), Integer::zero(), ConType::Equality);
        let ineq = Con::new(expr(&[1]), Integer::zero(), ConType::NonStrictIneq);
        assert!(compare(&eq, &ineq) == Ordering::Less);
    }
}
