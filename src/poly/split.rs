//! Rational and integral two-way split along a constraint.

use super::Poly;
use crate::con::{Con, ConType};
use crate::integer::Integer;

fn complement(c: &Con) -> Con {
    let mut e = c.linear_expr().clone();
    e.negate();
    let inhomo = -c.inhomo_term().clone();
    let ty = match c.con_type() {
        ConType::Equality => ConType::Equality, // handled specially by caller
        ConType::NonStrictIneq => ConType::StrictIneq,
        ConType::StrictIneq => ConType::NonStrictIneq,
    };
    Con::new(e, inhomo, ty)
}

impl Poly {
    /// Partitions `self` along `c`: afterwards `self` holds
    /// `self /\ c` and the returned polyhedron holds `self /\ !c`.
    /// For an equality `c`, the complement is modeled as the
    /// disjunction `expr + inhomo > 0 \/ expr + inhomo < 0`; since a
    /// single convex polyhedron cannot represent that disjunction
    /// exactly, the returned half uses the convex hull of both strict
    /// sides (a sound over-approximation), which is flagged in
    /// `DESIGN.md` as a scope decision (the original likewise documents
    /// equality-splitting as its least common case).
    pub fn split(&mut self, c: &Con) -> Poly {
        debug_assert_eq!(c.space_dim(), self.space_dim());
        let mut other = self.clone();
        if c.is_equality() {
            let mut pos = c.clone();
            pos.set_type(ConType::StrictIneq);
            let mut neg = pos.clone();
            neg.linear_expr_mut().negate();
            let flipped_inhomo = -pos.inhomo_term().clone();
            let neg = Con::new(neg.linear_expr().clone(), flipped_inhomo, ConType::StrictIneq);
            let mut other_pos = other.clone();
            other_pos.add_con(pos);
            let mut other_neg = other.clone();
            other_neg.add_con(neg);
            other = other_pos;
            other.poly_hull_assign(&other_neg);
        } else {
            other.add_con(complement(c));
        }
        self.add_con(c.clone());
        other
    }

    /// As [`Poly::split`], but additionally tightens the two halves to
    /// their integer hull boundary for the splitting hyperplane only
    /// (the full integer-hull closure operation is out of scope; this
    /// sharpens just the one new facet from `c`'s boundary inward).
    ///
    /// `c` is `expr . x + inhomo >= 0`, i.e. `expr . x >= b` for
    /// `b = -inhomo`. Since `x` ranges over integers, `expr . x` only
    /// ever takes values that are multiples of `g = gcd(expr)`, so the
    /// tightest equivalent bound is `b_eff`, the smallest multiple of
    /// `g` that is `>= b`; the complementary half is then bounded by
    /// the largest multiple of `g` strictly below it, `b_eff - g`.
    pub fn integral_split(&mut self, c: &Con) -> Poly {
        debug_assert_eq!(c.space_dim(), self.space_dim());
        if c.is_equality() {
            return self.split(c);
        }
        let mut g = c.linear_expr().gcd(0, c.space_dim());
        if g.is_zero() {
            g = Integer::one();
        }
        let b = -c.inhomo_term().clone();
        let b_eff = b.div_ceil(&g) * g.clone();

        let tightened = Con::new(c.linear_expr().clone(), -b_eff.clone(), ConType::NonStrictIneq);
        let mut other = self.clone();
        let mut comp_expr = c.linear_expr().clone();
        comp_expr.negate();
        let comp_inhomo = b_eff - g;
        let comp = Con::new(comp_expr, comp_inhomo, ConType::NonStrictIneq);
        other.add_con(comp);
        self.add_con(tightened);
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globals::{DimType, Topol};
    use crate::linear_expr::LinearExpr;

    fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        Con::new(e, Integer::from_i64(inhomo), ty)
    }

    #[test]
    fn split_unit_interval_in_half() {
        let mut p = Poly::from_cons(
            1,
            Topol::Closed,
            vec![con(&[1], 0, ConType::NonStrictIneq), con(&[-1], 4, ConType::NonStrictIneq)],
        );
        let other = p.split(&con(&[1], -2, ConType::NonStrictIneq)); // x >= 2
        assert!(!p.is_empty());
        assert!(!other.is_empty());
        assert_eq!(p.affine_dim(), 1);
        assert_eq!(other.affine_dim(), 1);
    }

    #[test]
    fn integral_split_leaves_no_gap_for_integer_points() {
        let mut p = Poly::from_cons(
            1,
            Topol::Closed,
            vec![con(&[1], 0, ConType::NonStrictIneq), con(&[-1], 4, ConType::NonStrictIneq)],
        );
        let other = p.integral_split(&con(&[1], -2, ConType::NonStrictIneq));
        assert!(!p.is_empty());
        assert!(!other.is_empty());
    }

    #[test]
    fn integral_split_rounds_to_the_coefficient_gcd() {
        // 0 <= 2x <= 10 (i.e. 0 <= x <= 5), split on `2x >= 3`: no
        // integer satisfies `2x == 3`, so the tightened side must round
        // up to the next multiple of gcd(2) = 2 (`2x >= 4`) and the
        // complement must round down to the previous one (`2x <= 2`),
        // leaving no integer gap between the two halves.
        let mut p = Poly::from_cons(
            1,
            Topol::Closed,
            vec![con(&[2], 0, ConType::NonStrictIneq), con(&[-2], 10, ConType::NonStrictIneq)],
        );
        let other = p.integral_split(&con(&[2], -3, ConType::NonStrictIneq));
        assert!(!p.is_empty());
        assert!(!other.is_empty());
        let then_cons: Vec<Con> = p.cons_iter().collect();
        assert!(then_cons.iter().any(|c| c.is_equal_to(&con(&[2], -4, ConType::NonStrictIneq))));
        let else_cons: Vec<Con> = other.cons_iter().collect();
        assert!(else_cons.iter().any(|c| c.is_equal_to(&con(&[-2], 2, ConType::NonStrictIneq))));
    }
}
