//! Convex operations on [`Poly`]: intersection, convex hull, topological
//! closure, space-dimension surgery, affine image/preimage, time
//! elapse and unconstrain.

use super::{cs_flat, gs_flat, Poly};
use crate::con::{Con, ConType};
use crate::gen::{Gen, GenType};
use crate::globals::DimType;
use crate::integer::Integer;
use crate::linear_expr::LinearExpr;
use crate::var::Var;

impl Poly {
    /// `self := self /\ other` (conjunction of constraints).
    pub fn intersection_assign(&mut self, other: &Poly) {
        debug_assert_eq!(self.space_dim(), other.space_dim());
        if self.is_empty() {
            return;
        }
        if other.is_empty() {
            *self = Poly::empty(self.space_dim(), self.topology());
            return;
        }
        self.add_cons(cs_flat(other.cons()));
    }

    /// The convex set `self /\ other`, leaving both operands untouched.
    pub fn intersection(&self, other: &Poly) -> Poly {
        let mut r = self.clone();
        r.intersection_assign(other);
        r
    }

    /// `self := self \sqcup other` (smallest convex superset of the
    /// union, i.e. the convex/poly hull).
    pub fn poly_hull_assign(&mut self, other: &Poly) {
        debug_assert_eq!(self.space_dim(), other.space_dim());
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other.clone();
            return;
        }
        let mut gens = gs_flat(self.gens());
        gens.extend(gs_flat(other.gens()));
        *self = Poly::from_gens(self.space_dim(), self.topology(), gens);
    }

    /// The convex/poly hull of `self` and `other`.
    pub fn poly_hull(&self, other: &Poly) -> Poly {
        let mut r = self.clone();
        r.poly_hull_assign(other);
        r
    }

    /// Replaces `self` with its topological closure (drops strictness:
    /// every strict inequality becomes non-strict, every closure point
    /// is promoted to a real point).
    pub fn topological_closure_assign(&mut self) {
        if self.is_empty() || self.is_topologically_closed() {
            return;
        }
        let cons: Vec<Con> = cs_flat(self.cons())
            .into_iter()
            .map(|c| {
                if c.is_strict_inequality() {
                    Con::new(c.linear_expr().clone(), c.inhomo_term().clone(), ConType::NonStrictIneq)
                } else {
                    c
                }
            })
            .collect();
        *self = Poly::from_cons(self.space_dim(), self.topology(), cons);
    }

    /// Embeds `self` into a space with `n` extra unconstrained
    /// dimensions, appended at the end.
    pub fn add_space_dims(&mut self, n: DimType) {
        if n == 0 {
            return;
        }
        let new_dim = self.space_dim() + n;
        if self.is_empty() {
            *self = Poly::empty(new_dim, self.topology());
            return;
        }
        let mut gens = gs_flat(self.gens());
        for g in &mut gens {
            g.set_space_dim(new_dim);
        }
        for i in self.space_dim()..new_dim {
            gens.push(Gen::line_along(Var::new(i)));
        }
        *self = Poly::from_gens(new_dim, self.topology(), gens);
    }

    /// Removes the space dimensions at `sorted_indices`, renumbering
    /// the remainder.
    pub fn remove_space_dims(&mut self, sorted_indices: &[DimType]) {
        if sorted_indices.is_empty() {
            return;
        }
        let new_dim = self.space_dim() - sorted_indices.len() as DimType;
        if self.is_empty() {
            *self = Poly::empty(new_dim, self.topology());
            return;
        }
        let cons: Vec<Con> = cs_flat(self.cons())
            .into_iter()
            .map(|mut c| {
                c.linear_expr_mut().remove_space_dims(sorted_indices);
                c.strong_normalize();
                c
            })
            .collect();
        *self = Poly::from_cons(new_dim, self.topology(), cons);
    }

    /// Appends `other`'s dimensions after `self`'s own, conjoining the
    /// two polyhedra in the resulting product space (the generalized
    /// Cartesian product used by the original's `concatenate_assign`).
    pub fn concatenate_assign(&mut self, other: &Poly) {
        let d1 = self.space_dim();
        let d2 = other.space_dim();
        if self.is_empty() || other.is_empty() {
            *self = Poly::empty(d1 + d2, self.topology());
            return;
        }
        let mut cons: Vec<Con> = cs_flat(self.cons());
        for c in &mut cons {
            c.set_space_dim(d1 + d2);
        }
        for c in cs_flat(other.cons()) {
            let mut shifted_expr = LinearExpr::with_dim(d1 + d2);
            for i in 0..d2 {
                shifted_expr.set(d1 + i, c.linear_expr().get(i));
            }
            cons.push(Con::new(shifted_expr, c.inhomo_term().clone(), c.con_type()));
        }
        *self = Poly::from_cons(d1 + d2, self.topology(), cons);
    }

    /// `self := self[v := expr/denom]`, the affine image under
    /// `v' = (expr . x + b) / denom` (`denom > 0`).
    pub fn affine_image(&mut self, v: Var, expr: &LinearExpr, b: &Integer, denom: &Integer) {
        debug_assert!(denom.is_positive());
        if self.is_empty() {
            return;
        }
        let gens: Vec<Gen> = gs_flat(self.gens())
            .into_iter()
            .map(|g| {
                let mut new_expr = g.linear_expr().clone();
                new_expr.set_space_dim(self.space_dim());
                let old_v = new_expr.get(v.id());
                let mut rhs = expr.clone();
                rhs.set_space_dim(self.space_dim());
                let hom0 = if g.is_line_or_ray() { Integer::zero() } else { g.divisor().clone() };
                let mut value = b.clone() * hom0.clone();
                for i in 0..self.space_dim() {
                    value += &(rhs.get(i) * new_expr.get(i));
                }
                new_expr.mul_assign(denom);
                let _ = old_v;
                new_expr.set(v.id(), value);
                let new_div = if g.is_line_or_ray() { Integer::zero() } else { g.divisor().clone() * denom.clone() };
                let ty = if g.is_line() {
                    GenType::Line
                } else if g.is_ray() {
                    GenType::Ray
                } else if g.is_closure_point() {
                    GenType::ClosurePoint
                } else {
                    GenType::Point
                };
                Gen::new(ty, new_expr, new_div)
            })
            .collect();
        *self = Poly::from_gens(self.space_dim(), self.topology(), gens);
    }

    /// The inverse of [`Poly::affine_image`] when the map is invertible:
    /// `self := self[v := (denom*v - expr_without_v) / coeff_v]`, applied
    /// here directly on the constraint side (substitution into every
    /// constraint), which is valid for any (not necessarily invertible)
    /// affine map.
    pub fn affine_preimage(&mut self, v: Var, expr: &LinearExpr, b: &Integer, denom: &Integer) {
        debug_assert!(denom.is_positive());
        if self.is_empty() {
            return;
        }
        let cons: Vec<Con> = cs_flat(self.cons())
            .into_iter()
            .map(|c| {
                let coeff_v = c.coeff(v);
                if coeff_v.is_zero() {
                    let mut e = c.linear_expr().clone();
                    e.mul_assign(denom);
                    Con::new(e, c.inhomo_term().clone() * denom.clone(), c.con_type())
                } else {
                    let mut e = c.linear_expr().clone();
                    e.set_space_dim(self.space_dim());
                    e.mul_assign(denom);
                    let mut sub = expr.clone();
                    sub.set_space_dim(self.space_dim());
                    sub.mul_assign(&coeff_v);
                    e.set(v.id(), Integer::zero());
                    e.add_assign(&sub);
                    let inhomo = c.inhomo_term().clone() * denom.clone() + &(b.clone() * coeff_v);
                    Con::new(e, inhomo, c.con_type())
                }
            })
            .collect();
        *self = Poly::from_cons(self.space_dim(), self.topology(), cons);
    }

    /// Projects away any upper bound on `v` (existential elision of
    /// `v`'s upper constraints, keeping lower bounds): used to build
    /// time-elapse below.
    fn unconstrain_one(&mut self, v: Var) {
        if self.is_empty() {
            return;
        }
        let mut gens = gs_flat(self.gens());
        gens.push(Gen::line_along(v));
        *self = Poly::from_gens(self.space_dim(), self.topology(), gens);
    }

    /// Removes every constraint on `v` (projects it out entirely,
    /// replacing its value by a free line direction).
    pub fn unconstrain(&mut self, v: Var) {
        self.unconstrain_one(v);
    }

    /// Removes every constraint on each variable in `vs`.
    pub fn unconstrain_all(&mut self, vs: &[Var]) {
        for &v in vs {
            self.unconstrain_one(v);
        }
    }

    /// `self := self \nearrow other` (time elapse): the smallest
    /// polyhedron containing every point reachable from a point of
    /// `self` by moving along a ray of `other`.
    pub fn time_elapse_assign(&mut self, other: &Poly) {
        debug_assert_eq!(self.space_dim(), other.space_dim());
        if self.is_empty() || other.is_empty() {
            *self = Poly::empty(self.space_dim(), self.topology());
            return;
        }
        let mut gens: Vec<Gen> = gs_flat(self.gens()).into_iter().filter(Gen::is_point_or_closure_point).collect();
        gens.extend(gs_flat(other.gens()).into_iter().filter(|g| !g.is_point_or_closure_point()));
        gens.extend(gs_flat(self.gens()).into_iter().filter(|g| !g.is_point_or_closure_point()));
        *self = Poly::from_gens(self.space_dim(), self.topology(), gens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::con::ConType;
    use crate::globals::Topol;

    fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        Con::new(e, Integer::from_i64(inhomo), ty)
    }

    fn unit_square() -> Poly {
        let cs = vec![
            con(&[1, 0], 0, ConType::NonStrictIneq),
            con(&[-1, 0], 1, ConType::NonStrictIneq),
            con(&[0, 1], 0, ConType::NonStrictIneq),
            con(&[0, -1], 1, ConType::NonStrictIneq),
        ];
        Poly::from_cons(2, Topol::Closed, cs)
    }

    #[test]
    fn intersection_of_square_with_half_space() {
        let mut p = unit_square();
        let half = Poly::from_cons(2, Topol::Closed, vec![con(&[1, 0], -1, ConType::NonStrictIneq)]); // x >= 1
        p.intersection_assign(&half);
        assert!(!p.is_empty());
        assert_eq!(p.gens().len(), 2); // the right edge of the square
    }

    #[test]
    fn poly_hull_of_two_points_is_segment() {
        let a = Poly::from_gens(1, Topol::Closed, vec![Gen::point_origin(1)]);
        let b = Poly::from_gens(
            1,
            Topol::Closed,
            vec![Gen::new(GenType::Point, LinearExpr::from_var(Var::new(0)), Integer::one())],
        );
        let h = a.poly_hull(&b);
        assert_eq!(h.affine_dim(), 1);
    }

    #[test]
    fn add_then_remove_space_dims_round_trips_dimension() {
        let mut p = unit_square();
        p.add_space_dims(1);
        assert_eq!(p.space_dim(), 3);
        p.remove_space_dims(&[2]);
        assert_eq!(p.space_dim(), 2);
        assert!(p.equals(&unit_square()));
    }

    #[test]
    fn unconstrain_grows_the_set() {
        let mut p = unit_square();
        p.unconstrain(Var::new(0));
        assert!(p.is_universe() == false);
        assert_eq!(p.affine_dim(), 2);
    }
}
