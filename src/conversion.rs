//! Chernikova-style double-description conversion: building a generator
//! system from a constraint system, and vice versa.
//!
//! Both directions are the same computation up to polarity: a generator
//! system is the set of extreme rays of the cone a constraint system
//! defines, and a constraint system is the set of extreme rays of the
//! *polar* cone a generator system defines. [`Cone`] implements that
//! shared algorithm over a neutral homogeneous row (`HRow`), processed
//! one row at a time via [`Cone::extend`]; [`gens_from_cons`] and
//! [`cons_from_gens`] seed a fresh cone, extend it over the whole input
//! system, and apply the direction-specific typing rules afterwards.
//! [`crate::poly::Poly`] keeps its own cones around between calls so
//! that extending a system by a handful of rows only walks those rows
//! through [`Cone::extend`], rather than re-seeding and re-processing
//! every row already accounted for.
//!
//! The adjacency test used here is the plain combinatorial one (no
//! generator's saturation set is a superset of the candidate pair's
//! common saturators) rather than the "quick non-adjacency"/"quick
//! adjacency" short-circuit filters the original uses before falling
//! back to it — those are performance optimizations only, the
//! combinatorial test is what determines correctness either way.

use crate::bits::Bits;
use crate::con::{Con, ConType};
use crate::gen::{Gen, GenType};
use crate::globals::DimType;
use crate::integer::Integer;
use crate::linear_expr::LinearExpr;
use crate::sat::Sat;
use crate::var::Var;

#[derive(Clone)]
struct HRow {
    expr: LinearExpr,
    coord0: Integer,
}

impl HRow {
    fn value(&self, other: &HRow) -> Integer {
        let mut acc = self.coord0.clone() * other.coord0.clone();
        let sd = self.expr.space_dim().max(other.expr.space_dim());
        for i in 0..sd {
            acc += &(self.expr.get(i) * other.expr.get(i));
        }
        acc
    }

    fn negated(&self) -> HRow {
        let mut e = self.expr.clone();
        e.negate();
        HRow { expr: e, coord0: -self.coord0.clone() }
    }

    /// `w_a * a + w_b * b`, reduced by the gcd of its coefficients.
    fn combine_new(a: &HRow, w_a: &Integer, b: &HRow, w_b: &Integer) -> HRow {
        let mut expr = a.expr.clone();
        expr.mul_assign(w_a);
        let mut bexpr = b.expr.clone();
        bexpr.mul_assign(w_b);
        expr.add_assign(&bexpr);
        let coord0 = a.coord0.clone() * w_a.clone() + b.coord0.clone() * w_b.clone();
        let mut h = HRow { expr, coord0 };
        h.reduce();
        h
    }

    fn reduce(&mut self) {
        let sd = self.expr.space_dim();
        let mut g = self.expr.gcd(0, sd);
        if !self.coord0.is_zero() {
            g = if g.is_zero() { self.coord0.abs() } else { Integer::gcd(&g, &self.coord0) };
        }
        if !g.is_zero() && g != 1 {
            for i in 0..sd {
                let v = self.expr.get(i);
                self.expr.set(i, Integer::exact_div(&v, &g));
            }
            self.coord0 = Integer::exact_div(&self.coord0, &g);
        }
    }
}

/// The persistent state of one double-description computation: the
/// current (redundancy-free) set of generating rows of a cone, which
/// rows among them are singular (an original two-sided generator, not
/// split by any row processed so far), and `nonsat`, whose row `i` is
/// the set of already-processed input-row indices that `rows[i]` does
/// *not* saturate.
///
/// A cone can be built once (via [`Cone::seed_primal`] or
/// [`Cone::seed_polar`]) and then [`extend`](Cone::extend)ed repeatedly
/// as more rows arrive: each call only walks the *new* rows through the
/// combinatorial step, leaving the already-processed history encoded in
/// `nonsat` rather than re-deriving it. This is the same computation a
/// from-scratch pass performs, since the per-row combinatorial step is
/// a left fold over incoming rows and does not depend on how the fold
/// is chunked.
#[derive(Clone, Debug)]
pub(crate) struct Cone {
    rows: Vec<HRow>,
    singular: Vec<bool>,
    nonsat: Sat,
}

impl Cone {
    /// Seeds a cone for "generators from constraints": the apex point
    /// at the origin plus one line along each axis.
    pub(crate) fn seed_primal(dim: DimType) -> Cone {
        let mut rows = vec![HRow { expr: LinearExpr::with_dim(dim), coord0: Integer::one() }];
        let mut singular = vec![false];
        for i in 0..dim {
            rows.push(HRow { expr: LinearExpr::from_var(Var::new(i)), coord0: Integer::zero() });
            singular.push(true);
        }
        let n = rows.len();
        Cone { rows, singular, nonsat: Sat::new(n, 0) }
    }

    /// Seeds a cone for "constraints from generators": one hyperplane
    /// per axis plus the `coord0 >= 0` hyperplane, all singular (the
    /// polar of the whole space).
    pub(crate) fn seed_polar(dim: DimType) -> Cone {
        let mut rows = Vec::with_capacity(dim as usize + 1);
        let mut singular = Vec::with_capacity(dim as usize + 1);
        for i in 0..dim {
            rows.push(HRow { expr: LinearExpr::from_var(Var::new(i)), coord0: Integer::zero() });
            singular.push(true);
        }
        rows.push(HRow { expr: LinearExpr::with_dim(dim), coord0: Integer::one() });
        singular.push(true);
        let n = rows.len();
        Cone { rows, singular, nonsat: Sat::new(n, 0) }
    }

    /// True iff the cone has collapsed to nothing (the defining system
    /// is contradictory/empty).
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Walks `incoming` through the cone one row at a time, each as the
    /// inequality `row >= 0` (and, if two-sided, also `-row >= 0`
    /// immediately after).
    pub(crate) fn extend(&mut self, incoming: &[(HRow, bool)]) {
        for (row, two_sided) in incoming {
            if self.rows.is_empty() {
                return;
            }
            self.extend_one(row);
            if self.rows.is_empty() {
                return;
            }
            if *two_sided {
                let neg = row.negated();
                self.extend_one(&neg);
            }
        }
    }

    /// The core per-row double-description step: splits singular rows
    /// disqualified by `incoming`, keeps satisfiers, and combines
    /// adjacent sign-opposite pairs.
    fn extend_one(&mut self, incoming: &HRow) {
        let k = self.nonsat.num_cols();
        let n = self.rows.len();

        // Phase 1: split any singular row with a nonzero value against
        // `incoming` into its two opposite halves, carrying its
        // `nonsat` row forward to both (and to every other row
        // unchanged).
        let mut rows: Vec<HRow> = Vec::with_capacity(n);
        let mut singular: Vec<bool> = Vec::with_capacity(n);
        let mut pre_sat = Sat::new(0, k);
        for i in 0..n {
            if self.singular[i] {
                let v = incoming.value(&self.rows[i]);
                if v.is_zero() {
                    rows.push(self.rows[i].clone());
                    singular.push(true);
                    pre_sat.add_row(self.nonsat.row(i).clone());
                } else {
                    let neg = self.rows[i].negated();
                    rows.push(self.rows[i].clone());
                    singular.push(false);
                    pre_sat.add_row(self.nonsat.row(i).clone());
                    rows.push(neg);
                    singular.push(false);
                    pre_sat.add_row(self.nonsat.row(i).clone());
                }
            } else {
                rows.push(self.rows[i].clone());
                singular.push(false);
                pre_sat.add_row(self.nonsat.row(i).clone());
            }
        }
        pre_sat.add_cols(1);

        let vals: Vec<Integer> = rows.iter().map(|r| incoming.value(r)).collect();
        let mut pos_idx = Vec::new();
        let mut neg_idx = Vec::new();
        let mut zero_idx = Vec::new();
        for (i, v) in vals.iter().enumerate() {
            if v.is_positive() {
                pos_idx.push(i);
            } else if v.is_negative() {
                neg_idx.push(i);
            } else {
                zero_idx.push(i);
            }
        }

        let mut new_rows = Vec::with_capacity(zero_idx.len() + pos_idx.len());
        let mut new_singular = Vec::with_capacity(zero_idx.len() + pos_idx.len());
        let mut new_sat = Sat::new(0, k + 1);
        for &i in &zero_idx {
            new_rows.push(rows[i].clone());
            new_singular.push(singular[i]);
            new_sat.add_row(pre_sat.row(i).clone());
        }
        for &i in &pos_idx {
            new_rows.push(rows[i].clone());
            new_singular.push(singular[i]);
            let mut b = pre_sat.row(i).clone();
            b.set(k);
            new_sat.add_row(b);
        }
        for &pi in &pos_idx {
            for &ni in &neg_idx {
                let union = Bits::union(pre_sat.row(pi), pre_sat.row(ni));
                let adjacent =
                    !(0..rows.len()).any(|ri| ri != pi && ri != ni && pre_sat.row(ri).subset_eq(&union));
                if !adjacent {
                    continue;
                }
                let vp = &vals[pi];
                let vn = &vals[ni];
                let w_n = vp.clone();
                let w_p = -vn.clone();
                let combined = HRow::combine_new(&rows[ni], &w_n, &rows[pi], &w_p);
                new_rows.push(combined);
                new_singular.push(false);
                new_sat.add_row(union);
            }
        }

        self.rows = new_rows;
        self.singular = new_singular;
        self.nonsat = new_sat;
    }
}

/// Converts a constraint to its neutral homogeneous row, paired with
/// whether it is two-sided (an equality).
pub(crate) fn con_to_row(c: &Con) -> (HRow, bool) {
    (HRow { expr: c.linear_expr().clone(), coord0: c.inhomo_term().clone() }, c.is_equality())
}

/// Converts a generator to its neutral homogeneous row, paired with
/// whether it is two-sided (a line).
pub(crate) fn gen_to_row(g: &Gen) -> (HRow, bool) {
    let coord0 = if g.is_line_or_ray() { Integer::zero() } else { g.divisor().clone() };
    (HRow { expr: g.linear_expr().clone(), coord0 }, g.is_line())
}

/// Types a cone's rows as the generators of the cone `cs` defines:
/// `Line`/`Ray`/`Point`, with points on the boundary of a strict
/// constraint of `cs` reclassified as `ClosurePoint`.
pub(crate) fn cone_to_gens(cone: &Cone, cs: &[Con]) -> Vec<Gen> {
    let mut gens: Vec<Gen> = cone
        .rows
        .iter()
        .zip(cone.singular.iter())
        .map(|(row, &singular)| {
            let ty = if row.coord0.is_zero() {
                if singular {
                    GenType::Line
                } else {
                    GenType::Ray
                }
            } else {
                GenType::Point
            };
            Gen::new(ty, row.expr.clone(), row.coord0.clone())
        })
        .collect();

    // A point lying on the boundary of some strict constraint of the
    // defining system is only in the topological closure: reclassify it
    // as a closure point.
    let strict_cons: Vec<&Con> = cs.iter().filter(|c| c.is_strict_inequality()).collect();
    if !strict_cons.is_empty() {
        for g in &mut gens {
            if g.is_point() {
                let on_boundary = strict_cons.iter().any(|c| con_gen_scalar_prod(c, g).is_zero());
                if on_boundary {
                    let expr = g.linear_expr().clone();
                    let div = g.divisor().clone();
                    *g = Gen::new(GenType::ClosurePoint, expr, div);
                }
            }
        }
    }

    gens
}

/// Types a cone's rows as the facets of the cone `gs` generates:
/// `Equality` for singular rows, `StrictIneq` for a facet saturated
/// only by closure points (never by a real point) of `gs`, and
/// `NonStrictIneq` otherwise.
pub(crate) fn cone_to_cons(cone: &Cone, gs: &[Gen]) -> Vec<Con> {
    cone.rows
        .iter()
        .zip(cone.singular.iter())
        .map(|(row, &singular)| {
            if singular {
                return Con::new(row.expr.clone(), row.coord0.clone(), ConType::Equality);
            }
            let candidate = Con::new(row.expr.clone(), row.coord0.clone(), ConType::NonStrictIneq);
            let mut saturates_real_point = false;
            let mut saturates_closure_point = false;
            for g in gs {
                if g.is_point_or_closure_point() && con_gen_scalar_prod(&candidate, g).is_zero() {
                    if g.is_closure_point() {
                        saturates_closure_point = true;
                    } else {
                        saturates_real_point = true;
                    }
                }
            }
            if saturates_closure_point && !saturates_real_point {
                Con::new(row.expr.clone(), row.coord0.clone(), ConType::StrictIneq)
            } else {
                candidate
            }
        })
        .collect()
}

/// Builds the generators of the cone `cs` defines, or `None` if it is
/// empty. `dim` is the ambient space dimension.
pub fn gens_from_cons(cs: &[Con], dim: DimType) -> Option<Vec<Gen>> {
    let mut cone = Cone::seed_primal(dim);
    let rows: Vec<(HRow, bool)> = cs.iter().map(con_to_row).collect();
    cone.extend(&rows);
    if cone.is_empty() {
        return None;
    }
    Some(cone_to_gens(&cone, cs))
}

/// Builds the facets of the cone `gs` generates.
pub fn cons_from_gens(gs: &[Gen], dim: DimType) -> Vec<Con> {
    let mut cone = Cone::seed_polar(dim);
    let rows: Vec<(HRow, bool)> = gs.iter().map(gen_to_row).collect();
    cone.extend(&rows);
    cone_to_cons(&cone, gs)
}

/// `<c.expr, g.expr> + c.inhomo * hom0(g)`, the saturation pairing
/// between a constraint and a generator (`hom0` is the generator's
/// divisor for points/closure points, zero for lines/rays).
pub fn con_gen_scalar_prod(c: &Con, g: &Gen) -> Integer {
    let hom0 = if g.is_line_or_ray() { Integer::zero() } else { g.divisor().clone() };
    let mut acc = c.inhomo_term().clone() * hom0;
    let sd = c.linear_expr().space_dim().max(g.linear_expr().space_dim());
    for i in 0..sd {
        acc += &(c.linear_expr().get(i) * g.linear_expr().get(i));
    }
    acc
}

/// Sign of [`con_gen_scalar_prod`], as `-1/0/1`.
pub fn sign_of_con_gen_scalar_prod(c: &Con, g: &Gen) -> i32 {
    con_gen_scalar_prod(c, g).sign()
}
