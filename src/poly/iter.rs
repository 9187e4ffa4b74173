//! Lazy constraint/generator iteration: walks `sing_rows`, `sk_rows`
//! and materialized `ns_rows` in turn, skipping tautological
//! constraints.
//!
//! In this port `ns_rows` is always empty (see `DESIGN.md`): strict
//! constraints and closure points are represented directly as typed
//! skeleton rows rather than as non-skeleton sums of non-strict ones.
//! The materialization logic below is still implemented against the
//! general `System` shape so that it keeps working if that
//! representation choice is revisited.

use crate::con::Con;
use crate::gen::{Gen, GenType};
use crate::system::{ConSys, GenSys};

fn materialize_con(cs: &ConSys, support: &crate::bits::Bits) -> Con {
    let mut iter = support.iter();
    let first = iter.next().expect("ns_rows support must be non-empty");
    let mut expr = cs.sk_rows[first].linear_expr().clone();
    let mut inhomo = cs.sk_rows[first].inhomo_term().clone();
    for idx in iter {
        expr.add_assign(cs.sk_rows[idx].linear_expr());
        inhomo += cs.sk_rows[idx].inhomo_term();
    }
    Con::new(expr, inhomo, crate::con::ConType::StrictIneq)
}

fn materialize_gen(gs: &GenSys, support: &crate::bits::Bits) -> Gen {
    let mut iter = support.iter();
    let first = iter.next().expect("ns_rows support must be non-empty");
    let mut expr = gs.sk_rows[first].linear_expr().clone();
    let mut inhomo = gs.sk_rows[first].divisor().clone();
    for idx in iter {
        expr.add_assign(gs.sk_rows[idx].linear_expr());
        inhomo += gs.sk_rows[idx].divisor();
    }
    Gen::new(GenType::ClosurePoint, expr, inhomo)
}

/// Iterates every constraint of `cs` (singular, skeleton, materialized
/// non-skeleton), skipping tautologies.
pub fn iter_cons(cs: &ConSys) -> impl Iterator<Item = Con> + '_ {
    cs.sing_rows
        .iter()
        .cloned()
        .chain(cs.sk_rows.iter().cloned())
        .chain(cs.ns_rows.iter().map(|support| materialize_con(cs, support)))
        .filter(|c| !c.is_tautological())
}

/// Iterates every generator of `gs` (singular, skeleton, materialized
/// non-skeleton).
pub fn iter_gens(gs: &GenSys) -> impl Iterator<Item = Gen> + '_ {
    gs.sing_rows
        .iter()
        .cloned()
        .chain(gs.sk_rows.iter().cloned())
        .chain(gs.ns_rows.iter().map(|support| materialize_gen(gs, support)))
}

impl crate::poly::Poly {
    /// A lazy iterator over every (non-tautological) constraint.
    pub fn cons_iter(&self) -> impl Iterator<Item = Con> + '_ {
        iter_cons(self.cons())
    }

    /// A lazy iterator over every generator.
    pub fn gens_iter(&self) -> impl Iterator<Item = Gen> + '_ {
        iter_gens(self.gens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::con::ConType;
    use crate::globals::{DimType, Topol};
    use crate::integer::Integer;
    use crate::linear_expr::LinearExpr;
    use crate::poly::Poly;

    fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        Con::new(e, Integer::from_i64(inhomo), ty)
    }

    #[test]
    fn cons_iter_skips_tautologies_and_yields_all_real_rows() {
        let cs = vec![con(&[1, 0], 0, ConType::NonStrictIneq), con(&[0, 1], 0, ConType::NonStrictIneq)];
        let p = Poly::from_cons(2, Topol::Closed, cs);
        let count = p.cons_iter().count();
        assert!(count >= 2);
        assert!(p.cons_iter().all(|c| !c.is_tautological()));
    }

    #[test]
    fn gens_iter_yields_the_full_generator_set() {
        let p = Poly::universe(1, Topol::Closed);
        assert_eq!(p.gens_iter().count(), p.gens().len());
    }
}
