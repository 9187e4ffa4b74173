//! Shared test-only builders: every module's `#[cfg(test)] mod tests`
//! rolls its own tiny `con`/`gen` helper from coefficient slices; this
//! collects the common ones so integration tests (`tests/`) can reuse
//! them too instead of re-deriving `LinearExpr` plumbing by hand.

use crate::con::{Con, ConType};
use crate::gen::{Gen, GenType};
use crate::globals::DimType;
use crate::integer::Integer;
use crate::linear_expr::LinearExpr;

/// Builds a constraint from small integer coefficients.
pub(crate) fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
    let mut e = LinearExpr::new();
    for (i, v) in vals.iter().enumerate() {
        e.set(i as DimType, Integer::from_i64(*v));
    }
    Con::new(e, Integer::from_i64(inhomo), ty)
}

/// Builds a generator from small integer coefficients and a divisor
/// (ignored for lines/rays).
pub(crate) fn gen(vals: &[i64], div: i64, ty: GenType) -> Gen {
    let mut e = LinearExpr::new();
    for (i, v) in vals.iter().enumerate() {
        e.set(i as DimType, Integer::from_i64(*v));
    }
    Gen::new(ty, e, Integer::from_i64(div))
}

/// The unit hypercube `[0,1]^dim` as a constraint list.
pub(crate) fn unit_hypercube_cons(dim: DimType) -> Vec<Con> {
    let mut cs = Vec::with_capacity(2 * dim as usize);
    for i in 0..dim {
        let mut lo = vec![0i64; dim as usize];
        lo[i as usize] = 1;
        cs.push(con(&lo, 0, ConType::NonStrictIneq));
        let mut hi = vec![0i64; dim as usize];
        hi[i as usize] = -1;
        cs.push(con(&hi, 1, ConType::NonStrictIneq));
    }
    cs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globals::Topol;
    use crate::poly::Poly;

    #[test]
    fn unit_hypercube_cons_builds_the_unit_square() {
        let p = Poly::from_cons(2, Topol::Closed, unit_hypercube_cons(2));
        assert!(!p.is_empty());
        assert_eq!(p.affine_dim(), 2);
        assert_eq!(p.gens().sk_rows.iter().filter(|g| g.is_point()).count(), 4);
    }
}
