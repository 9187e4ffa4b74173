//! Post-conversion simplification: merges opposite ray/line pairs that
//! the conversion leaves split, drops duplicate rows, reduces the
//! singular rows to a basis, and rebuilds the two systems and their
//! saturation matrices.
//!
//! The conversion in [`crate::conversion`] already produces an
//! irredundant extreme-ray / facet set (the combinatorial adjacency
//! test is exactly the redundancy criterion), so the remaining work
//! has two parts. First, "implicit singular detection": a line that
//! conversion had to split into two opposite rays because some
//! processed row disqualified it as singular may, after all rows are
//! in, have both halves survive unchanged — in which case they are
//! really one line, not two rays, and are merged back. Second,
//! reducing the singular rows (equalities/lines) to a Gaussian-
//! eliminated basis via [`System::gauss`] and clearing their pivot
//! coordinates out of the skeleton rows via [`System::back_substitute`]
//! — without this a redundant equality/line (e.g. `x = 0` derived twice
//! by two different combinations) would survive as two rows instead of
//! one, and skeleton rows would carry coordinates already pinned down
//! by the singular subspace.

use crate::con::Con;
use crate::conversion::con_gen_scalar_prod;
use crate::gen::{Gen, GenType};
use crate::globals::DimType;
use crate::sat::Sat;
use crate::system::{ConSys, GenSys, System};

/// Merges `(r, -r)` ray pairs into lines, drops exact duplicates, sorts
/// canonically, reduces the line subspace to a basis, and splits into a
/// [`GenSys`].
pub fn simplify_gens(dim: DimType, mut gens: Vec<Gen>) -> GenSys {
    gens.sort();
    gens.dedup_by(|a, b| a.is_equal_to(b));

    let mut used = vec![false; gens.len()];
    let mut merged: Vec<Gen> = Vec::with_capacity(gens.len());
    for i in 0..gens.len() {
        if used[i] || !gens[i].is_ray() {
            continue;
        }
        let mut negated = gens[i].linear_expr().clone();
        negated.negate();
        if let Some(j) = gens.iter().position(|g| g.is_ray() && g.linear_expr().is_equal_to(&negated)) {
            if j != i && !used[j] {
                used[i] = true;
                used[j] = true;
                merged.push(Gen::line_along_expr(gens[i].linear_expr().clone()));
            }
        }
    }
    for (i, g) in gens.into_iter().enumerate() {
        if !used[i] {
            merged.push(g);
        }
    }
    merged.sort();

    let mut sys = System::new();
    for g in merged {
        sys.push(g);
    }
    let pivots = sys.gauss(dim);
    sys.back_substitute(&pivots);
    sys
}

/// Drops exact duplicates, sorts canonically, reduces the equality
/// subspace to a basis, and splits into a [`ConSys`].
pub fn simplify_cons(dim: DimType, mut cons: Vec<Con>) -> ConSys {
    cons.sort();
    cons.dedup_by(|a, b| a.is_equal_to(b));
    let mut sys = System::new();
    for c in cons {
        sys.push(c);
    }
    let pivots = sys.gauss(dim);
    sys.back_substitute(&pivots);
    sys
}

/// Recomputes `sat_c` (rows indexed by the flattened generator list in
/// `sing_rows` then `sk_rows` order, columns by the flattened
/// constraint list in the same order) from scratch.
pub fn build_sat_c(cs: &ConSys, gs: &GenSys) -> Sat {
    let cons: Vec<&Con> = cs.sing_rows.iter().chain(cs.sk_rows.iter()).collect();
    let gens: Vec<&Gen> = gs.sing_rows.iter().chain(gs.sk_rows.iter()).collect();
    let mut sat = Sat::new(gens.len(), cons.len());
    for (i, g) in gens.iter().enumerate() {
        for (j, c) in cons.iter().enumerate() {
            if !con_gen_scalar_prod(c, g).is_zero() {
                sat.row_mut(i).set(j);
            }
        }
    }
    sat
}

/// The transpose of [`build_sat_c`], indexed the other way round.
pub fn build_sat_g(cs: &ConSys, gs: &GenSys) -> Sat {
    build_sat_c(cs, gs).transpose()
}

impl Gen {
    /// Builds a line along `expr` (crate-internal convenience used when
    /// re-merging a split line during simplification).
    pub(crate) fn line_along_expr(expr: crate::linear_expr::LinearExpr) -> Gen {
        Gen::new(GenType::Line, expr, crate::integer::Integer::zero())
    }
}
