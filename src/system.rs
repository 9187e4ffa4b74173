//! Generic machinery shared by constraint and generator systems: each
//! system splits its rows into `sing_rows` (equalities/lines),
//! `sk_rows` (skeleton) and `ns_rows` (non-skeleton supports, empty for
//! C-polyhedra). `ns_rows[k]` is a [`Bits`] of indices into `sk_rows`
//! whose sum materializes a strict constraint or a point.

use crate::bits::Bits;
use crate::globals::DimType;
use crate::linear_expr::LinearExpr;

/// Operations a row type (`Con` or `Gen`) must provide for the generic
/// Gauss-elimination / back-substitution code in this module.
pub trait Row: Clone {
    /// Current space dimension.
    fn space_dim(&self) -> DimType;
    /// Resize the row's backing storage.
    fn set_space_dim(&mut self, dim: DimType);
    /// True iff this is a "singular" row (equality for `Con`, line for
    /// `Gen`).
    fn is_singular(&self) -> bool;
    /// The underlying linear expression (read-only).
    fn linear_expr(&self) -> &LinearExpr;
    /// Eliminate coordinate `dim` between `self` and `y`
    /// (re-normalizes).
    fn linear_combine(&mut self, y: &Self, dim: DimType);
}

/// A constraint or generator system: singular rows, skeleton rows, and
/// (for NNC) non-skeleton supports.
#[derive(Clone, Debug, Default)]
pub struct System<R> {
    pub sing_rows: Vec<R>,
    pub sk_rows: Vec<R>,
    /// Each entry is the set of `sk_rows` indices summing to a strict
    /// constraint / point.
    pub ns_rows: Vec<Bits>,
}

impl<R: Row> System<R> {
    /// An empty system.
    pub fn new() -> Self {
        System { sing_rows: Vec::new(), sk_rows: Vec::new(), ns_rows: Vec::new() }
    }

    /// Total row count across all three parts.
    pub fn len(&self) -> usize {
        self.sing_rows.len() + self.sk_rows.len() + self.ns_rows.len()
    }

    /// True iff there are no rows at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes a row into `sing_rows` or `sk_rows` according to
    /// `Row::is_singular`.
    pub fn push(&mut self, row: R) {
        if row.is_singular() {
            self.sing_rows.push(row);
        } else {
            self.sk_rows.push(row);
        }
    }

    /// Sets the space dimension of every stored row.
    pub fn set_space_dim(&mut self, dim: DimType) {
        for r in &mut self.sing_rows {
            r.set_space_dim(dim);
        }
        for r in &mut self.sk_rows {
            r.set_space_dim(dim);
        }
    }

    /// Fraction-free Gaussian elimination of `sing_rows`: reduces to
    /// row-echelon form with unique pivots (highest-indexed pivot
    /// eliminated first), dropping rank-deficient (all-zero) rows. Returns
    /// the chosen pivot dimension for each surviving row, in the same
    /// order as the (now reduced) `sing_rows`.
    pub fn gauss(&mut self, space_dim: DimType) -> Vec<DimType> {
        let mut rows = std::mem::take(&mut self.sing_rows);
        let mut pivots: Vec<DimType> = Vec::new();
        let mut result: Vec<R> = Vec::new();
        // Process candidate pivot dimensions from highest to lowest, as
        // the original does ("eliminating from the highest-indexed pivot
        // downward").
        let mut dim = space_dim - 1;
        loop {
            if let Some(pos) = rows.iter().position(|r| !r.linear_expr().get(dim).is_zero()) {
                let pivot_row = rows.remove(pos);
                for r in rows.iter_mut() {
                    if !r.linear_expr().get(dim).is_zero() {
                        r.linear_combine(&pivot_row, dim);
                    }
                }
                result.push(pivot_row);
                pivots.push(dim);
            }
            if dim == 0 {
                break;
            }
            dim -= 1;
        }
        // Rows left in `rows` (if any) are zero rows (rank-deficient);
        // they are discarded, matching "rank-deficient rows are
        // discarded".
        self.sing_rows = result;
        pivots
    }

    /// After `gauss`, clears each pivot coordinate from every skeleton
    /// row using the corresponding singular row.
    pub fn back_substitute(&mut self, pivots: &[DimType]) {
        for (row, &dim) in self.sing_rows.iter().zip(pivots.iter()) {
            for sk in &mut self.sk_rows {
                if !sk.linear_expr().get(dim).is_zero() {
                    sk.linear_combine(row, dim);
                }
            }
        }
    }
}

impl crate::con::Con {}

impl Row for crate::con::Con {
    fn space_dim(&self) -> DimType {
        crate::con::Con::space_dim(self)
    }
    fn set_space_dim(&mut self, dim: DimType) {
        crate::con::Con::set_space_dim(self, dim)
    }
    fn is_singular(&self) -> bool {
        self.is_line_or_equality()
    }
    fn linear_expr(&self) -> &LinearExpr {
        crate::con::Con::linear_expr(self)
    }
    fn linear_combine(&mut self, y: &Self, dim: DimType) {
        crate::con::Con::linear_combine(self, y, dim)
    }
}

impl Row for crate::gen::Gen {
    fn space_dim(&self) -> DimType {
        crate::gen::Gen::space_dim(self)
    }
    fn set_space_dim(&mut self, dim: DimType) {
        crate::gen::Gen::set_space_dim(self, dim)
    }
    fn is_singular(&self) -> bool {
        self.is_line_or_equality()
    }
    fn linear_expr(&self) -> &LinearExpr {
        crate::gen::Gen::linear_expr(self)
    }
    fn linear_combine(&mut self, y: &Self, dim: DimType) {
        crate::gen::Gen::linear_combine(self, y, dim)
    }
}

/// A constraint system.
pub type ConSys = System<crate::con::Con>;
/// A generator system.
pub type GenSys = System<crate::gen::Gen>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::con::{Con, ConType};
    use crate::integer::Integer;
    use crate::linear_expr::LinearExpr;

    fn con(vals: &[i64], inhomo: i64) -> Con {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        Con::new(e, Integer::from_i64(inhomo), ConType::Equality)
    }

    #[test]
    fn gauss_reduces_two_equalities() {
        let mut sys: ConSys = System::new();
        // x + y = 1 ; x - y = 0  => reduces to a 2x2 echelon with
        // distinct pivots 1 and 0 respectively.
        sys.sing_rows.push(con(&[1, 1], -1));
        sys.sing_rows.push(con(&[1, -1], 0));
        let pivots = sys.gauss(2);
        assert_eq!(sys.sing_rows.len(), 2);
        assert_eq!(pivots.len(), 2);
    }

    #[test]
    fn gauss_drops_dependent_row() {
        let mut sys: ConSys = System::new();
        sys.sing_rows.push(con(&[1, 1], -1));
        sys.sing_rows.push(con(&[2, 2], -2)); // same hyperplane
        let pivots = sys.gauss(2);
        assert_eq!(sys.sing_rows.len(), 1);
        assert_eq!(pivots.len(), 1);
    }
}
