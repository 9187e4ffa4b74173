//! `Sat`: a saturation matrix, i.e. a vector of [`Bits`] rows all sharing a
//! nominal column count.
//!
//! Two companion matrices are kept by [`crate::poly::Poly`]: `sat_c` (rows
//! indexed by generators, columns by skeleton constraints) and `sat_g` (its
//! transpose). By convention a bit is **zero** iff the corresponding
//! generator saturates the corresponding constraint (saturation-as-zero),
//! so that the "is a saturator of" relation used throughout conversion
//! becomes a plain `Bits` subset/union test.

use crate::bits::Bits;

/// A vector of bitset rows of fixed nominal width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sat {
    rows: Vec<Bits>,
    num_cols: usize,
}

impl Sat {
    /// Builds a `n_rows x n_cols` all-zero matrix.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Sat { rows: vec![Bits::new(); n_rows], num_cols }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Nominal number of columns (independent of any row's actual bit
    /// extent, which may be shorter if its high bits are all zero).
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// True iff there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row access.
    pub fn row(&self, i: usize) -> &Bits {
        &self.rows[i]
    }

    /// Mutable row access.
    pub fn row_mut(&mut self, i: usize) -> &mut Bits {
        &mut self.rows[i]
    }

    /// All rows.
    pub fn rows(&self) -> &[Bits] {
        &self.rows
    }

    /// Appends a new row (caller ensures its bit extent fits `num_cols`).
    pub fn add_row(&mut self, row: Bits) {
        self.rows.push(row);
    }

    /// Widens every existing row's column space by `n` (all-zero) columns.
    pub fn add_cols(&mut self, n: usize) {
        self.num_cols += n;
    }

    /// Drops the last `n` rows.
    pub fn remove_trailing_rows(&mut self, n: usize) {
        let new_len = self.rows.len() - n;
        self.rows.truncate(new_len);
    }

    /// Drops the highest-indexed `n` columns, clearing any set bits beyond
    /// the new width.
    pub fn remove_trailing_columns(&mut self, n: usize) {
        self.num_cols -= n;
        for r in &mut self.rows {
            r.reset_from(self.num_cols);
        }
    }

    /// Removes rows at `sorted_indices` (e.g. redundant skeleton rows
    /// found during simplification).
    pub fn remove_rows(&mut self, sorted_indices: &[usize]) {
        let set: std::collections::HashSet<usize> = sorted_indices.iter().copied().collect();
        let mut i = 0usize;
        self.rows.retain(|_| {
            let keep = !set.contains(&i);
            i += 1;
            keep
        });
    }

    /// Removes columns at `sorted_indices` from every row, renumbering the
    /// remaining columns (`Bits::remove_all`).
    pub fn remove_cols(&mut self, sorted_indices: &[usize]) {
        self.num_cols -= sorted_indices.len();
        for r in &mut self.rows {
            *r = r.remove_all(sorted_indices);
        }
    }

    /// Transpose: a `num_cols x num_rows` matrix where bit `(j, i)` of the
    /// result equals bit `(i, j)` of `self`.
    pub fn transpose(&self) -> Sat {
        let mut t = Sat::new(self.num_cols, self.num_rows());
        for (i, row) in self.rows.iter().enumerate() {
            for j in row.iter() {
                if j < self.num_cols {
                    t.rows[j].set(i);
                }
            }
        }
        t
    }

    /// Basic shape invariant: every row's highest set bit is within
    /// `num_cols`.
    pub fn check_inv(&self) -> bool {
        self.rows.iter().all(|r| r.last().map_or(true, |l| l < self.num_cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_round_trips() {
        let mut s = Sat::new(2, 3);
        s.row_mut(0).set(1);
        s.row_mut(1).set(0);
        s.row_mut(1).set(2);
        let t = s.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert!(t.row(1).test(0));
        assert!(t.row(0).test(1));
        assert!(t.row(2).test(1));
        assert_eq!(t.transpose(), s);
    }

    #[test]
    fn add_cols_and_row() {
        let mut s = Sat::new(0, 2);
        s.add_cols(1);
        assert_eq!(s.num_cols(), 3);
        s.add_row(Bits::from_iter_positions([0, 2]));
        assert_eq!(s.num_rows(), 1);
        assert!(s.check_inv());
    }

    #[test]
    fn remove_cols_renumbers() {
        let mut s = Sat::new(1, 4);
        s.row_mut(0).set(0);
        s.row_mut(0).set(3);
        s.remove_cols(&[1]);
        assert_eq!(s.num_cols(), 3);
        assert_eq!(s.row(0).iter().collect::<Vec<_>>(), vec![0, 2]);
    }
}
