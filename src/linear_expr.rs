//! Dense linear expressions over an ordered set of space dimensions, and
//! the `combine` primitive used by Gaussian elimination and by the
//! Chernikova conversion's adjacency combination.

use std::cmp::Ordering;

use crate::globals::DimType;
use crate::integer::{get_coprimes, Integer};
use crate::var::Var;

/// A finite sequence of integer coefficients, one per space dimension.
/// Reading beyond the stored length yields zero (`get`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinearExpr {
    row: Vec<Integer>,
}

impl LinearExpr {
    /// The zero expression of dimension 0.
    pub fn new() -> Self {
        LinearExpr { row: Vec::new() }
    }

    /// The zero expression of the given dimension.
    pub fn with_dim(dim: DimType) -> Self {
        LinearExpr { row: vec![Integer::zero(); dim as usize] }
    }

    /// The expression `1 * v`.
    pub fn from_var(v: Var) -> Self {
        let mut e = LinearExpr::with_dim(v.space_dim());
        e.row[v.id() as usize] = Integer::one();
        e
    }

    /// Current space dimension (one past the highest coefficient stored,
    /// not necessarily the highest *nonzero* one).
    pub fn space_dim(&self) -> DimType {
        self.row.len() as DimType
    }

    /// Resizes the backing storage, truncating or zero-extending.
    pub fn set_space_dim(&mut self, dim: DimType) {
        self.row.resize(dim as usize, Integer::zero());
    }

    /// Coefficient of dimension `dim`, or zero if out of range.
    pub fn get(&self, dim: DimType) -> Integer {
        self.row.get(dim as usize).cloned().unwrap_or_else(Integer::zero)
    }

    /// Coefficient of `v`.
    pub fn get_var(&self, v: Var) -> Integer {
        self.get(v.id())
    }

    /// Sets the coefficient of `dim`, extending storage if needed.
    pub fn set(&mut self, dim: DimType, value: Integer) {
        if dim as usize + 1 > self.row.len() {
            self.row.resize(dim as usize + 1, Integer::zero());
        }
        self.row[dim as usize] = value;
    }

    /// Mutable access to the coefficient of `dim` (must be in range).
    pub fn at_mut(&mut self, dim: DimType) -> &mut Integer {
        &mut self.row[dim as usize]
    }

    /// Raw coefficient slice.
    pub fn coeffs(&self) -> &[Integer] {
        &self.row
    }

    /// True iff every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.row.iter().all(|c| c.is_zero())
    }

    /// Index of the first nonzero coefficient in `[first, last)`, or
    /// `last` if none.
    pub fn first_nonzero(&self, first: DimType, last: DimType) -> DimType {
        for i in first..last {
            if !self.get(i).is_zero() {
                return i;
            }
        }
        last
    }

    /// Index of the first nonzero coefficient over the whole row, or
    /// `space_dim()` if the row is zero.
    pub fn first_nonzero_all(&self) -> DimType {
        self.first_nonzero(0, self.space_dim())
    }

    /// Index of the last nonzero coefficient in `[first, last)`, or
    /// `last` if none.
    pub fn last_nonzero(&self, first: DimType, last: DimType) -> DimType {
        let mut i = last;
        while i != first {
            i -= 1;
            if !self.get(i).is_zero() {
                return i;
            }
        }
        last
    }

    /// gcd of the absolute values of the nonzero coefficients in
    /// `[first, last)`, or zero if the range is all zero.
    pub fn gcd(&self, first: DimType, last: DimType) -> Integer {
        let fnz = self.first_nonzero(first, last);
        if fnz == last {
            return Integer::zero();
        }
        let mut res = self.get(fnz).abs();
        if res == 1 {
            return res;
        }
        for i in (fnz + 1)..last {
            let c = self.get(i);
            if !c.is_zero() {
                res = Integer::gcd(&res, &c);
                if res == 1 {
                    return res;
                }
            }
        }
        res
    }

    /// Negates every coefficient in `[first, last)`.
    pub fn negate_range(&mut self, first: DimType, last: DimType) {
        for i in first..last {
            let v = self.get(i);
            self.set(i, -v);
        }
    }

    /// Negates every coefficient.
    pub fn negate(&mut self) {
        for c in &mut self.row {
            c.neg_assign();
        }
    }

    /// Strong-normalizes `(self, inhomo)`: divide both by
    /// `gcd(|coeffs|, |inhomo|)`.
    pub fn normalize(&mut self, inhomo: &mut Integer) {
        let mut g = self.gcd(0, self.space_dim());
        if !inhomo.is_zero() && g != 1 {
            if !g.is_zero() {
                g = Integer::gcd(&g, inhomo);
            } else {
                g = inhomo.abs();
            }
        }
        if g.is_zero() || g == 1 {
            return;
        }
        *inhomo = Integer::exact_div(inhomo, &g);
        for c in &mut self.row {
            *c = Integer::exact_div(c, &g);
        }
    }

    /// Sign-normalizes in place: if the first nonzero coefficient is
    /// negative, negate the whole row (coefficients only).
    pub fn sign_normalize_expr_only(&mut self) {
        let fnz = self.first_nonzero_all();
        if fnz < self.space_dim() && self.get(fnz).is_negative() {
            let sd = self.space_dim();
            self.negate_range(fnz, sd);
        }
    }

    /// Sign-normalizes `(self, inhomo)` together: used for equalities and
    /// lines, where the inhomogeneous term must flip along with the row.
    pub fn sign_normalize(&mut self, inhomo: &mut Integer) {
        let fnz = self.first_nonzero_all();
        if fnz < self.space_dim() && self.get(fnz).is_negative() {
            let sd = self.space_dim();
            self.negate_range(fnz, sd);
            inhomo.neg_assign();
        }
    }

    /// `self += rhs`.
    pub fn add_assign(&mut self, rhs: &LinearExpr) {
        if self.space_dim() < rhs.space_dim() {
            self.set_space_dim(rhs.space_dim());
        }
        for i in 0..rhs.space_dim() {
            let v = &rhs.row[i as usize];
            self.row[i as usize] += v;
        }
    }

    /// `self -= rhs`.
    pub fn sub_assign(&mut self, rhs: &LinearExpr) {
        if self.space_dim() < rhs.space_dim() {
            self.set_space_dim(rhs.space_dim());
        }
        for i in 0..rhs.space_dim() {
            let v = &rhs.row[i as usize];
            self.row[i as usize] -= v;
        }
    }

    /// `self *= n`.
    pub fn mul_assign(&mut self, n: &Integer) {
        for c in &mut self.row {
            *c *= n;
        }
    }

    /// Shifts coefficients of variables `>= start` up by `n` positions
    /// (used when embedding `n` new dimensions at `start`).
    pub fn shift_space_dims(&mut self, start: DimType, n: DimType) {
        let old_sd = self.space_dim();
        self.set_space_dim(old_sd + n);
        let mut pos = old_sd - 1;
        while pos >= start {
            self.row.swap(pos as usize, (pos + n) as usize);
            pos -= 1;
        }
    }

    /// Removes the space dimensions at `sorted_indices`, renumbering the
    /// remainder.
    pub fn remove_space_dims(&mut self, sorted_indices: &[DimType]) {
        let set: std::collections::HashSet<DimType> = sorted_indices.iter().copied().collect();
        let mut new_row = Vec::with_capacity(self.row.len());
        for (i, c) in self.row.iter().enumerate() {
            if !set.contains(&(i as DimType)) {
                new_row.push(c.clone());
            }
        }
        self.row = new_row;
    }

    /// Permutes the coefficients along the cycle described by `cycle`
    /// (a list of dimension indices forming one cyclic permutation),
    /// extending to dimension `d` first if needed.
    pub fn permute_space_dims_cycle(&mut self, cycle: &[DimType], d: DimType) {
        if cycle.len() <= 1 {
            return;
        }
        if cycle.len() == 2 {
            let i = cycle[0] as usize;
            let j = cycle[1] as usize;
            let m = i.max(j) + 1;
            if (self.row.len()) < m {
                self.row.resize(m, Integer::zero());
            }
            self.row.swap(i, j);
            return;
        }
        if self.space_dim() < d {
            self.set_space_dim(d);
        }
        let mut tmp = self.row[*cycle.last().unwrap() as usize].clone();
        for &i in cycle {
            std::mem::swap(&mut self.row[i as usize], &mut tmp);
        }
    }

    /// Equality on the semantic content (ignoring trailing zero padding).
    pub fn is_equal_to(&self, other: &LinearExpr) -> bool {
        let min_dim = self.space_dim().min(other.space_dim());
        for i in 0..min_dim {
            if self.get(i) != other.get(i) {
                return false;
            }
        }
        (min_dim..self.space_dim()).all(|i| self.get(i).is_zero())
            && (min_dim..other.space_dim()).all(|i| self.get(i).is_zero())
    }

    /// The core combination primitive (§4.1): writes into `(x, x_inhomo)`
    /// the row `c'_y * x - c'_x * y` where `c'_x = x_coeff/g`,
    /// `c'_y = y_coeff/g`, `g = gcd(x_coeff, y_coeff)`. Does **not**
    /// strong-normalize the result; the caller does.
    pub fn combine(
        x: &mut LinearExpr,
        x_inhomo: &mut Integer,
        y: &LinearExpr,
        y_inhomo: &Integer,
        x_coeff: &Integer,
        y_coeff: &Integer,
    ) {
        debug_assert!(!x_coeff.is_zero() && !y_coeff.is_zero());
        let (cx, cy) = get_coprimes(x_coeff, y_coeff);
        // x_coprime = -c'_x, y_coprime = c'_y.
        let x_coprime = -cx;
        let y_coprime = cy;

        let x_sd = x.space_dim();
        let y_sd = y.space_dim();
        let min_dim = x_sd.min(y_sd);
        if x_sd < y_sd {
            x.set_space_dim(y_sd);
        }

        let x_is_p1 = x_coprime == 1;
        let x_is_m1 = x_coprime == -1;
        let y_is_p1 = y_coprime == 1;
        let y_is_m1 = y_coprime == -1;

        // result = y_coprime * xi + x_coprime * yi, specialized to avoid
        // multiplications whenever a coprime cofactor is +-1.
        let combine_one = |xi: &Integer, yi: &Integer| -> Integer {
            match (x_is_p1, x_is_m1, y_is_p1, y_is_m1) {
                (true, _, true, _) => xi + yi,
                (true, _, _, true) => -xi + yi,
                (_, true, true, _) => xi - yi,
                (_, true, _, true) => -(xi + yi),
                (true, _, _, _) => &(xi * &y_coprime) + yi,
                (_, true, _, _) => &(xi * &y_coprime) - yi,
                (_, _, true, _) => xi + &(yi * &x_coprime),
                (_, _, _, true) => -xi + &(yi * &x_coprime),
                _ => &(xi * &y_coprime) + &(yi * &x_coprime),
            }
        };

        for i in 0..min_dim {
            let new_i = combine_one(&x.row[i as usize], &y.get(i));
            x.row[i as usize] = new_i;
        }
        if x_sd > min_dim {
            // y contributes 0 beyond its own space dim; apply just the
            // x_old * y_coprime factor to the tail already in x.
            for i in min_dim..x_sd {
                let new_i = combine_one(&x.row[i as usize], &Integer::zero());
                x.row[i as usize] = new_i;
            }
        } else if y_sd > min_dim {
            for i in min_dim..y_sd {
                let new_i = combine_one(&Integer::zero(), &y.get(i));
                x.set(i, new_i);
            }
        }
        let new_inhomo = combine_one(x_inhomo, y_inhomo);
        *x_inhomo = new_inhomo;
    }

    /// Eliminates coordinate `dim` between `self` and `y`, writing the
    /// result (pre-normalization) into `(self, x_inhomo)`.
    pub fn linear_combine(
        &mut self,
        y: &LinearExpr,
        dim: DimType,
        x_inhomo: &mut Integer,
        y_inhomo: &Integer,
    ) {
        debug_assert!(dim < self.space_dim() && dim < y.space_dim());
        let x_coeff = self.get(dim);
        let y_coeff = y.get(dim);
        let x_clone = self.clone();
        LinearExpr::combine(self, x_inhomo, y, y_inhomo, &x_coeff, &y_coeff);
        let _ = x_clone;
    }
}

/// Lexicographic comparison used throughout for canonical ordering of
/// constraint/generator rows: compares coefficients pointwise, treating
/// reads beyond either row's length as zero, but still accounting for a
/// longer row's *sign* in the tail (mirrors the original's `compare`).
pub fn compare(x: &LinearExpr, y: &LinearExpr) -> Ordering {
    let min_dim = x.space_dim().min(y.space_dim());
    for i in 0..min_dim {
        let c = x.get(i).cmp(&y.get(i));
        if c != Ordering::Equal {
            return c;
        }
    }
    for i in min_dim..x.space_dim() {
        let s = x.get(i).sign();
        if s != 0 {
            return s.cmp(&0);
        }
    }
    for i in min_dim..y.space_dim() {
        let s = y.get(i).sign();
        if s != 0 {
            return 0.cmp(&s);
        }
    }
    Ordering::Equal
}
