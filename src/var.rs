//! Space dimension handles ([`Var`]) and sets of dimensions ([`VarSet`]).

use fixedbitset::FixedBitSet;

use crate::globals::DimType;

/// A single space dimension, identified by a zero-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var {
    id: DimType,
}

impl Var {
    /// Builds the variable with the given id (`id >= 0`).
    pub fn new(id: DimType) -> Self {
        debug_assert!(id >= 0, "Var: negative id");
        Var { id }
    }

    /// The variable's zero-based id.
    pub fn id(&self) -> DimType {
        self.id
    }

    /// The space dimension required to name this variable, i.e. `id + 1`.
    pub fn space_dim(&self) -> DimType {
        self.id + 1
    }
}

/// A set of variables, represented as a [`FixedBitSet`] of their ids,
/// grown on demand. A small fixed-universe scratch set (of the kind
/// `conversion.rs` builds per conversion step), unlike the growable,
/// word-trimmed [`crate::bits::Bits`] used for the long-lived
/// saturation/support bitsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarSet(FixedBitSet);

impl Default for VarSet {
    fn default() -> Self {
        VarSet::new()
    }
}

impl VarSet {
    /// The empty set.
    pub fn new() -> Self {
        VarSet(FixedBitSet::new())
    }

    /// Inserts `var` into the set, growing the backing bitset if needed.
    pub fn insert(&mut self, var: Var) {
        let id = var.id() as usize;
        if id >= self.0.len() {
            self.0.grow(id + 1);
        }
        self.0.insert(id);
    }

    /// True iff `var` is a member.
    pub fn contains(&self, var: Var) -> bool {
        let id = var.id() as usize;
        id < self.0.len() && self.0.contains(id)
    }

    /// Iterates the member ids in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = DimType> + '_ {
        self.0.ones().map(|i| i as DimType)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }

    /// True iff no members.
    pub fn is_empty(&self) -> bool {
        self.0.count_ones(..) == 0
    }
}

impl FromIterator<Var> for VarSet {
    fn from_iter<I: IntoIterator<Item = Var>>(iter: I) -> Self {
        let mut s = VarSet::new();
        for v in iter {
            s.insert(v);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_set_basics() {
        let mut s = VarSet::new();
        s.insert(Var::new(2));
        s.insert(Var::new(0));
        assert!(s.contains(Var::new(0)));
        assert!(!s.contains(Var::new(1)));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 2]);
    }
}
