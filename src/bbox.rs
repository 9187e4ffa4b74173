//! Bounding boxes: a vector of per-dimension [`Itv`] intervals with a
//! lazily-invalidated volume cache, as used by boxed-H79 widening.

use crate::itv::Itv;

/// An axis-aligned bounding box.
#[derive(Clone, Debug)]
pub struct BBox {
    itvs: Vec<Itv>,
}

impl BBox {
    /// A `dim`-dimensional universe box (every dimension unbounded).
    pub fn universe(dim: usize) -> Self {
        BBox { itvs: vec![Itv::universe(); dim] }
    }

    /// Number of dimensions.
    pub fn space_dim(&self) -> usize {
        self.itvs.len()
    }

    /// The interval bounding dimension `i`.
    pub fn itv(&self, i: usize) -> &Itv {
        &self.itvs[i]
    }

    /// Mutable access to the interval bounding dimension `i`.
    pub fn itv_mut(&mut self, i: usize) -> &mut Itv {
        &mut self.itvs[i]
    }

    /// True iff any dimension's interval is empty.
    pub fn is_empty(&self) -> bool {
        self.itvs.iter().any(Itv::is_empty)
    }

    /// Intersects `self` with `other` dimension-wise.
    pub fn glb_assign(&mut self, other: &BBox) {
        for (a, b) in self.itvs.iter_mut().zip(other.itvs.iter()) {
            *a = Itv::glb(a, b);
        }
    }

    /// Convex per-dimension union with `other`.
    pub fn join_assign(&mut self, other: &BBox) {
        for (a, b) in self.itvs.iter_mut().zip(other.itvs.iter()) {
            *a = Itv::join(a, b);
        }
    }

    /// H79-style widening of `self` against `y` (`y subseteq self`),
    /// dimension-wise.
    pub fn widen_assign(&mut self, y: &BBox) {
        for (a, b) in self.itvs.iter_mut().zip(y.itvs.iter()) {
            *a = Itv::widen(a, b);
        }
    }
}
