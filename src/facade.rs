//! A polymorphic façade over a concrete polyhedron representation.
//!
//! The original wraps several alternative engines (box-augmented,
//! factored-product, powerset) behind one run-time-tagged handle.
//! Those engines are full alternative domains built *on top of* this
//! crate's core and are out of scope here (see `DESIGN.md`); only the
//! dispatch shape is kept, with [`Poly_`] the single populated
//! variant. `Boxed`/`Factored` stay as unimplemented placeholders so
//! the enum documents the intended extension point without pretending
//! to implement it, and `Stats` simply forwards to the wrapped `Poly`.

use crate::con::Con;
use crate::gen::Gen;
use crate::globals::{DimType, Topol};
use crate::poly::Poly;

/// A run-time-tagged polyhedron handle. Binary operations require both
/// sides to carry the same variant; see [`Facade::same_kind`].
#[derive(Clone, Debug)]
pub enum Facade {
    /// A plain polyhedron: the only variant with full semantics here.
    Poly_(Poly),
    /// Bounding-box-augmented representation: not implemented by this
    /// port (see `DESIGN.md`).
    Boxed,
    /// Factored-product representation: not implemented by this port.
    Factored,
    /// A statistics-only wrapper over a plain polyhedron.
    Stats(Poly),
}

impl Facade {
    /// Wraps a plain polyhedron.
    pub fn from_poly(p: Poly) -> Self {
        Facade::Poly_(p)
    }

    /// True iff `self` and `other` carry the same variant (the
    /// precondition for any binary operation).
    pub fn same_kind(&self, other: &Facade) -> bool {
        matches!(
            (self, other),
            (Facade::Poly_(_), Facade::Poly_(_))
                | (Facade::Boxed, Facade::Boxed)
                | (Facade::Factored, Facade::Factored)
                | (Facade::Stats(_), Facade::Stats(_))
        )
    }

    /// Space dimension, forwarded to the wrapped polyhedron.
    pub fn space_dim(&self) -> DimType {
        match self {
            Facade::Poly_(p) | Facade::Stats(p) => p.space_dim(),
            Facade::Boxed | Facade::Factored => unimplemented!("alternative domain not part of this port"),
        }
    }

    /// True iff empty, forwarded to the wrapped polyhedron.
    pub fn is_empty(&self) -> bool {
        match self {
            Facade::Poly_(p) | Facade::Stats(p) => p.is_empty(),
            Facade::Boxed | Facade::Factored => unimplemented!("alternative domain not part of this port"),
        }
    }

    /// Intersects in place; panics if `other` is not the same variant.
    pub fn intersection_assign(&mut self, other: &Facade) {
        assert!(self.same_kind(other), "mixed facade kinds in intersection_assign");
        match (self, other) {
            (Facade::Poly_(a), Facade::Poly_(b)) => a.intersection_assign(b),
            (Facade::Stats(a), Facade::Stats(b)) => a.intersection_assign(b),
            _ => unimplemented!("alternative domain not part of this port"),
        }
    }

    /// The wrapped constraint system, if this is a `Poly_`/`Stats`
    /// variant.
    pub fn cons(&self) -> Option<Vec<Con>> {
        match self {
            Facade::Poly_(p) | Facade::Stats(p) => Some(p.cons_iter().collect()),
            Facade::Boxed | Facade::Factored => None,
        }
    }

    /// The wrapped generator system, if this is a `Poly_`/`Stats`
    /// variant.
    pub fn gens(&self) -> Option<Vec<Gen>> {
        match self {
            Facade::Poly_(p) | Facade::Stats(p) => Some(p.gens_iter().collect()),
            Facade::Boxed | Facade::Factored => None,
        }
    }
}

/// The universe polyhedron, wrapped in the plain façade variant.
pub fn universe(dim: DimType, topol: Topol) -> Facade {
    Facade::Poly_(Poly::universe(dim, topol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_rejects_mixed_variants() {
        let a = Facade::Poly_(Poly::universe(1, Topol::Closed));
        let b = Facade::Stats(Poly::universe(1, Topol::Closed));
        assert!(!a.same_kind(&b));
    }

    #[test]
    fn intersection_assign_forwards_to_the_wrapped_poly() {
        let mut a = universe(1, Topol::Closed);
        let b = universe(1, Topol::Closed);
        a.intersection_assign(&b);
        assert!(!a.is_empty());
    }

    #[test]
    fn cons_and_gens_are_available_for_the_plain_variant() {
        let f = universe(2, Topol::Closed);
        assert!(f.cons().is_some());
        assert!(f.gens().is_some());
    }
}
