//! Thread-local default configuration: the topology new polyhedra are
//! built with and the widening specification/implementation applied
//! when callers don't pick one explicitly, mirroring `globals.hh`'s
//! `PPLITE_TLS` triple (`default_topol`, `widen_spec`, `widen_impl`).

use std::cell::Cell;

use crate::globals::{Topol, WidenImpl, WidenSpec};

thread_local! {
    static DEFAULT_TOPOL: Cell<Topol> = Cell::new(Topol::Closed);
    static WIDEN_SPEC: Cell<WidenSpec> = Cell::new(WidenSpec::Safe);
    static WIDEN_IMPL: Cell<WidenImpl> = Cell::new(WidenImpl::H79);
}

/// The topology new polyhedra are built with when none is given
/// explicitly. Defaults to [`Topol::Closed`].
pub fn default_topology() -> Topol {
    DEFAULT_TOPOL.with(|c| c.get())
}

/// Sets this thread's default topology.
pub fn set_default_topology(topol: Topol) {
    DEFAULT_TOPOL.with(|c| c.set(topol));
}

/// Whether widening calls on this thread assume `y \subseteq x`
/// ([`WidenSpec::Risky`]) or first compute the hull
/// ([`WidenSpec::Safe`], the default).
pub fn widen_spec() -> WidenSpec {
    WIDEN_SPEC.with(|c| c.get())
}

/// Sets this thread's widening specification.
pub fn set_widen_spec(spec: WidenSpec) {
    WIDEN_SPEC.with(|c| c.set(spec));
}

/// The widening operator applied on this thread when none is given
/// explicitly. Defaults to [`WidenImpl::H79`].
pub fn widen_impl() -> WidenImpl {
    WIDEN_IMPL.with(|c| c.get())
}

/// Sets this thread's default widening operator.
pub fn set_widen_impl(imp: WidenImpl) {
    WIDEN_IMPL.with(|c| c.set(imp));
}
