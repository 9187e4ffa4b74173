//! `Poly`: a double-description convex polyhedron, the crate's central
//! type. Holds both representations (`cs`, `gs`) plus their saturation
//! matrices, and — for whichever side was mutated last — a persistent
//! [`Cone`] that lets the next same-direction mutation extend the
//! existing combinatorial state instead of reprocessing every row
//! already accounted for. See the module-level note below and
//! `DESIGN.md`.

pub mod iter;
pub mod ops;
pub mod split;
pub mod widen;

use crate::con::{Con, ConType};
use crate::conversion::{con_to_row, cone_to_cons, cone_to_gens, cons_from_gens, gen_to_row, Cone};
use crate::gen::{Gen, GenType};
use crate::globals::{DimType, SpecElem, Status, Topol};
use crate::sat::Sat;
use crate::simplify::{build_sat_c, build_sat_g, simplify_cons, simplify_gens};
use crate::system::{ConSys, GenSys};

/// A convex polyhedron over exact rational coordinates, represented by
/// both its constraint and generator systems.
///
/// Every public mutator (`add_con`, `add_gens`, the ops in
/// [`ops`]/[`split`]/[`widen`], ...) leaves `self` fully minimized and
/// consistent before returning: there is no `Pending` status observable
/// *between* calls. `status` is still genuinely set to
/// [`Status::Pending`] for the duration of a mutator call, while rows
/// are being folded into the mutated side's cone and before the other
/// representation has been re-derived — this is the bounded, always-
/// resolved-by-return-time form of the original's lazily-deferred dual
/// representation, traded for a state machine that is trivially easy to
/// keep correct across the crate's much larger surface of operations;
/// see `DESIGN.md`.
///
/// Internally, `cs_cone`/`gs_cone` are *not* guaranteed to reflect `cs`/
/// `gs` at rest (`cs_cone_ok`/`gs_cone_ok` track which one, if either,
/// does): whichever direction was extended by the most recent mutator
/// keeps its cone valid and ready for the next same-direction call;
/// the opposite direction's cone is marked stale and rebuilt from
/// scratch, once, the next time that direction is mutated (constraints
/// and generators are not interchangeably incremental — adding a
/// generator can only grow the polar cone's defining inequalities, but
/// adding a constraint can *remove* generators non-monotonically, which
/// invalidates any cone that was assuming monotonic growth).
#[derive(Clone, Debug)]
pub struct Poly {
    dim: DimType,
    topology: Topol,
    status: Status,
    cs: ConSys,
    gs: GenSys,
    sat_c: Sat,
    sat_g: Sat,
    cs_cone: Cone,
    cs_cone_ok: bool,
    gs_cone: Cone,
    gs_cone_ok: bool,
}

impl Poly {
    fn from_systems(dim: DimType, topology: Topol, cs: ConSys, gs: GenSys) -> Poly {
        let sat_c = build_sat_c(&cs, &gs);
        let sat_g = build_sat_g(&cs, &gs);
        Poly {
            dim,
            topology,
            status: Status::Minimized,
            cs,
            gs,
            sat_c,
            sat_g,
            cs_cone: Cone::seed_primal(dim),
            cs_cone_ok: false,
            gs_cone: Cone::seed_polar(dim),
            gs_cone_ok: false,
        }
    }

    fn empty_poly(dim: DimType, topology: Topol) -> Poly {
        let mut cs = ConSys::new();
        cs.sing_rows.push(Con::zero_dim_false());
        Poly {
            dim,
            topology,
            status: Status::Empty,
            cs,
            gs: GenSys::new(),
            sat_c: Sat::new(0, 1),
            sat_g: Sat::new(1, 0),
            cs_cone: Cone::seed_primal(dim),
            cs_cone_ok: false,
            gs_cone: Cone::seed_polar(dim),
            gs_cone_ok: false,
        }
    }

    /// Rebuilds `cs_cone` from `cs` if it is not already known to
    /// reflect it.
    fn ensure_cs_cone(&mut self) {
        if self.cs_cone_ok {
            return;
        }
        let mut cone = Cone::seed_primal(self.dim);
        let rows: Vec<_> = cs_flat(&self.cs).iter().map(con_to_row).collect();
        cone.extend(&rows);
        self.cs_cone = cone;
        self.cs_cone_ok = true;
    }

    /// Rebuilds `gs_cone` from `gs` if it is not already known to
    /// reflect it.
    fn ensure_gs_cone(&mut self) {
        if self.gs_cone_ok {
            return;
        }
        let mut cone = Cone::seed_polar(self.dim);
        let rows: Vec<_> = gs_flat(&self.gs).iter().map(gen_to_row).collect();
        cone.extend(&rows);
        self.gs_cone = cone;
        self.gs_cone_ok = true;
    }

    /// Builds a polyhedron from a distinguished element (`Empty` or
    /// `Universe`) at the given dimension.
    pub fn new(dim: DimType, topology: Topol, elem: SpecElem) -> Poly {
        match elem {
            SpecElem::Empty => Poly::empty_poly(dim, topology),
            SpecElem::Universe => Poly::from_cons(dim, topology, Vec::new()),
        }
    }

    /// The whole `dim`-dimensional space.
    pub fn universe(dim: DimType, topology: Topol) -> Poly {
        Poly::new(dim, topology, SpecElem::Universe)
    }

    /// The empty polyhedron in `dim` dimensions.
    pub fn empty(dim: DimType, topology: Topol) -> Poly {
        Poly::new(dim, topology, SpecElem::Empty)
    }

    /// Builds a polyhedron as the solution set of `cons`.
    pub fn from_cons(dim: DimType, topology: Topol, cons: Vec<Con>) -> Poly {
        let mut cone = Cone::seed_primal(dim);
        let rows: Vec<_> = cons.iter().map(con_to_row).collect();
        cone.extend(&rows);
        if cone.is_empty() {
            return Poly::empty_poly(dim, topology);
        }
        let gens = cone_to_gens(&cone, &cons);
        let gs = simplify_gens(dim, gens);
        let cs = simplify_cons(dim, cons_from_gens(&gs_flat(&gs), dim));
        let mut p = Poly::from_systems(dim, topology, cs, gs);
        p.cs_cone = cone;
        p.cs_cone_ok = true;
        p
    }

    /// Builds a polyhedron as the convex set generated by `gens`. Per
    /// §3's representation invariant, `gens` must contain at least one
    /// point or closure point unless it is meant to describe the empty
    /// set (an all-lines-and-rays list with no point is treated as
    /// empty, matching the original's `Gens_Info::check_point`).
    pub fn from_gens(dim: DimType, topology: Topol, gens: Vec<Gen>) -> Poly {
        if !gens.iter().any(Gen::is_point_or_closure_point) {
            return Poly::empty_poly(dim, topology);
        }
        let mut cone = Cone::seed_polar(dim);
        let rows: Vec<_> = gens.iter().map(gen_to_row).collect();
        cone.extend(&rows);
        let cons = cone_to_cons(&cone, &gens);
        let gs = simplify_gens(dim, gens);
        let cs = simplify_cons(dim, cons);
        let mut p = Poly::from_systems(dim, topology, cs, gs);
        p.gs_cone = cone;
        p.gs_cone_ok = true;
        p
    }

    /// Ambient space dimension.
    pub fn space_dim(&self) -> DimType {
        self.dim
    }

    /// Topology (`Closed` or `Nnc`).
    pub fn topology(&self) -> Topol {
        self.topology
    }

    /// `dim - rank(equalities)`: the dimension of the affine hull.
    pub fn affine_dim(&self) -> DimType {
        if self.is_empty() {
            return 0;
        }
        self.dim - self.cs.sing_rows.len() as DimType
    }

    /// True iff the solution set is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self.status, Status::Empty)
    }

    /// True iff this is the whole ambient space.
    pub fn is_universe(&self) -> bool {
        !self.is_empty() && self.cs.is_empty()
    }

    /// True iff the polyhedron has no strict constraints and no closure
    /// points (is in fact topologically closed, regardless of nominal
    /// topology tag).
    pub fn is_topologically_closed(&self) -> bool {
        self.is_empty()
            || (self.cs.sk_rows.iter().all(|c| !c.is_strict_inequality())
                && self.gs.sk_rows.iter().all(|g| !g.is_closure_point()))
    }

    /// Read-only access to the constraint system.
    pub fn cons(&self) -> &ConSys {
        &self.cs
    }

    /// Read-only access to the generator system.
    pub fn gens(&self) -> &GenSys {
        &self.gs
    }

    /// A no-op query: this port re-minimizes eagerly on every mutator
    /// call, so there is never outstanding work to flush. Kept for API
    /// parity with the original's `minimize`/`update_*` entry points,
    /// which callers ported from the original may still call
    /// defensively.
    pub fn minimize(&mut self) -> bool {
        !self.is_empty()
    }

    /// Adds a single constraint (conjunction).
    pub fn add_con(&mut self, c: Con) {
        self.add_cons(vec![c]);
    }

    /// Adds several constraints at once (conjunction of all of them
    /// with the current polyhedron). Only the new rows in `cons` are
    /// walked through the combinatorial conversion step: the existing
    /// constraint-side cone (if valid) is extended in place rather than
    /// rebuilt from `cs` plus `cons` from scratch.
    pub fn add_cons(&mut self, mut cons: Vec<Con>) {
        if self.is_empty() || cons.is_empty() {
            return;
        }
        debug_assert!(cons.iter().all(|c| c.space_dim() <= self.dim));
        for c in &mut cons {
            c.set_space_dim(self.dim);
        }

        self.status = Status::Pending;
        self.ensure_cs_cone();
        let rows: Vec<_> = cons.iter().map(con_to_row).collect();
        self.cs_cone.extend(&rows);

        if self.cs_cone.is_empty() {
            *self = Poly::empty_poly(self.dim, self.topology);
            return;
        }

        let mut all_cons = cs_flat(&self.cs);
        all_cons.extend(cons);
        let gens = cone_to_gens(&self.cs_cone, &all_cons);
        let gs = simplify_gens(self.dim, gens);
        let cs = simplify_cons(self.dim, cons_from_gens(&gs_flat(&gs), self.dim));

        let cs_cone = std::mem::replace(&mut self.cs_cone, Cone::seed_primal(self.dim));
        *self = Poly::from_systems(self.dim, self.topology, cs, gs);
        self.cs_cone = cs_cone;
        self.cs_cone_ok = true;
        self.gs_cone_ok = false;
    }

    /// Adds a single generator (extends the convex set).
    pub fn add_gen(&mut self, g: Gen) {
        self.add_gens(vec![g]);
    }

    /// Adds several generators at once. Only the new rows in `gens` are
    /// walked through the combinatorial conversion step: the existing
    /// generator-side (polar) cone, if valid, is extended in place.
    pub fn add_gens(&mut self, mut gens: Vec<Gen>) {
        if gens.is_empty() {
            return;
        }
        debug_assert!(gens.iter().all(|g| g.space_dim() <= self.dim));
        for g in &mut gens {
            g.set_space_dim(self.dim);
        }

        let mut all_gens = if self.is_empty() { Vec::new() } else { gs_flat(&self.gs) };
        all_gens.extend(gens.clone());
        if !all_gens.iter().any(Gen::is_point_or_closure_point) {
            *self = Poly::empty_poly(self.dim, self.topology);
            return;
        }

        self.status = Status::Pending;
        self.ensure_gs_cone();
        let rows: Vec<_> = gens.iter().map(gen_to_row).collect();
        self.gs_cone.extend(&rows);

        let cons = cone_to_cons(&self.gs_cone, &all_gens);
        let gs = simplify_gens(self.dim, all_gens);
        let cs = simplify_cons(self.dim, cons);

        let gs_cone = std::mem::replace(&mut self.gs_cone, Cone::seed_polar(self.dim));
        *self = Poly::from_systems(self.dim, self.topology, cs, gs);
        self.gs_cone = gs_cone;
        self.gs_cone_ok = true;
        self.cs_cone_ok = false;
    }

    /// Structural equality of the represented convex sets (both being
    /// minimized, this reduces to equal canonical constraint systems).
    pub fn equals(&self, other: &Poly) -> bool {
        if self.dim != other.dim {
            return false;
        }
        if self.is_empty() || other.is_empty() {
            return self.is_empty() == other.is_empty();
        }
        cs_flat(&self.cs) == cs_flat(&other.cs)
    }

    /// `self subseteq other` (every constraint of `other` is implied by
    /// `self`'s generators).
    pub fn contains(&self, other: &Poly) -> bool {
        debug_assert_eq!(self.dim, other.dim);
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        cs_flat(&other.cs).iter().all(|c| self.satisfies(c))
    }

    pub(crate) fn satisfies(&self, c: &Con) -> bool {
        gs_flat(&self.gs).iter().all(|g| {
            let sp = crate::conversion::con_gen_scalar_prod(c, g);
            match c.con_type() {
                ConType::Equality => sp.is_zero(),
                ConType::NonStrictIneq => !sp.is_negative(),
                ConType::StrictIneq => sp.is_positive() || g.is_line(),
            }
        })
    }
}

pub(crate) fn cs_flat(cs: &ConSys) -> Vec<Con> {
    cs.sing_rows.iter().cloned().chain(cs.sk_rows.iter().cloned()).collect()
}

pub(crate) fn gs_flat(gs: &GenSys) -> Vec<Gen> {
    gs.sing_rows.iter().cloned().chain(gs.sk_rows.iter().cloned()).collect()
}
