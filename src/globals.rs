//! Crate-wide scalar types and enums shared by every module, mirroring
//! `globals.hh` in the original.

/// The integer type used for space dimensions and row/column indices.
/// Signed (matching the original's `dim_type`) so that `-1` can serve as a
/// sentinel in a couple of internal helpers.
pub type DimType = i32;

/// Sentinel meaning "not a dimension".
pub const fn not_a_dim() -> DimType {
    -1
}

/// Topology of a polyhedron: topologically closed, or not-necessarily-closed
/// (admits strict inequalities and closure points).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topol {
    /// C-polyhedron.
    Closed,
    /// NNC-polyhedron.
    Nnc,
}

/// Distinguished element used when building a polyhedron "from scratch".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecElem {
    /// The empty polyhedron.
    Empty,
    /// The universe (whole space).
    Universe,
}

/// Whether a widening call may assume `y \subseteq x` (risky) or must first
/// establish it by computing a convex hull (safe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidenSpec {
    /// Caller guarantees `y \subseteq x`.
    Risky,
    /// Lift by first computing `x := x \sqcup y`.
    Safe,
}

/// Which widening operator to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidenImpl {
    /// Plain H79.
    H79,
    /// Bounding-box-assisted H79.
    BoxedH79,
    /// BHRZ03 with certificate-guarded refinements.
    Bhrz03,
}

/// Three-valued logic used by a couple of relational queries that may be
/// unable to decide without further (possibly expensive) work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TvBool {
    /// Undetermined.
    DontKnow,
    /// Definitely false.
    False,
    /// Definitely true.
    True,
}

/// Status of a `Poly`'s dual representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The polyhedron is empty; only `cs.sing_rows` (a single false
    /// constraint) is meaningful.
    Empty,
    /// Both representations are up to date and minimized.
    Minimized,
    /// One side has pending rows not yet reflected in the other.
    Pending,
}
