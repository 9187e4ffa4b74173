//! A lightweight library for computing with convex polyhedra over
//! exact rational coordinates, built around a Chernikova-style
//! double-description (DD) engine: a convex set is kept in two dual
//! representations (a constraint system and a generator system), with
//! saturation bitsets linking them. Adding constraints or generators
//! folds each new row into the matching-direction representation one
//! row at a time rather than rebuilding it from scratch; the opposite
//! representation is then re-derived from the result, so a run of
//! additions in one direction is genuinely incremental while a switch
//! of direction pays for one fresh conversion.
//!
//! The central type is [`poly::Poly`]. Constraints ([`con::Con`]) and
//! generators ([`gen::Gen`]) are built over [`var::Var`]-indexed
//! [`linear_expr::LinearExpr`]s with [`integer::Integer`] (arbitrary
//! precision) coefficients; [`rational::Rational`] and [`itv::Itv`]/
//! [`bbox::BBox`] support boxed widening and interval queries.
//!
//! ```
//! use pplite::con::{Con, ConType};
//! use pplite::globals::Topol;
//! use pplite::integer::Integer;
//! use pplite::linear_expr::LinearExpr;
//! use pplite::poly::Poly;
//!
//! let mut x = LinearExpr::new();
//! x.set(0, Integer::one());
//! let x_ge_0 = Con::new(x.clone(), Integer::zero(), ConType::NonStrictIneq);
//! let mut neg_x = x.clone();
//! neg_x.negate();
//! let x_le_1 = Con::new(neg_x, Integer::one(), ConType::NonStrictIneq);
//!
//! let unit_interval = Poly::from_cons(1, Topol::Closed, vec![x_ge_0, x_le_1]);
//! assert!(!unit_interval.is_empty());
//! assert_eq!(unit_interval.affine_dim(), 1);
//! ```

#[cfg(test)]
mod test_util;

pub mod bbox;
pub mod bits;
pub mod con;
pub mod config;
pub mod conversion;
pub mod dump;
pub mod facade;
pub mod gen;
pub mod globals;
pub mod integer;
pub mod itv;
pub mod linear_expr;
pub mod poly;
pub mod rational;
pub mod sat;
pub mod simplify;
pub mod system;
pub mod var;

use std::fmt;

pub use crate::con::Con;
pub use crate::gen::Gen;
pub use crate::poly::Poly;

/// Errors surfaced by this library's external-facing operations: the
/// ascii dump/load format and API boundaries that accept externally
/// built rows (see `DESIGN.md`). Programming-error preconditions
/// (mismatched dimensions passed directly between in-process calls,
/// negative dimensions) are `debug_assert!`-checked instead, matching
/// the teacher's avoidance of panics in its own public API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed ascii dump/load input; the message names the token or
    /// section that failed to parse.
    DumpFormat(String),

    /// A row loaded from ascii input, or otherwise given to a
    /// dimension-sensitive API boundary, has the wrong space
    /// dimension.
    DimensionMismatch {
        /// Expected space dimension.
        expected: crate::globals::DimType,
        /// Space dimension actually found.
        got: crate::globals::DimType,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DumpFormat(msg) => write!(f, "ascii dump/load error: {msg}"),
            Error::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for Error {}
