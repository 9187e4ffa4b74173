//! Generators: `(expr, inhomo, type)` triples with
//! `type in {LINE, RAY, POINT, CPOINT}`. For `POINT`/`CPOINT`, `inhomo`
//! is the strictly positive divisor.

use std::cmp::Ordering;

use crate::globals::DimType;
use crate::integer::Integer;
use crate::linear_expr::{self, LinearExpr};
use crate::var::Var;

/// The kind of a generator row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenType {
    /// A line (spans both directions); `inhomo` is unused (kept at 0).
    Line,
    /// A ray (spans one direction from the origin).
    Ray,
    /// A point, `expr / inhomo`.
    Point,
    /// A closure point (NNC-only): the limit of a strict region.
    ClosurePoint,
}

/// A generator in strong-normalized canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gen {
    expr: LinearExpr,
    inhomo: Integer,
    ty: GenType,
}

impl Gen {
    /// Builds a generator, strong-normalizing it immediately. Non-line
    /// generators require a strictly positive `inhomo`, which is
    /// enforced here by negating `(expr, inhomo)` together if needed.
    pub fn new(ty: GenType, mut expr: LinearExpr, mut inhomo: Integer) -> Self {
        if inhomo.is_negative() {
            expr.negate();
            inhomo.neg_assign();
        }
        let mut g = Gen { expr, inhomo, ty };
        g.strong_normalize();
        g
    }

    /// The origin point `(0,...,0)/1`.
    pub fn point_origin(dim: DimType) -> Self {
        Gen::new(GenType::Point, LinearExpr::with_dim(dim), Integer::one())
    }

    /// A ray along `v`.
    pub fn ray_along(v: Var) -> Self {
        Gen::new(GenType::Ray, LinearExpr::from_var(v), Integer::zero())
    }

    /// A line along `v`.
    pub fn line_along(v: Var) -> Self {
        Gen::new(GenType::Line, LinearExpr::from_var(v), Integer::zero())
    }

    /// Space dimension of the underlying linear expression.
    pub fn space_dim(&self) -> DimType {
        self.expr.space_dim()
    }
    /// Resizes the underlying expression.
    pub fn set_space_dim(&mut self, dim: DimType) {
        self.expr.set_space_dim(dim);
    }

    /// The generator kind.
    pub fn gen_type(&self) -> GenType {
        self.ty
    }
    /// Overwrites the generator kind without touching the row.
    pub fn set_type(&mut self, ty: GenType) {
        self.ty = ty;
    }

    /// True iff a line.
    pub fn is_line(&self) -> bool {
        self.ty == GenType::Line
    }
    /// True iff a ray.
    pub fn is_ray(&self) -> bool {
        self.ty == GenType::Ray
    }
    /// True iff a point.
    pub fn is_point(&self) -> bool {
        self.ty == GenType::Point
    }
    /// True iff a closure point.
    pub fn is_closure_point(&self) -> bool {
        self.ty == GenType::ClosurePoint
    }
    /// True iff a line or a ray (the "singular or skeleton-direction"
    /// rows with no associated divisor).
    pub fn is_line_or_ray(&self) -> bool {
        matches!(self.ty, GenType::Line | GenType::Ray)
    }
    /// True iff a point or closure point.
    pub fn is_point_or_closure_point(&self) -> bool {
        !self.is_line_or_ray()
    }
    /// Lines double as the "singular" rows of a generator system.
    pub fn is_line_or_equality(&self) -> bool {
        self.is_line()
    }

    /// The underlying linear expression.
    pub fn linear_expr(&self) -> &LinearExpr {
        &self.expr
    }
    /// Mutable access (caller must re-normalize afterwards).
    pub fn linear_expr_mut(&mut self) -> &mut LinearExpr {
        &mut self.expr
    }
    /// Coefficient of `v`.
    pub fn coeff(&self, v: Var) -> Integer {
        self.expr.get_var(v)
    }
    /// The (always `>= 1`) divisor of a point/closure-point.
    pub fn divisor(&self) -> &Integer {
        debug_assert!(!self.is_line_or_ray());
        &self.inhomo
    }

    fn sign_normalize(&mut self) {
        if self.is_line() {
            self.expr.sign_normalize(&mut self.inhomo);
        }
    }

    /// Strong-normalizes `(expr, inhomo)` and, for lines, the sign.
    pub fn strong_normalize(&mut self) {
        if self.is_line_or_ray() {
            self.inhomo = Integer::zero();
            let g = self.expr.gcd(0, self.expr.space_dim());
            if !g.is_zero() && g != 1 {
                let sd = self.expr.space_dim();
                for i in 0..sd {
                    let v = self.expr.get(i);
                    self.expr.set(i, Integer::exact_div(&v, &g));
                }
            }
        } else {
            self.expr.normalize(&mut self.inhomo);
            if self.inhomo.is_zero() {
                self.inhomo = Integer::one();
            }
        }
        self.sign_normalize();
    }

    /// Eliminates coordinate `dim` between `self` and `y`, re-normalizing
    /// afterwards.
    pub fn linear_combine(&mut self, y: &Gen, dim: DimType) {
        let mut inhomo = self.inhomo.clone();
        self.expr.linear_combine(&y.expr, dim, &mut inhomo, &y.inhomo);
        self.inhomo = inhomo;
        self.strong_normalize();
    }

    /// Structural (post-normalization) equality.
    pub fn is_equal_to(&self, y: &Gen) -> bool {
        self.ty == y.ty && self.expr.is_equal_to(&y.expr) && self.inhomo == y.inhomo
    }
}

impl PartialEq for Gen {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}
impl Eq for Gen {}

impl PartialOrd for Gen {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare(self, other))
    }
}
impl Ord for Gen {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

fn type_rank(t: GenType) -> u8 {
    match t {
        GenType::Line => 0,
        GenType::Ray => 1,
        GenType::ClosurePoint => 2,
        GenType::Point => 3,
    }
}

/// Canonical comparator: lines, then rays, then closure points, then
/// points; within a class, lexicographic on the row and then divisor.
pub fn compare(x: &Gen, y: &Gen) -> Ordering {
    let rx = type_rank(x.ty);
    let ry = type_rank(y.ty);
    if rx != ry {
        return rx.cmp(&ry);
    }
    let r = linear_expr::compare(&x.expr, &y.expr);
    if r != Ordering::Equal {
        return r;
    }
    x.inhomo.cmp(&y.inhomo)
}
