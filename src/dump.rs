//! Ascii dump/load: a human-readable, round-trippable text rendering
//! of constraints, generators and polyhedra, in the line-oriented
//! `keyword value` style the original library's debugging dumps use
//! (`Linear_Expr::ascii_dump`'s `"dim N : c0 c1 ..."`), kept here
//! because it is the one external I/O surface in scope.

use std::fmt::Write as _;

use crate::con::{Con, ConType};
use crate::gen::{Gen, GenType};
use crate::globals::{DimType, Topol};
use crate::integer::Integer;
use crate::linear_expr::LinearExpr;
use crate::poly::Poly;
use crate::Error;

fn con_type_tag(ty: ConType) -> &'static str {
    match ty {
        ConType::Equality => "EQ",
        ConType::NonStrictIneq => "NSI",
        ConType::StrictIneq => "SI",
    }
}

fn gen_type_tag(ty: GenType) -> &'static str {
    match ty {
        GenType::Line => "LINE",
        GenType::Ray => "RAY",
        GenType::Point => "POINT",
        GenType::ClosurePoint => "CPOINT",
    }
}

fn parse_con_type(tag: &str) -> Result<ConType, Error> {
    match tag {
        "EQ" => Ok(ConType::Equality),
        "NSI" => Ok(ConType::NonStrictIneq),
        "SI" => Ok(ConType::StrictIneq),
        _ => Err(Error::DumpFormat(format!("unknown constraint type {tag:?}"))),
    }
}

fn parse_gen_type(tag: &str) -> Result<GenType, Error> {
    match tag {
        "LINE" => Ok(GenType::Line),
        "RAY" => Ok(GenType::Ray),
        "POINT" => Ok(GenType::Point),
        "CPOINT" => Ok(GenType::ClosurePoint),
        _ => Err(Error::DumpFormat(format!("unknown generator type {tag:?}"))),
    }
}

fn dump_expr(out: &mut String, e: &LinearExpr) {
    write!(out, "dim {} :", e.space_dim()).unwrap();
    for i in 0..e.space_dim() {
        write!(out, " {}", e.get(i)).unwrap();
    }
}

fn parse_expr<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<LinearExpr, Error> {
    let tag = tokens.next().ok_or_else(|| Error::DumpFormat("expected \"dim\"".into()))?;
    if tag != "dim" {
        return Err(Error::DumpFormat(format!("expected \"dim\", got {tag:?}")));
    }
    let dim: DimType = tokens
        .next()
        .ok_or_else(|| Error::DumpFormat("expected a dimension".into()))?
        .parse()
        .map_err(|_| Error::DumpFormat("malformed dimension".into()))?;
    let colon = tokens.next().ok_or_else(|| Error::DumpFormat("expected \":\"".into()))?;
    if colon != ":" {
        return Err(Error::DumpFormat(format!("expected \":\", got {colon:?}")));
    }
    let mut e = LinearExpr::with_dim(dim);
    for i in 0..dim {
        let tok = tokens.next().ok_or_else(|| Error::DumpFormat("missing coefficient".into()))?;
        let v: i64 = tok.parse().map_err(|_| Error::DumpFormat(format!("malformed coefficient {tok:?}")))?;
        e.set(i, Integer::from_i64(v));
    }
    Ok(e)
}

/// Renders a single constraint as one line: `con <type> <expr> inhomo <n>`.
pub fn dump_con(c: &Con) -> String {
    let mut out = String::new();
    write!(out, "con {} ", con_type_tag(c.con_type())).unwrap();
    dump_expr(&mut out, c.linear_expr());
    write!(out, " inhomo {}", c.inhomo_term()).unwrap();
    out
}

/// Parses a single constraint previously produced by [`dump_con`].
pub fn load_con(line: &str) -> Result<Con, Error> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().ok_or_else(|| Error::DumpFormat("empty constraint line".into()))?;
    if head != "con" {
        return Err(Error::DumpFormat(format!("expected \"con\", got {head:?}")));
    }
    let ty = parse_con_type(tokens.next().ok_or_else(|| Error::DumpFormat("missing constraint type".into()))?)?;
    let expr = parse_expr(&mut tokens)?;
    let inhomo_tag = tokens.next().ok_or_else(|| Error::DumpFormat("expected \"inhomo\"".into()))?;
    if inhomo_tag != "inhomo" {
        return Err(Error::DumpFormat(format!("expected \"inhomo\", got {inhomo_tag:?}")));
    }
    let inhomo_tok = tokens.next().ok_or_else(|| Error::DumpFormat("missing inhomo value".into()))?;
    let inhomo: i64 = inhomo_tok.parse().map_err(|_| Error::DumpFormat(format!("malformed inhomo {inhomo_tok:?}")))?;
    Ok(Con::new(expr, Integer::from_i64(inhomo), ty))
}

/// Renders a single generator as one line: `gen <type> <expr> div <n>`.
pub fn dump_gen(g: &Gen) -> String {
    let mut out = String::new();
    write!(out, "gen {} ", gen_type_tag(g.gen_type())).unwrap();
    dump_expr(&mut out, g.linear_expr());
    let div = if g.is_line_or_ray() { Integer::zero() } else { g.divisor().clone() };
    write!(out, " div {div}").unwrap();
    out
}

/// Parses a single generator previously produced by [`dump_gen`].
pub fn load_gen(line: &str) -> Result<Gen, Error> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().ok_or_else(|| Error::DumpFormat("empty generator line".into()))?;
    if head != "gen" {
        return Err(Error::DumpFormat(format!("expected \"gen\", got {head:?}")));
    }
    let ty = parse_gen_type(tokens.next().ok_or_else(|| Error::DumpFormat("missing generator type".into()))?)?;
    let expr = parse_expr(&mut tokens)?;
    let div_tag = tokens.next().ok_or_else(|| Error::DumpFormat("expected \"div\"".into()))?;
    if div_tag != "div" {
        return Err(Error::DumpFormat(format!("expected \"div\", got {div_tag:?}")));
    }
    let div_tok = tokens.next().ok_or_else(|| Error::DumpFormat("missing divisor value".into()))?;
    let div: i64 = div_tok.parse().map_err(|_| Error::DumpFormat(format!("malformed divisor {div_tok:?}")))?;
    Ok(Gen::new(ty, expr, Integer::from_i64(div)))
}

fn topol_tag(t: Topol) -> &'static str {
    match t {
        Topol::Closed => "CLOSED",
        Topol::Nnc => "NNC",
    }
}

fn parse_topol(tag: &str) -> Result<Topol, Error> {
    match tag {
        "CLOSED" => Ok(Topol::Closed),
        "NNC" => Ok(Topol::Nnc),
        _ => Err(Error::DumpFormat(format!("unknown topology {tag:?}"))),
    }
}

/// Dumps a polyhedron as its constraint representation: a `topol`/`dim`
/// header followed by a `cons N` section, one constraint per line.
/// Loading always goes through [`Poly::from_cons`], so the result may
/// use a different (but equivalent) generator set than a polyhedron
/// built differently before dumping.
pub fn dump_poly(p: &Poly) -> String {
    let cons: Vec<Con> = p.cons_iter().collect();
    let mut out = String::new();
    writeln!(out, "topol {}", topol_tag(p.topology())).unwrap();
    writeln!(out, "dim {}", p.space_dim()).unwrap();
    writeln!(out, "cons {}", cons.len()).unwrap();
    for c in &cons {
        writeln!(out, "{}", dump_con(c)).unwrap();
    }
    out
}

/// Parses a polyhedron previously produced by [`dump_poly`].
pub fn load_poly(text: &str) -> Result<Poly, Error> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let topol_line = lines.next().ok_or_else(|| Error::DumpFormat("missing topology line".into()))?;
    let mut it = topol_line.split_whitespace();
    if it.next() != Some("topol") {
        return Err(Error::DumpFormat("expected \"topol\"".into()));
    }
    let topol = parse_topol(it.next().ok_or_else(|| Error::DumpFormat("missing topology value".into()))?)?;

    let dim_line = lines.next().ok_or_else(|| Error::DumpFormat("missing dim line".into()))?;
    let mut it = dim_line.split_whitespace();
    if it.next() != Some("dim") {
        return Err(Error::DumpFormat("expected \"dim\"".into()));
    }
    let dim: DimType = it
        .next()
        .ok_or_else(|| Error::DumpFormat("missing dim value".into()))?
        .parse()
        .map_err(|_| Error::DumpFormat("malformed dim value".into()))?;

    let cons_line = lines.next().ok_or_else(|| Error::DumpFormat("missing cons line".into()))?;
    let mut it = cons_line.split_whitespace();
    if it.next() != Some("cons") {
        return Err(Error::DumpFormat("expected \"cons\"".into()));
    }
    let n: usize = it
        .next()
        .ok_or_else(|| Error::DumpFormat("missing cons count".into()))?
        .parse()
        .map_err(|_| Error::DumpFormat("malformed cons count".into()))?;

    let mut cons = Vec::with_capacity(n);
    for _ in 0..n {
        let line = lines.next().ok_or_else(|| Error::DumpFormat("truncated cons section".into()))?;
        let c = load_con(line)?;
        if c.space_dim() != dim {
            return Err(Error::DimensionMismatch { expected: dim, got: c.space_dim() });
        }
        cons.push(c);
    }
    Ok(Poly::from_cons(dim, topol, cons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globals::Topol;

    fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
        let mut e = LinearExpr::new();
        for (i, v) in vals.iter().enumerate() {
            e.set(i as DimType, Integer::from_i64(*v));
        }
        Con::new(e, Integer::from_i64(inhomo), ty)
    }

    #[test]
    fn con_round_trips() {
        let c = con(&[2, -3], 5, ConType::NonStrictIneq);
        let dumped = dump_con(&c);
        let back = load_con(&dumped).unwrap();
        assert!(c.is_equal_to(&back));
    }

    #[test]
    fn gen_round_trips() {
        let g = Gen::new(GenType::Point, LinearExpr::from_var(crate::var::Var::new(0)), Integer::from_i64(2));
        let dumped = dump_gen(&g);
        let back = load_gen(&dumped).unwrap();
        assert!(g.is_equal_to(&back));
    }

    #[test]
    fn poly_round_trips_through_cons() {
        let p = Poly::from_cons(
            2,
            Topol::Closed,
            vec![
                con(&[1, 0], 0, ConType::NonStrictIneq),
                con(&[-1, 0], 1, ConType::NonStrictIneq),
                con(&[0, 1], 0, ConType::NonStrictIneq),
                con(&[0, -1], 1, ConType::NonStrictIneq),
            ],
        );
        let dumped = dump_poly(&p);
        let back = load_poly(&dumped).unwrap();
        assert!(p.equals(&back));
    }

    #[test]
    fn load_rejects_malformed_header() {
        assert!(load_poly("nonsense").is_err());
    }
}
