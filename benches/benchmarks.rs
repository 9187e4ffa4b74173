use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use pplite::con::{Con, ConType};
use pplite::globals::{DimType, Topol};
use pplite::integer::Integer;
use pplite::linear_expr::LinearExpr;
use pplite::poly::Poly;

// ======================================================================
// UTIL

fn con(vals: &[i64], inhomo: i64, ty: ConType) -> Con {
    let mut e = LinearExpr::new();
    for (i, v) in vals.iter().enumerate() {
        e.set(i as DimType, Integer::from_i64(*v));
    }
    Con::new(e, Integer::from_i64(inhomo), ty)
}

fn random_cons(dim: DimType, count: usize, seed: u64) -> Vec<Con> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cons = Vec::with_capacity(count);
    for _ in 0..count {
        let mut vals = vec![0i64; dim as usize];
        for v in vals.iter_mut() {
            *v = rng.gen_range(-8..=8);
        }
        let inhomo = rng.gen_range(0..=16);
        cons.push(con(&vals, inhomo, ConType::NonStrictIneq));
    }
    cons
}

// ======================================================================
// BENCHMARKS - CONVERSION

fn benchmarks_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for dim in [2, 4, 6] {
        for num_cons in [8usize, 16, 32] {
            let cons = random_cons(dim, num_cons, (dim as u64) * 1000 + num_cons as u64);
            let id = format!("dim={dim},cons={num_cons}");
            group.bench_with_input(BenchmarkId::new("from_cons", &id), &cons, |b, cons| {
                b.iter(|| black_box(Poly::from_cons(dim, Topol::Closed, cons.clone())));
            });
        }
    }

    group.finish();
}

// ======================================================================
// BENCHMARKS - OPERATIONS

fn benchmarks_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops");

    for dim in [2, 4, 6] {
        let p = Poly::from_cons(dim, Topol::Closed, random_cons(dim, 16, dim as u64));
        let q = Poly::from_cons(dim, Topol::Closed, random_cons(dim, 16, dim as u64 + 1));
        let id = format!("dim={dim}");

        group.bench_with_input(BenchmarkId::new("intersection", &id), &(&p, &q), |b, (p, q)| {
            b.iter(|| black_box(p.intersection(q)));
        });

        group.bench_with_input(BenchmarkId::new("poly_hull", &id), &(&p, &q), |b, (p, q)| {
            b.iter(|| black_box(p.poly_hull(q)));
        });
    }

    group.finish();
}

// ======================================================================
// BENCHMARKS - WIDENING

fn benchmarks_widening(c: &mut Criterion) {
    let mut group = c.benchmark_group("widening");

    for dim in [2, 4, 6] {
        let y = Poly::from_cons(dim, Topol::Closed, random_cons(dim, 12, dim as u64 + 10));
        let mut x = y.clone();
        x.poly_hull_assign(&Poly::from_cons(dim, Topol::Closed, random_cons(dim, 12, dim as u64 + 20)));
        let id = format!("dim={dim}");

        group.bench_with_input(BenchmarkId::new("h79", &id), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut x = (*x).clone();
                x.h79_widening_assign(y);
                black_box(x);
            });
        });

        group.bench_with_input(BenchmarkId::new("boxed_h79", &id), &(&x, &y), |b, (x, y)| {
            b.iter(|| {
                let mut x = (*x).clone();
                x.boxed_h79_widening_assign(y);
                black_box(x);
            });
        });
    }

    group.finish();
}

// ======================================================================
// MAIN

criterion_group!(benches_conversion, benchmarks_conversion);
criterion_group!(benches_ops, benchmarks_ops);
criterion_group!(benches_widening, benchmarks_widening);
criterion_main!(benches_conversion, benches_ops, benches_widening);
