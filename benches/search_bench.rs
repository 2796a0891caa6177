//! Criterion benchmarks for ordering scoring and hill climbing.
//!
//! Uses synthetic instances with random candidate parent sets so the
//! numbers measure search overhead only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::index::sample;
use rand::Rng;
use u_bnsl::model::{Ancestral, Instance, ParentSet, Variable};
use u_bnsl::ordering::Ordering;
use u_bnsl::random::create_rng;
use u_bnsl::search::{Assignment, LocalSearch};

// ===========================================================================
// Synthetic instance
// ===========================================================================

/// `n` variables with `k` random parent sets of up to three members each,
/// plus the empty set, and the chain constraints `(i, i + 1)` for the
/// first `m` variables.
fn synthetic(n: usize, k: usize, m: usize, seed: u64) -> Instance {
    let mut rng = create_rng(seed);
    let variables = (0..n)
        .map(|v| {
            let mut cands = vec![ParentSet::new(v, 1_000, vec![], n)];
            for _ in 0..k {
                let size = rng.random_range(1..=3);
                let parents: Vec<usize> = sample(&mut rng, n - 1, size)
                    .into_iter()
                    .map(|p| if p >= v { p + 1 } else { p })
                    .collect();
                cands.push(ParentSet::new(v, rng.random_range(100..1_000), parents, n));
            }
            Variable::new(v, cands)
        })
        .collect();
    let constraints = (0..m).map(|i| Ancestral::new(i, i + 1)).collect();
    Instance::new(variables, constraints).expect("synthetic instance is valid")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for &(n, m) in &[(20, 0), (50, 0), (50, 5)] {
        let inst = synthetic(n, 30, m, 42);
        let engine = LocalSearch::new(&inst);
        let ordering = Ordering::identity(n);
        let mut assignment = Assignment::new(n);

        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_m{m}"), n),
            &ordering,
            |b, o| b.iter(|| engine.best_score_with_parents(black_box(o), &mut assignment)),
        );
    }

    group.finish();
}

fn bench_hill_climb(c: &mut Criterion) {
    let mut group = c.benchmark_group("hill_climb");
    group.sample_size(10);

    for &n in &[10, 20] {
        let inst = synthetic(n, 20, 0, 7);
        let engine = LocalSearch::new(&inst);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = create_rng(1);
            b.iter(|| {
                let start = Ordering::random(n, &mut rng);
                black_box(engine.hill_climb(&start, &mut rng))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_hill_climb);
criterion_main!(benches);
