//! Benchmarks for the ordering searches
//!
//! Run with: cargo bench -p revlay-order

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use revlay_ir::Circuit;
use revlay_order::{CostModel, ExhaustiveSearch, GreedySearch, SearchBudget, SearchStrategy};

/// A Toffoli ladder with a feedback CNOT, over `n` lines.
fn ladder(n: usize) -> Circuit {
    let mut circuit = Circuit::new("bench");
    for i in 2..n {
        circuit
            .toffoli(&format!("x{}", i - 2), &format!("x{}", i - 1), &format!("x{i}"))
            .unwrap();
    }
    circuit.cnot(&format!("x{}", n - 1), "x0").unwrap();
    circuit
}

/// Benchmark a single cost evaluation
fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost");

    for n in &[4, 8, 16, 32] {
        let model = CostModel::new(&ladder(*n)).unwrap();
        let order: Vec<usize> = (0..*n).rev().collect();
        group.bench_with_input(BenchmarkId::new("reversed", n), &order, |b, order| {
            b.iter(|| model.cost(black_box(order)));
        });
    }

    group.finish();
}

/// Benchmark exhaustive search
fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    group.sample_size(10);

    for n in &[4, 6, 8] {
        let model = CostModel::new(&ladder(*n)).unwrap();
        group.bench_with_input(BenchmarkId::new("ladder", n), &model, |b, model| {
            b.iter(|| {
                ExhaustiveSearch::new(10)
                    .search(black_box(model), &SearchBudget::unlimited())
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark greedy search
fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");

    for n in &[4, 8, 16, 32] {
        let model = CostModel::new(&ladder(*n)).unwrap();
        group.bench_with_input(BenchmarkId::new("ladder", n), &model, |b, model| {
            b.iter(|| {
                GreedySearch
                    .search(black_box(model), &SearchBudget::unlimited())
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cost, bench_exhaustive, bench_greedy);
criterion_main!(benches);
