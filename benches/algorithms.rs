//! Benchmarks for headless algorithm execution
//!
//! Run with: cargo bench

use algovis_rs::algorithms::{mst, pathfinding, sorting};
use algovis_rs::model::array::random_array;
use algovis_rs::model::{GraphState, Grid};
use algovis_rs::step::StepContext;
use algovis_rs::types::{MstAlgorithm, PathAlgorithm, SortAlgorithm};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    for &size in &[10usize, 50, 100] {
        let mut rng = StdRng::seed_from_u64(7);
        let input = random_array(size, 5..=500, &mut rng);

        for &algo in SortAlgorithm::all() {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", algo), size),
                &input,
                |b, input| {
                    b.iter_batched(
                        || input.clone(),
                        |mut slots| {
                            let mut ctx = StepContext::detached();
                            sorting::run(algo, black_box(&mut slots), &mut ctx).unwrap();
                            slots
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }

    group.finish();
}

fn bench_pathfinding(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinding");
    let grid = Grid::default();

    for &algo in PathAlgorithm::all() {
        group.bench_function(format!("{:?}", algo), |b| {
            b.iter_batched(
                || grid.clone(),
                |mut grid| {
                    let mut ctx = StepContext::detached();
                    pathfinding::run(algo, black_box(&mut grid), &mut ctx).unwrap();
                    grid
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_mst(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst");
    let graph = GraphState::demo();

    for &algo in MstAlgorithm::all() {
        group.bench_function(format!("{:?}", algo), |b| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| {
                    let mut ctx = StepContext::detached();
                    mst::run(algo, black_box(&mut graph), &mut ctx).unwrap();
                    graph
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sorting, bench_pathfinding, bench_mst);
criterion_main!(benches);
