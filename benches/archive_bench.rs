//! Criterion benchmarks for pareto-archive.
//!
//! Uses synthetic fronts (random points on and around the unit simplex) to
//! measure sorting and archive-insertion overhead independent of any
//! problem domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pareto_archive::population::{
    AdaptiveGridArchive, EpsilonBoxDominanceArchive, NondominatedPopulation, NondominatedSorting,
    Population,
};
use pareto_archive::solution::Solution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random points in the unit cube; roughly 1/m! of them end up on the
/// Pareto front, giving a realistic mix of fronts.
fn random_solutions(count: usize, objectives: usize, seed: u64) -> Vec<Solution> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let point: Vec<f64> = (0..objectives).map(|_| rng.random_range(0.0..1.0)).collect();
            Solution::with_objectives(point)
        })
        .collect()
}

fn bench_nondominated_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nondominated_sorting");

    for size in [100, 250, 500] {
        let solutions = random_solutions(size, 3, 42);

        group.bench_with_input(BenchmarkId::from_parameter(size), &solutions, |b, solutions| {
            b.iter(|| {
                let mut population: Population = solutions.iter().cloned().collect();
                NondominatedSorting::new().evaluate(&mut population);
                black_box(population.len())
            })
        });
    }

    group.finish();
}

fn bench_nondominated_insertion(c: &mut Criterion) {
    let solutions = random_solutions(500, 3, 7);

    c.bench_function("nondominated_population_insert_500", |b| {
        b.iter(|| {
            let mut population = NondominatedPopulation::new();

            for solution in &solutions {
                population.add(solution.clone());
            }

            black_box(population.len())
        })
    });
}

fn bench_epsilon_archive_insertion(c: &mut Criterion) {
    let solutions = random_solutions(500, 3, 7);

    c.bench_function("epsilon_archive_insert_500", |b| {
        b.iter(|| {
            let mut archive = EpsilonBoxDominanceArchive::uniform(0.05).unwrap();

            for solution in &solutions {
                archive.add(solution.clone());
            }

            black_box(archive.number_of_improvements())
        })
    });
}

fn bench_grid_archive_insertion(c: &mut Criterion) {
    let solutions = random_solutions(500, 2, 11);

    c.bench_function("grid_archive_insert_500", |b| {
        b.iter(|| {
            let mut archive = AdaptiveGridArchive::new(50, 2, 8).unwrap();

            for solution in &solutions {
                archive.add(solution.clone());
            }

            black_box(archive.len())
        })
    });
}

criterion_group!(
    benches,
    bench_nondominated_sorting,
    bench_nondominated_insertion,
    bench_epsilon_archive_insertion,
    bench_grid_archive_insertion
);
criterion_main!(benches);
