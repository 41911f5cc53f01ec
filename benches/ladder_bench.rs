use criterion::{black_box, criterion_group, criterion_main, Criterion};
use word_ladder::{load_dictionary, LadderSolver, WordIndex};

fn bench_index_build(c: &mut Criterion) {
    let words = load_dictionary();
    c.bench_function("index_build", |b| b.iter(|| WordIndex::build(black_box(&words))));
}

fn bench_neighbors(c: &mut Criterion) {
    let index = WordIndex::build(load_dictionary());
    c.bench_function("neighbors", |b| b.iter(|| index.neighbors(black_box("heat"))));
}

fn bench_solve(c: &mut Criterion) {
    let index = WordIndex::build(load_dictionary());
    let solver = LadderSolver::new(&index);

    let mut group = c.benchmark_group("solve");
    group.bench_function("heat_cold", |b| {
        b.iter(|| solver.solve(black_box("heat"), black_box("cold")))
    });
    group.bench_function("stone_black", |b| {
        b.iter(|| solver.solve(black_box("stone"), black_box("black")))
    });
    group.bench_function("unreachable", |b| {
        b.iter(|| solver.solve(black_box("heat"), black_box("iron")))
    });
    group.finish();
}

criterion_group!(benches, bench_index_build, bench_neighbors, bench_solve);
criterion_main!(benches);
