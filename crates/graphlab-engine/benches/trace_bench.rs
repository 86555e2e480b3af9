use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphlab_common::{Algorithm, Difficulty};
use graphlab_core::generate;
use graphlab_engine::{MoveValidator, TraceParams, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace");
    for size in [8usize, 32, 128] {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate(&mut rng, size, Difficulty::Hard).unwrap();
        let params = TraceParams::new("0").with_goal((size - 1).to_string());
        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.key(), size), &graph, |b, graph| {
                b.iter(|| black_box(trace(graph, algorithm, &params).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let graph = generate(&mut rng, 64, Difficulty::Medium).unwrap();
    let params = TraceParams::new("0").with_goal("63");
    let moves = trace(&graph, Algorithm::Dijkstra, &params)
        .unwrap()
        .canonical_moves;

    c.bench_function("replay_dijkstra_64", |b| {
        b.iter(|| {
            let mut validator = MoveValidator::new(&graph, Algorithm::Dijkstra, &params).unwrap();
            for mv in &moves {
                black_box(validator.submit_move(mv.clone()));
            }
            validator.score()
        });
    });
}

criterion_group!(benches, bench_trace, bench_replay);
criterion_main!(benches);
