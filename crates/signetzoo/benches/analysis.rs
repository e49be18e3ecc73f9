use std::collections::HashSet;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use signetzoo::SignedGraph;
use signetzoo::clustering::ClusteringCoefficients;
use signetzoo::prediction::{SpectralConfig, SpectralMethod, spectral_prediction};
use signetzoo::ranking::{ExponentialRankConfig, PageRankConfig, exponential_rank, pagerank};

/// `(name, nodes, average out-degree)`.
const TIERS: [(&str, usize, usize); 3] = [("small", 100, 5), ("medium", 1_000, 8), ("large", 5_000, 10)];

fn synthetic_graph(nodes: usize, degree: usize, seed: u64) -> SignedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::new();
    let mut g = SignedGraph::new();
    for i in 0..nodes {
        g.add_node(&format!("n{i}"));
    }
    for _ in 0..nodes * degree {
        let a = rng.gen_range(0..nodes);
        let b = rng.gen_range(0..nodes);
        if a != b && seen.insert((a, b)) {
            let weight = if rng.gen_bool(0.2) { -1.0 } else { 1.0 };
            let _ = g.add_edge(&format!("n{a}"), &format!("n{b}"), weight);
        }
    }
    g
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for (name, nodes, degree) in TIERS {
        let graph = synthetic_graph(nodes, degree, 0x5167_u64 + nodes as u64);
        group.throughput(Throughput::Elements(graph.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("pagerank", name), &graph, |b, g| {
            b.iter(|| black_box(pagerank(g, &PageRankConfig::unsigned())));
        });
        group.bench_with_input(BenchmarkId::new("exp-rank", name), &graph, |b, g| {
            b.iter(|| black_box(exponential_rank(g, &ExponentialRankConfig::default())));
        });
        group.bench_with_input(BenchmarkId::new("clustering", name), &graph, |b, g| {
            b.iter(|| black_box(ClusteringCoefficients::compute(g)));
        });
    }

    group.finish();
}

fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction.spectral");
    group.sample_size(10);

    // Dense factorizations: only the small tier.
    let (name, nodes, degree) = TIERS[0];
    let graph = synthetic_graph(nodes, degree, 0x5167);
    let queries: Vec<(usize, usize)> = (0..nodes).map(|i| (i, (i * 7 + 3) % nodes)).collect();

    for method in [SpectralMethod::Adjacency, SpectralMethod::SymmetricAdjacency] {
        let config = SpectralConfig { dim: 10, method };
        group.bench_with_input(BenchmarkId::new(format!("{method:?}"), name), &graph, |b, g| {
            b.iter(|| black_box(spectral_prediction(g, &queries, &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ranking, bench_spectral);
criterion_main!(benches);
