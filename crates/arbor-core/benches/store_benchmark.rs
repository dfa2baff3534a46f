//! Store benchmarks.
//!
//! Measures:
//! - Bulk edge insertion, directed and undirected
//! - Membership queries on a populated store
//! - Transposition
//! - Plain → weighted ingestion
//! - Full depth-first walk

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arbor_core::graph::{
    depth_first, ingest, DirectedGraph, Edge, FinishOrder, UndirectedGraph, WeightedDirectedGraph,
};

const SEED: u64 = 0x5eed_a4b0;
const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Random arcs over `edges / 4` vertices.
fn random_edges(edges: usize) -> Vec<Edge<u32>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let vertices = u32::try_from((edges / 4).max(1)).unwrap_or(u32::MAX);
    (0..edges)
        .map(|_| Edge::new(rng.gen_range(0..vertices), rng.gen_range(0..vertices)))
        .collect()
}

fn populated(edges: usize) -> DirectedGraph<u32> {
    random_edges(edges).into_iter().collect()
}

fn bench_add_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_edges");
    for size in SIZES {
        let edges = random_edges(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("directed", size), &edges, |b, edges| {
            b.iter(|| {
                let graph = DirectedGraph::new();
                graph.add_edges(edges.iter().cloned()).unwrap();
                black_box(graph.size())
            });
        });
        group.bench_with_input(BenchmarkId::new("undirected", size), &edges, |b, edges| {
            b.iter(|| {
                let graph = UndirectedGraph::new();
                graph.add_edges(edges.iter().cloned()).unwrap();
                black_box(graph.size())
            });
        });
    }
    group.finish();
}

fn bench_has_edge(c: &mut Criterion) {
    let graph = populated(100_000);
    let probes = random_edges(1_000);
    c.bench_function("has_edge_1k_probes", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|edge| graph.has_edge(edge.source(), edge.target()))
                .count()
        });
    });
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for size in SIZES {
        let graph = populated(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(graph.transpose().size()));
        });
    }
    group.finish();
}

fn bench_ingest_widening(c: &mut Criterion) {
    let source = populated(10_000);
    c.bench_function("ingest_plain_to_weighted_10k", |b| {
        b.iter(|| {
            let target = WeightedDirectedGraph::new();
            black_box(ingest(&source, &target).unwrap())
        });
    });
}

fn bench_depth_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth_first");
    for size in SIZES {
        let graph = populated(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut order = FinishOrder::new();
                depth_first(graph, &mut order);
                black_box(order.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_edges,
    bench_has_edge,
    bench_transpose,
    bench_ingest_widening,
    bench_depth_first
);
criterion_main!(benches);
