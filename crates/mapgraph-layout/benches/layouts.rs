use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use mapgraph_core::{Concept, Position, Relationship, VisualGraph, map_to_visual};
use mapgraph_layout::{LayoutOptions, LayoutScope, LayoutSession, LayoutStrategyKind};
use std::hint::black_box;
use std::time::Duration;

/// A connected map: a spine plus a few forward links per concept, with some parallel edges.
fn build_map(node_count: usize, fanout: usize) -> VisualGraph {
    let concepts: Vec<Concept> = (0..node_count)
        .map(|i| Concept::new(format!("c{i}"), format!("Concept {i}"), Position::default()))
        .collect();

    let mut rels: Vec<Relationship> = Vec::new();
    let mut link = |from: usize, to: usize, label: &str| {
        let id = format!("r{}", rels.len());
        rels.push(Relationship::new(id, format!("c{from}"), format!("c{to}"), label));
    };
    for i in 0..node_count.saturating_sub(1) {
        link(i, i + 1, "next");
    }
    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            if i + k < node_count {
                link(i, i + k, "");
            }
        }
        if i % 7 == 0 && i + 1 < node_count {
            link(i, i + 1, "also");
        }
    }

    map_to_visual(&concepts, &rels, &[], None, false)
}

fn bench_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("layouts");
    group.measurement_time(Duration::from_secs(10));

    let options = LayoutOptions::with_canvas(2000.0, 2000.0);
    let cases = [("map_30_f2", 30usize, 2usize), ("map_120_f3", 120usize, 3usize)];

    for (name, nodes, fanout) in cases {
        let map = build_map(nodes, fanout);
        for kind in LayoutStrategyKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.as_str(), name), &map, |b, map| {
                let session = LayoutSession::new();
                b.iter(|| {
                    let out = block_on(session.apply_layout(
                        black_box(&map.nodes),
                        black_box(&map.edges),
                        kind,
                        &options,
                        LayoutScope::All,
                    ));
                    black_box(out.map(|nodes| nodes.len()).unwrap_or_default());
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_layouts);
criterion_main!(benches);
