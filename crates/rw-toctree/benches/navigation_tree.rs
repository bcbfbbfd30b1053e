//! Benchmarks for navigation tree operations.

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use rw_toctree::{DirectiveRecord, MockDocumentGraph, NavigationTree, RenderFormat, TocConfig};

/// Create a document graph where every page lists `breadth` children.
fn create_site(depth: usize, breadth: usize) -> MockDocumentGraph {
    fn create_level(
        graph: MockDocumentGraph,
        doc: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) -> MockDocumentGraph {
        if current_depth >= max_depth {
            return graph.with_document(doc);
        }

        let children: Vec<(String, String)> = (0..breadth)
            .map(|i| {
                let slug = if doc == "index" {
                    format!("section-{i}")
                } else {
                    format!("{doc}/section-{i}")
                };
                (format!("Section {i}"), slug)
            })
            .collect();
        let record = DirectiveRecord::new(
            doc,
            None,
            children.iter().map(|(t, s)| (t.as_str(), s.as_str())),
        );

        let mut graph = graph.with_directive(record);
        for (_, slug) in &children {
            graph = create_level(graph, slug, current_depth + 1, max_depth, breadth);
        }
        graph
    }

    create_level(MockDocumentGraph::new(), "index", 0, depth, breadth)
}

fn build(depth: usize, breadth: usize) -> NavigationTree {
    let mut nav = NavigationTree::new(Arc::new(create_site(depth, breadth)), TocConfig::default());
    nav.initialize().unwrap();
    nav
}

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");

    group.bench_function("depth_3_breadth_5", |b| {
        b.iter(|| build(3, 5));
    });

    group.bench_function("depth_5_breadth_3", |b| {
        b.iter(|| build(5, 3));
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let nav = build(5, 3);
    let deepest = "section-0/section-0/section-0/section-0/section-0";
    let root = nav.sections()[0];

    let mut group = c.benchmark_group("queries");

    group.bench_function("lineage_depth_5", |b| {
        b.iter(|| nav.lineage(deepest));
    });

    group.bench_function("is_ancestor_of_deepest", |b| {
        b.iter(|| root.is_ancestor_of(deepest));
    });

    group.bench_function("is_ancestor_of_miss", |b| {
        b.iter(|| root.is_ancestor_of("nonexistent"));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let nav = build(4, 4);

    let mut group = c.benchmark_group("render");

    group.bench_function("html", |b| {
        b.iter(|| nav.render(RenderFormat::Html, "section-1/section-2"));
    });

    group.bench_function("json", |b| {
        b.iter(|| nav.render(RenderFormat::Json, "section-1/section-2"));
    });

    group.finish();
}

criterion_group!(benches, bench_initialize, bench_queries, bench_render);
criterion_main!(benches);
