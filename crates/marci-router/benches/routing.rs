//! Routing benchmarks.
//!
//! Run with: `cargo bench -p marci-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;
use marci_router::{MethodRouter, Router};

fn build_router(num_routes: usize) -> Router<usize> {
    let mut router = Router::new();

    for i in 0..num_routes / 3 {
        router
            .insert(&format!("/api/resource{i}"), MethodRouter::new().get(i))
            .expect("static pattern");
    }

    for i in 0..num_routes / 3 {
        router
            .insert(
                &format!("/api/resource{i}/:id"),
                MethodRouter::new().get(i).post(i),
            )
            .expect("param pattern");
    }

    for i in 0..num_routes / 3 {
        router
            .insert(
                &format!("/api/org/:orgId/resource{i}/:id"),
                MethodRouter::new().get(i),
            )
            .expect("nested pattern");
    }

    router
}

fn bench_static_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("static_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/resource20")));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::POST, "/api/resource25/42")));
    });
}

fn bench_nested_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("nested_param_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/org/acme/resource10/42")));
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/nonexistent/path")));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [10, 100, 1000] {
        let router = build_router(num_routes);

        group.bench_with_input(
            BenchmarkId::new("param_match", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/resource{}/42", n / 6);
                b.iter(|| black_box(router.match_route(&Method::GET, &path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_static_match,
    bench_param_match,
    bench_nested_param_match,
    bench_miss,
    bench_scaling
);
criterion_main!(benches);
