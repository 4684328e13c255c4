use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geocalc::{Registry, run_command};
use std::hint::black_box;

/// Registry with `count` points and lines named P0.., L0..
fn populated_registry(count: usize) -> Registry {
    let mut registry = Registry::new();
    for i in 0..count {
        run_command(&format!("point P{i} is ({i}, {})", i * 2), &mut registry)
            .expect("point definition");
        run_command(&format!("line L{i} is {}x - y + {i} = 0", i % 7 + 1), &mut registry)
            .expect("line definition");
    }
    registry
}

/// Benchmark dispatching single queries against a small session
fn bench_queries(c: &mut Criterion) {
    let commands = vec![
        ("distance_points", "distance between P1 and P2"),
        ("distance_point_line", "distance P3 and L3"),
        ("angle", "angle between L1 and L2"),
        ("slope", "slope L4"),
        ("perpendicular", "perpendicular-on L5 through P5"),
        ("whats", "whats L1.perpendicular(P1).m * P2.x"),
    ];

    let mut group = c.benchmark_group("queries");

    for (name, command) in commands {
        let mut registry = populated_registry(10);
        group.bench_with_input(BenchmarkId::new("run_command", name), &command, |b, command| {
            b.iter(|| black_box(run_command(black_box(command), &mut registry)))
        });
    }

    group.finish();
}

/// Benchmark defining many entities in one session
fn bench_definitions(c: &mut Criterion) {
    let sizes = vec![10, 100, 1_000];

    let mut group = c.benchmark_group("definitions");

    for &size in &sizes {
        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("populate", size), &size, |b, &size| {
            b.iter(|| black_box(populated_registry(size)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries, bench_definitions);
criterion_main!(benches);
