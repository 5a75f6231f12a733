//! Write fan-out benchmarks.
//!
//! Measures the cost of a single write to a key bound by N text templates,
//! and of compiling a flat list of interpolated nodes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lattice_view::{Compiler, MemoryNode, Object, Observer};

fn observed_counter() -> Object {
    let data: Object = [("count", 0)].into_iter().collect();
    Observer::new().observe_object(&data);
    data
}

fn tree(width: usize) -> MemoryNode {
    (0..width).fold(MemoryNode::element("ul"), |root, _| {
        root.child(MemoryNode::element("li").child(MemoryNode::text("count = {{ count }}")))
    })
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    for width in [1usize, 16, 256] {
        let data = observed_counter();
        let root = tree(width);
        Compiler::default()
            .compile(&root, &data)
            .expect("benchmark tree compiles");

        let mut n = 0i64;
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                n += 1;
                data.set("count", black_box(n));
            })
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_256", |b| {
        b.iter(|| {
            let data = observed_counter();
            let root = tree(256);
            Compiler::default()
                .compile(&root, &data)
                .expect("benchmark tree compiles");
            black_box(root)
        })
    });
}

criterion_group!(benches, bench_fan_out, bench_compile);
criterion_main!(benches);
