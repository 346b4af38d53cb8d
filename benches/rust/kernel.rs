//! Kernel Benchmarks
//!
//! Benchmarks for formula compilation and the compiled kernel's per-pixel evaluation.

use complot::kernel::Kernel;
use complot::parser::parse;
use criterion::{criterion_group, criterion_main, Criterion};
use num_complex::Complex64;
use std::hint::black_box;

fn bench_kernel_eval(c: &mut Criterion) {
    let poly = parse("(z - i) * (w + 2)^5 - w^3").expect("benchmark formula should parse");
    let kernel = Kernel::compile(&poly);
    let z = Complex64::new(0.3, -0.7);
    let w = Complex64::new(1.1, 0.2);

    c.bench_function("kernel_eval_degree_5", |b| {
        b.iter(|| black_box(kernel.eval(black_box(z), black_box(w))));
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("parse_and_compile", |b| {
        b.iter(|| {
            let poly = parse(black_box("(z - i) * (w + 2)^5 - w^3")).expect("should parse");
            black_box(Kernel::compile(&poly));
        });
    });
}

criterion_group!(benches, bench_kernel_eval, bench_compile);
criterion_main!(benches);
