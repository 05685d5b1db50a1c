#[macro_use]
extern crate criterion;
extern crate mandelbrot;
extern crate num;

use criterion::{black_box, Criterion};
use mandelbrot::{
    render, Evaluator, OptimizedEvaluator, Palette, ReferenceEvaluator, RenderParams, Viewport,
};
use num::Complex;

// A point near the boundary that takes a while to escape.
fn slow_point(c: &mut Criterion) {
    let point = Complex::new(-0.7436, 0.1318);
    c.bench_function("reference point", move |b| {
        let e = ReferenceEvaluator::default();
        b.iter(|| e.escape_iterations(black_box(point), 200))
    });
    c.bench_function("optimized point", move |b| {
        let e = OptimizedEvaluator::default();
        b.iter(|| e.escape_iterations(black_box(point), 200))
    });
}

fn small_frame(c: &mut Criterion) {
    c.bench_function("reference frame 200x200", |b| {
        let params = RenderParams::new(200, 200, 100).unwrap();
        b.iter(|| render(&Viewport::reference(), params, ReferenceEvaluator::default(), Palette::ReferenceShift))
    });
    c.bench_function("optimized frame 200x200", |b| {
        let params = RenderParams::new(200, 200, 200).unwrap();
        b.iter(|| render(&Viewport::default(), params, OptimizedEvaluator::default(), Palette::OptimizedShift))
    });
}

criterion_group!(benches, slow_point, small_frame);
criterion_main!(benches);
