use criterion::{black_box, criterion_group, criterion_main, Criterion};
use greeter_app::core::greeting::greeting_service::{greet, respond, GreetingRequest};
use greeter_app::views::greeter::render;

fn greet_benchmark(c: &mut Criterion) {
    c.bench_function("greet", |b| b.iter(|| greet(black_box("World"))));
    let request = GreetingRequest::from("World");
    c.bench_function("respond", |b| b.iter(|| respond(black_box(&request))));
}

fn render_benchmark(c: &mut Criterion) {
    c.bench_function("render", |b| {
        b.iter(|| render(black_box(Some("Hello, World!"))))
    });
}

criterion_group!(benches, greet_benchmark, render_benchmark);
criterion_main!(benches);
