use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use media_xform::transformation::{
    from_options, Action, Border, Color, Layer, TextStyle, Transformation,
};

fn sample_chain(actions: usize) -> Transformation {
    (0..actions)
        .map(|i| {
            Action::new()
                .width(100 + i as i64)
                .height(50)
                .crop("fill")
                .gravity("faces")
                .quality("auto")
                .background(Color::new("#ff0000"))
        })
        .collect()
}

/// Benchmark rendering of a single action with several qualifiers
fn bench_render_single_action(c: &mut Criterion) {
    let action = Action::new()
        .width(300)
        .height(200)
        .crop("fill")
        .gravity("auto")
        .border(Border::new(4, "#00ff00"))
        .flags(["lossy", "progressive"]);

    c.bench_function("render_single_action", |b| {
        b.iter(|| black_box(&action).render())
    });
}

/// Benchmark rendering chains of increasing length
fn bench_render_chain_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_chain_lengths");

    for actions in [1usize, 5, 20] {
        let chain = sample_chain(actions);
        group.bench_with_input(BenchmarkId::from_parameter(actions), &chain, |b, chain| {
            b.iter(|| chain.render())
        });
    }

    group.finish();
}

/// Benchmark an overlay with a nested text layer and a condition
fn bench_render_overlay_with_condition(c: &mut Criterion) {
    let style = TextStyle::new("Arial", 32).bold();
    let chain = Transformation::new()
        .chain(Action::condition("initial_width > 400"))
        .chain(
            Action::new()
                .overlay(Layer::text(style, "Hello, World").unwrap())
                .gravity("south")
                .y(20),
        )
        .chain(Action::if_end());

    c.bench_function("render_overlay_with_condition", |b| {
        b.iter(|| black_box(&chain).render())
    });
}

/// Benchmark parsing a loosely typed option map
fn bench_parse_options(c: &mut Criterion) {
    let options = json!({
        "width": 300,
        "height": 200,
        "crop": "fill",
        "transformation": [{"effect": "sepia"}, {"angle": 90}],
        "alt": "A cat"
    });

    c.bench_function("parse_options", |b| {
        b.iter(|| from_options(black_box(&options)))
    });
}

criterion_group!(
    benches,
    bench_render_single_action,
    bench_render_chain_lengths,
    bench_render_overlay_with_condition,
    bench_parse_options
);
criterion_main!(benches);
