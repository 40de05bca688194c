use criterion::{black_box, criterion_group, criterion_main, Criterion};

use speakeval_core::annotate::highlight_differences;
use speakeval_core::engine::evaluate;
use speakeval_core::feedback::FeedbackPolicy;

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight_differences");

    group.bench_function("clean", |b| {
        b.iter(|| highlight_differences(black_box("I go to school"), black_box("I go to school.")))
    });

    group.bench_function("mixed_errors", |b| {
        b.iter(|| {
            highlight_differences(
                black_box("yesterday I goes to the big school with my friend"),
                black_box("Yesterday, I went to school with my friends."),
            )
        })
    });

    group.bench_function("empty_candidate", |b| {
        b.iter(|| highlight_differences(black_box(""), black_box("Hello there, how are you today?")))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let policy = FeedbackPolicy::default();
    let refs = [
        "I am going to the library after school.",
        "After school I'm going to the library.",
        "I will go to the library after school.",
    ];

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            evaluate(
                black_box("after school I going to library"),
                black_box(&refs),
                &policy,
            )
        })
    });
}

criterion_group!(benches, bench_highlight, bench_evaluate);
criterion_main!(benches);
