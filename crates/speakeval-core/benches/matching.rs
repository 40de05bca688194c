use criterion::{black_box, criterion_group, criterion_main, Criterion};

use speakeval_core::compare::{compare_answers, similarity};
use speakeval_core::diff::char_ratio;
use speakeval_core::normalize::normalize;

const CANDIDATE: &str = "I would like to order a cup of coffee and a piece of cake please";

fn references(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("I'd like to order {i} cups of coffee and some cake, please."))
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("\"Hello, there!\" she said; \"Won't you come in?\"")))
    });
}

fn bench_char_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_ratio");

    group.bench_function("sentence", |b| {
        b.iter(|| char_ratio(black_box("i go to the big school"), black_box("i go to school")))
    });

    group.bench_function("raw_sentence", |b| {
        b.iter(|| similarity(black_box("I go to the big School!"), black_box("I go to school.")))
    });

    let long_a = "the quick brown fox jumps over the lazy dog ".repeat(10);
    let long_b = "a quick brown fox jumped over lazy dogs ".repeat(10);
    group.bench_function("paragraph", |b| {
        b.iter(|| char_ratio(black_box(&long_a), black_box(&long_b)))
    });

    group.finish();
}

fn bench_compare_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_answers");

    for n in [1usize, 5, 20] {
        let refs = references(n);
        group.bench_function(format!("refs={n}"), |b| {
            b.iter(|| compare_answers(black_box(CANDIDATE), black_box(&refs)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_char_ratio, bench_compare_answers);
criterion_main!(benches);
