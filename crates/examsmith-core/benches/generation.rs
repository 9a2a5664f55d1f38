use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examsmith_core::engine::{generate_batch, generate_question, QuestionRequest};
use examsmith_core::model::{PaperMode, TopicCode};

fn request(topic: TopicCode, marks: u32, mode: PaperMode, seed: u32) -> QuestionRequest {
    QuestionRequest::new(topic, marks, mode).with_seed(seed)
}

fn bench_generate_question(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_question");

    group.bench_function("n7_1_noncalc", |b| {
        let req = request(TopicCode::N7, 1, PaperMode::NonCalc, 12345);
        b.iter(|| generate_question(black_box(&req)))
    });

    group.bench_function("n8_5_noncalc", |b| {
        let req = request(TopicCode::N8, 5, PaperMode::NonCalc, 12345);
        b.iter(|| generate_question(black_box(&req)))
    });

    group.bench_function("n9_5_calc", |b| {
        let req = request(TopicCode::N9, 5, PaperMode::Calc, 12345);
        b.iter(|| generate_question(black_box(&req)))
    });

    group.finish();
}

fn bench_generate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_batch");

    group.bench_function("6_questions", |b| {
        b.iter(|| generate_batch(black_box(make_requests(6))))
    });

    group.bench_function("30_questions", |b| {
        b.iter(|| generate_batch(black_box(make_requests(30))))
    });

    group.finish();
}

fn make_requests(n: u32) -> Vec<QuestionRequest> {
    (0..n)
        .map(|i| {
            let topic = match i % 3 {
                0 => TopicCode::N7,
                1 => TopicCode::N8,
                _ => TopicCode::N9,
            };
            request(topic, i % 5 + 1, PaperMode::Calc, 1000 + i)
        })
        .collect()
}

criterion_group!(benches, bench_generate_question, bench_generate_batch);
criterion_main!(benches);
