use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examsmith_core::engine::{generate_question, QuestionRequest};
use examsmith_core::marking::{mark_question, ResponseMap};
use examsmith_core::model::{ExpectedAnswer, PaperMode, Question, TopicCode};
use examsmith_core::numeric::fmt_dp;

fn make_question(topic: TopicCode, marks: u32, mode: PaperMode) -> Question {
    generate_question(&QuestionRequest::new(topic, marks, mode).with_seed(4242u32))
}

fn fill_correct(question: &Question) -> ResponseMap {
    let mut map = ResponseMap::new();
    for part in &question.parts {
        let (Some(input), Some(answer)) = (part.input.as_ref(), part.answer.as_ref()) else {
            continue;
        };
        let id = &input.id;
        match answer {
            ExpectedAnswer::Number { value } | ExpectedAnswer::StandardForm { value } => {
                map.insert(id, value.to_string())
            }
            ExpectedAnswer::Rounded { value, dp, .. } => {
                map.insert(id, fmt_dp(*value, *dp as usize))
            }
            ExpectedAnswer::Fraction { n, d } => {
                map.insert(format!("{id}N"), n.to_string());
                map.insert(format!("{id}D"), d.to_string());
            }
            ExpectedAnswer::Pair { value } => {
                map.insert(format!("{id}A"), value[0].to_string());
                map.insert(format!("{id}B"), value[1].to_string());
            }
            ExpectedAnswer::PrimeFactors { factors } => {
                let text = factors
                    .iter()
                    .map(|(p, e)| {
                        if *e == 1 {
                            p.to_string()
                        } else {
                            format!("{p}^{e}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" x ");
                map.insert(id, text)
            }
            ExpectedAnswer::Order { tokens } => map.insert(id, tokens.join(", ")),
            ExpectedAnswer::Symbol { value } => map.insert(id, value.clone()),
        }
    }
    map
}

fn bench_mark_question(c: &mut Criterion) {
    let mut group = c.benchmark_group("mark_question");

    group.bench_function("n7_1_correct", |b| {
        let question = make_question(TopicCode::N7, 1, PaperMode::NonCalc);
        let mut map = fill_correct(&question);
        b.iter(|| mark_question(black_box(&mut map), black_box(&question)))
    });

    group.bench_function("n8_5_correct", |b| {
        let question = make_question(TopicCode::N8, 5, PaperMode::Calc);
        let mut map = fill_correct(&question);
        b.iter(|| mark_question(black_box(&mut map), black_box(&question)))
    });

    group.bench_function("n9_5_blank", |b| {
        let question = make_question(TopicCode::N9, 5, PaperMode::NonCalc);
        let mut map = ResponseMap::new();
        b.iter(|| mark_question(black_box(&mut map), black_box(&question)))
    });

    group.bench_function("n9_5_wrong", |b| {
        let question = make_question(TopicCode::N9, 5, PaperMode::NonCalc);
        let mut map = ResponseMap::new();
        for part in &question.parts {
            if let Some(input) = part.input.as_ref() {
                map.insert(&input.id, "999999");
            }
        }
        b.iter(|| mark_question(black_box(&mut map), black_box(&question)))
    });

    group.finish();
}

criterion_group!(benches, bench_mark_question);
criterion_main!(benches);
