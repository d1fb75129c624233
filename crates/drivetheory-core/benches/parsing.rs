use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drivetheory_core::model::QuizData;
use drivetheory_core::resource::{Resource, ResourceKind};

fn quiz_json(questions: usize) -> String {
    let items: Vec<String> = (0..questions)
        .map(|i| {
            format!(
                r#"{{"text": "Question {i}", "index": "{i}", "points": "{p}", "pageNum": {page},
                    "answers": [
                        {{"text": "First", "checked": true}},
                        {{"text": "Second", "checked": false}},
                        {{"image": "/img/{i}.png", "checked": false}}
                    ]}}"#,
                p = i % 3 + 1,
                page = i / 10 + 1,
            )
        })
        .collect();
    format!(
        r#"{{"totalQuestions": {questions}, "questions": [{}]}}"#,
        items.join(",")
    )
}

fn bench_parse_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");

    for (name, n) in [("small_12", 12), ("topic_87", 87)] {
        let json = quiz_json(n);
        group.bench_function(name, |b| {
            b.iter(|| serde_json::from_str::<QuizData>(black_box(&json)).unwrap())
        });
    }

    group.finish();
}

fn bench_parse_resource(c: &mut Criterion) {
    let composite = serde_json::json!({
        "sections": (0..20).map(|i| serde_json::json!({
            "title": format!("Section {i}"),
            "type": "table",
            "content": {
                "headers": ["Category", "Town", "Outside", "Motorway"],
                "rows": [["A", 50, 80, 130], ["B", 50, 90, 140], ["C", 50, 70, 100]]
            }
        })).collect::<Vec<_>>()
    });

    c.bench_function("parse_composite_resource", |b| {
        b.iter(|| Resource::parse(ResourceKind::Composite, black_box(composite.clone())).unwrap())
    });
}

criterion_group!(benches, bench_parse_quiz, bench_parse_resource);
criterion_main!(benches);
