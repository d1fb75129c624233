use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drivetheory_core::model::{parse_points, Answer, Question, QuizData, UserSelection};
use drivetheory_core::scoring::score;
use drivetheory_core::store::MemoryStore;
use drivetheory_core::trainer::MistakeTrainer;

fn make_quiz(questions: usize, answers: usize) -> QuizData {
    QuizData::new(
        (0..questions)
            .map(|i| Question {
                index: i.to_string(),
                text: format!("Question {i}"),
                points: ((i % 3) + 1).to_string(),
                page_num: None,
                image: None,
                video: None,
                answers: (0..answers)
                    .map(|j| Answer {
                        text: Some(format!("Answer {j}")),
                        image: None,
                        checked: (i + j) % 3 == 0,
                    })
                    .collect(),
            })
            .collect(),
    )
}

fn make_selections(quiz: &QuizData) -> Vec<UserSelection> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            if i % 4 == 0 {
                UserSelection::empty(q.answers.len())
            } else {
                q.answer_key()
            }
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for (name, questions) in [("topic_50", 50), ("topic_87", 87), ("all_topics_500", 500)] {
        let quiz = make_quiz(questions, 4);
        let selections = make_selections(&quiz);
        group.bench_function(name, |b| {
            b.iter(|| score(black_box(&quiz), black_box(&selections), None, None))
        });
    }

    group.finish();
}

fn bench_parse_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_points");

    group.bench_function("digits", |b| b.iter(|| parse_points(black_box("3"))));
    group.bench_function("suffix", |b| {
        b.iter(|| parse_points(black_box(" 12 points")))
    });
    group.bench_function("garbage", |b| b.iter(|| parse_points(black_box("n/a"))));

    group.finish();
}

fn bench_trainer_drill(c: &mut Criterion) {
    let quiz = make_quiz(100, 3);

    c.bench_function("trainer_record_result_100", |b| {
        b.iter(|| {
            let mut trainer = MistakeTrainer::load(MemoryStore::new());
            for q in &quiz.questions {
                trainer.add_mistake(q, "1", "Basics").unwrap();
            }
            for q in &quiz.questions {
                trainer.record_result(black_box(&q.index), true).unwrap();
            }
            trainer
        })
    });
}

criterion_group!(benches, bench_score, bench_parse_points, bench_trainer_drill);
criterion_main!(benches);
