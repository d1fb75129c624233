//! The `drivetheory take` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use drivetheory_core::format::format_time;
use drivetheory_core::session::{record_attempt, QuizSession, SessionKind};
use drivetheory_report::{write_html_report, AttemptReview};

use crate::context::{AppContext, Overrides};
use crate::prompt::{run_session, PromptOptions};
use crate::tables::summary_table;

pub async fn execute(
    overrides: &Overrides,
    topic_id: &str,
    html: Option<PathBuf>,
    shuffle: bool,
) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let catalog = ctx.catalog().await;
    let topic_name = catalog.display_name(topic_id);

    let quiz = ctx
        .source
        .load_quiz(topic_id)
        .await
        .with_context(|| format!("failed to load quiz for topic {topic_id}"))?;
    if quiz.questions.is_empty() {
        println!("{topic_name} has no questions.");
        return Ok(());
    }

    let mut session = QuizSession::new(
        SessionKind::Topic {
            topic_id: topic_id.to_string(),
            topic_name: topic_name.clone(),
        },
        quiz,
    );
    let _span = tracing::info_span!("quiz", session = %session.id(), topic = topic_id).entered();

    println!("{topic_name}: {} questions", session.len());
    println!("Answer with option numbers (e.g. 1,3). Empty line skips, q finishes.");

    let options = PromptOptions {
        randomize: shuffle || ctx.config.randomize_answers,
        show_correct_count: ctx.config.show_correct_count,
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut session,
        &options,
        &mut rand::thread_rng(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    let graded = session.finish().clone();
    let summary = graded.summary;

    println!("\nQuiz Completed!");
    println!(
        "You completed the {topic_name} quiz in {}",
        format_time(summary.time_taken)
    );
    println!("{}", summary_table(&summary));

    let mut history = ctx.history();
    let mut trainer = ctx.trainer();
    let missed = record_attempt(
        &mut history,
        &mut trainer,
        topic_id,
        &topic_name,
        session.quiz(),
        &graded,
    )
    .context("failed to save quiz results")?;
    if missed > 0 {
        println!("{missed} question(s) added to the mistake trainer.");
    }

    if let Some(path) = html {
        let review = AttemptReview {
            title: &topic_name,
            quiz: session.quiz(),
            graded: &graded,
            taken_at: session.finished_at().unwrap_or_else(Utc::now),
        };
        write_html_report(&review, &path)?;
        eprintln!("HTML review: {}", path.display());
    }
    io::stdout().flush()?;

    Ok(())
}
