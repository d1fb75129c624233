//! The `drivetheory train` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use drivetheory_core::session::{record_drill, QuizSession, SessionKind};
use drivetheory_report::{write_html_report, AttemptReview};

use crate::context::{AppContext, Overrides};
use crate::prompt::{run_session, PromptOptions};
use crate::tables::summary_table;

pub fn execute(overrides: &Overrides, html: Option<PathBuf>, shuffle: bool) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let mut trainer = ctx.trainer();

    if trainer.is_empty() {
        println!("No mistakes to practice. Questions you miss in a quiz show up here.");
        return Ok(());
    }

    let mut session = QuizSession::new(SessionKind::Drill, trainer.build_quiz_view());
    let _span = tracing::info_span!("drill", session = %session.id()).entered();

    println!("Mistake trainer: {} questions", session.len());
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
    println!("\n{}", summary_table(&graded.summary));

    let graduated = record_drill(&mut trainer, session.quiz(), &graded)
        .context("failed to save mistake trainer progress")?;
    if graduated > 0 {
        println!("{graduated} question(s) mastered and removed from the trainer.");
    }
    println!("{} question(s) left to practice.", trainer.len());

    if let Some(path) = html {
        let review = AttemptReview {
            title: "Mistake trainer",
            quiz: session.quiz(),
            graded: &graded,
            taken_at: session.finished_at().unwrap_or_else(Utc::now),
        };
        write_html_report(&review, &path)?;
        eprintln!("HTML review: {}", path.display());
    }

    Ok(())
}
