//! HTML attempt review.
//!
//! Produces a self-contained HTML file with all CSS inlined: the summary
//! counts, an outcome bar, and every question with the user's selections
//! against the answer key.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use drivetheory_core::format::{format_score, format_time, ScoreBand};
use drivetheory_core::model::{Question, QuizData};
use drivetheory_core::scoring::{GradedQuiz, Outcome, QuizResult, QuizSummary};

/// Everything needed to render one finished attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptReview<'a> {
    pub title: &'a str,
    pub quiz: &'a QuizData,
    pub graded: &'a GradedQuiz,
    pub taken_at: DateTime<Utc>,
}

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn outcome_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "correct",
        Outcome::Incorrect => "incorrect",
        Outcome::Unanswered => "unanswered",
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "Correct",
        Outcome::Incorrect => "Incorrect",
        Outcome::Unanswered => "Unanswered",
    }
}

/// Generate the review page for an attempt.
pub fn generate_html(review: &AttemptReview<'_>) -> String {
    let summary = &review.graded.summary;
    let band = ScoreBand::from_percentage(summary.percentage());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} review</title>\n",
        html_escape(review.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Quiz Completed!</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">You completed the <strong>{}</strong> quiz in {} | {}</p>\n",
        html_escape(review.title),
        format_time(summary.time_taken),
        review.taken_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str(&format!(
        "<p class=\"score {band}\">{}</p>\n",
        format_score(summary.earned_points, summary.total_points)
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Your Results</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Correct</th><th>Incorrect</th><th>Unanswered</th><th>Points</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td class=\"correct\">{}</td><td class=\"incorrect\">{}</td><td class=\"unanswered\">{}</td><td>{}/{}</td></tr></tbody>\n",
        summary.correct_questions,
        summary.incorrect_questions,
        summary.unanswered_questions,
        summary.earned_points,
        summary.total_points,
    ));
    html.push_str("</table>\n");
    if summary.total_questions > 0 {
        html.push_str(&generate_outcome_bar(summary));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Question Review</h2>\n");
    for (question, result) in review.graded.pairs(review.quiz) {
        html.push_str(&render_question(question, result));
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn render_question(question: &Question, result: &QuizResult) -> String {
    let outcome = result.outcome();
    let class = outcome_class(outcome);
    let mut html = format!("<article class=\"question {class}\">\n");

    html.push_str(&format!(
        "<h3>Question {} <span class=\"tag {class}\">{}</span></h3>\n",
        html_escape(&question.index),
        outcome_label(outcome)
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&question.text)));
    if let Some(image) = &question.image {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Question context image\">\n",
            html_escape(image)
        ));
    }
    if let Some(video) = &question.video {
        html.push_str(&format!(
            "<video controls src=\"{}\"></video>\n",
            html_escape(video)
        ));
    }

    html.push_str("<ul class=\"answers\">\n");
    for (position, answer) in question.answers.iter().enumerate() {
        let selected = result.user_answers.get(position).copied().unwrap_or(false);
        let row_class = match (selected, answer.checked) {
            (true, true) => " class=\"picked-right\"",
            (true, false) => " class=\"picked-wrong\"",
            _ => "",
        };
        let mark = if answer.checked { "&#10003;" } else { "&nbsp;" };

        html.push_str(&format!("<li{row_class}><span class=\"key\">{mark}</span>"));
        if let Some(text) = &answer.text {
            html.push_str(&html_escape(text));
        }
        if let Some(image) = &answer.image {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"Answer image\">",
                html_escape(image)
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</article>\n");
    html
}

/// Write the review page to a file.
pub fn write_html_report(review: &AttemptReview<'_>, path: &Path) -> Result<()> {
    let html = generate_html(review);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn generate_outcome_bar(summary: &QuizSummary) -> String {
    let width = 600.0;
    let height = 24;
    let total = summary.total_questions as f64;

    let segments = [
        (summary.correct_questions, "#22c55e"),
        (summary.incorrect_questions, "#ef4444"),
        (summary.unanswered_questions, "#eab308"),
    ];

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width as u32, height
    );
    let mut x = 0.0;
    for (count, color) in segments {
        if count == 0 {
            continue;
        }
        let w = count as f64 / total * width;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"0\" width=\"{:.1}\" height=\"{}\" fill=\"{}\"/>\n",
            x, w, height, color
        ));
        x += w;
    }
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --success: #dcfce7; --danger: #fde2e2; --warning: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --success: #064e3b; --danger: #7f1d1d; --warning: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 56rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 2rem; font-weight: bold; }
.score.success { color: #16a34a; }
.score.warning { color: #ca8a04; }
.score.danger { color: #dc2626; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: center; }
th { background: var(--border); }
.question { border-left: 4px solid var(--border); padding: 0.5rem 1rem; margin: 1rem 0; }
.question.correct { border-left-color: #22c55e; }
.question.incorrect { border-left-color: #ef4444; }
.question.unanswered { border-left-color: #eab308; }
.tag { font-size: 0.8rem; padding: 0.1rem 0.5rem; border-radius: 9999px; }
.tag.correct, td.correct { background: var(--success); }
.tag.incorrect, td.incorrect { background: var(--danger); }
.tag.unanswered, td.unanswered { background: var(--warning); }
.answers { list-style: none; padding: 0; }
.answers li { border: 1px solid var(--border); border-radius: 6px; padding: 0.4rem; margin: 0.3rem 0; }
.answers li.picked-right { background: var(--success); }
.answers li.picked-wrong { background: var(--danger); }
.key { display: inline-block; width: 1.2rem; color: #16a34a; font-weight: bold; }
img, video { max-width: 100%; max-height: 200px; display: block; margin: 0.5rem 0; }
"#;
