//! Terminal tables shared by several commands.

use comfy_table::{Cell, Table};

use drivetheory_core::format::{format_score, format_time};
use drivetheory_core::scoring::QuizSummary;

/// One-row table of an attempt's counts.
pub fn summary_table(summary: &QuizSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Correct", "Incorrect", "Unanswered", "Points", "Score", "Time"]);
    table.add_row(vec![
        Cell::new(summary.correct_questions),
        Cell::new(summary.incorrect_questions),
        Cell::new(summary.unanswered_questions),
        Cell::new(format!("{}/{}", summary.earned_points, summary.total_points)),
        Cell::new(format_score(summary.earned_points, summary.total_points)),
        Cell::new(format_time(summary.time_taken)),
    ]);
    table
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_row_formats_counts() {
        let summary = QuizSummary {
            total_questions: 4,
            correct_questions: 2,
            incorrect_questions: 1,
            unanswered_questions: 1,
            total_points: 8,
            earned_points: 5,
            time_taken: 75,
        };
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("5/8"));
        assert!(rendered.contains("63%"));
        assert!(rendered.contains("1:15"));
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Пътни знаци и маркировка", 10), "Пътни з...");
    }
}
