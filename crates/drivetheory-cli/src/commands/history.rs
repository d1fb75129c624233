//! The `drivetheory history` and `clear-history` commands.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};

use drivetheory_core::format::{format_score, format_time, ScoreBand};

use crate::context::{AppContext, Overrides};

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Success => Color::Green,
        ScoreBand::Warning => Color::Yellow,
        ScoreBand::Danger => Color::Red,
    }
}

pub async fn execute(overrides: &Overrides, topic: Option<String>) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let history = ctx.history();

    let items: Vec<_> = match &topic {
        Some(id) => history.by_topic(id),
        None => history.items().iter().collect(),
    };
    if items.is_empty() {
        println!("You haven't taken any quizzes yet.");
        return Ok(());
    }

    let catalog = ctx.catalog().await;
    let mut table = Table::new();
    table.set_header(vec!["Date", "Topic", "Score", "Points", "Correct", "Time"]);
    for item in items {
        let summary = &item.summary;
        let band = ScoreBand::from_percentage(summary.percentage());
        table.add_row(vec![
            Cell::new(item.date.format("%Y-%m-%d %H:%M")),
            Cell::new(catalog.display_name(&item.topic_id)),
            Cell::new(format_score(summary.earned_points, summary.total_points))
                .fg(band_color(band)),
            Cell::new(format!("{}/{}", summary.earned_points, summary.total_points)),
            Cell::new(format!(
                "{}/{}",
                summary.correct_questions, summary.total_questions
            )),
            Cell::new(format_time(summary.time_taken)),
        ]);
    }
    println!("{table}");

    Ok(())
}

pub fn clear(overrides: &Overrides) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let mut history = ctx.history();
    let count = history.len();
    history.clear().context("failed to clear history")?;
    println!("History cleared ({count} attempt(s) removed).");
    Ok(())
}
