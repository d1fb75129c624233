//! The `drivetheory topics` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use drivetheory_core::format::format_score;

use crate::context::{AppContext, Overrides};

pub async fn execute(overrides: &Overrides) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let catalog = ctx.catalog().await;
    let history = ctx.history();

    if catalog.topics().is_empty() {
        println!("No topics available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Questions", "Updated", "Best"]);
    for topic in catalog.topics() {
        let best = history
            .best_for_topic(&topic.id)
            .map(|item| format_score(item.summary.earned_points, item.summary.total_points))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&topic.id),
            Cell::new(&topic.title),
            Cell::new(topic.questions_count),
            Cell::new(&topic.last_updated),
            Cell::new(best),
        ]);
    }
    println!("{table}");
    println!("\nStart a quiz with: drivetheory take <id>");

    Ok(())
}
