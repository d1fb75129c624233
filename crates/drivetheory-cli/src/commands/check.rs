//! The `drivetheory check` command.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use drivetheory_sources::{check_topics, CheckStatus};

use crate::context::{AppContext, Overrides};

pub async fn execute(overrides: &Overrides, parallelism: Option<usize>) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    anyhow::ensure!(
        parallelism.map_or(true, |p| p >= 1),
        "parallelism must be at least 1"
    );
    let parallelism = parallelism.unwrap_or(ctx.config.parallelism);

    let catalog = ctx.catalog().await;
    eprintln!(
        "Checking {} topic(s) from the {} source",
        catalog.topics().len(),
        ctx.source.name()
    );
    let checks = check_topics(ctx.source.clone(), catalog.topics(), parallelism).await;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Status"]);
    let mut failed = 0usize;
    let mut mismatched = 0usize;
    for check in &checks {
        let status = match &check.status {
            CheckStatus::Ok { questions } => {
                Cell::new(format!("OK ({questions})")).fg(Color::Green)
            }
            CheckStatus::Mismatch { expected, found } => {
                mismatched += 1;
                Cell::new(format!("{found} questions, catalog says {expected}")).fg(Color::Yellow)
            }
            CheckStatus::Failed(reason) => {
                failed += 1;
                Cell::new(format!("FAIL: {reason}")).fg(Color::Red)
            }
        };
        table.add_row(vec![Cell::new(&check.topic_id), Cell::new(&check.title), status]);
    }
    println!("{table}");

    if mismatched > 0 {
        println!("Warning: {mismatched} topic(s) differ from the catalog question count.");
    }
    anyhow::ensure!(failed == 0, "{failed} topic(s) could not be loaded");
    println!("All topics loaded.");

    Ok(())
}
