//! The `drivetheory mistakes` and `clear-mistakes` commands.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use drivetheory_core::trainer::MASTERY_THRESHOLD;

use crate::context::{AppContext, Overrides};
use crate::tables::truncate;

pub fn execute(overrides: &Overrides) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let trainer = ctx.trainer();

    if trainer.is_empty() {
        println!("No mistakes recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "#", "Question", "Streak", "Misses", "Added"]);
    for entry in trainer.entries() {
        table.add_row(vec![
            Cell::new(truncate(&entry.topic_name, 30)),
            Cell::new(&entry.question.index),
            Cell::new(truncate(&entry.question.text, 60)),
            Cell::new(format!("{}/{MASTERY_THRESHOLD}", entry.correct_count)),
            Cell::new(entry.incorrect_count),
            Cell::new(entry.date_added.format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");
    println!(
        "\n{} question(s). Answer each correctly {MASTERY_THRESHOLD} times in a row to master it: drivetheory train",
        trainer.len()
    );

    Ok(())
}

pub fn clear(overrides: &Overrides) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let mut trainer = ctx.trainer();
    let count = trainer.len();
    trainer.clear().context("failed to clear mistake trainer")?;
    println!("Mistake trainer cleared ({count} question(s) removed).");
    Ok(())
}
