//! The `drivetheory resources` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use drivetheory_report::render_text;

use crate::context::{AppContext, Overrides};

pub async fn execute(overrides: &Overrides, id: Option<String>) -> Result<()> {
    let ctx = AppContext::load(overrides)?;

    let Some(id) = id else {
        let index = ctx
            .source
            .load_resource_index()
            .await
            .context("failed to load resource index")?;
        if index.resources.is_empty() {
            println!("No resources available.");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["Id", "Title", "Type", "Description"]);
        for entry in &index.resources {
            table.add_row(vec![
                Cell::new(&entry.id),
                Cell::new(&entry.title),
                Cell::new(entry.kind),
                Cell::new(&entry.description),
            ]);
        }
        println!("{table}");
        return Ok(());
    };

    let resource = ctx
        .source
        .load_resource(&id)
        .await
        .with_context(|| format!("failed to load resource '{id}'"))?;
    println!("{}", render_text(&resource));

    Ok(())
}
