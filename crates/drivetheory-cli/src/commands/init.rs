//! The `drivetheory init` command.

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("drivetheory.toml");
    if path.exists() {
        println!("drivetheory.toml already exists, skipping.");
        return Ok(());
    }
    std::fs::write(path, SAMPLE_CONFIG).context("failed to write drivetheory.toml")?;
    println!("Created drivetheory.toml");

    println!("\nNext steps:");
    println!("  1. Point [source] at your quiz data");
    println!("  2. Run: drivetheory check");
    println!("  3. Run: drivetheory topics");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drivetheory configuration

# Where attempt history and the mistake trainer deck are kept.
state_dir = "${HOME}/.local/share/drivetheory"

randomize_answers = false
show_correct_count = true
parallelism = 4

[source]
type = "directory"
path = "./data"

# Or fetch from a web host serving /data/topic-<id>.json:
# [source]
# type = "http"
# base_url = "https://example.org"
"#;
