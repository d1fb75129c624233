//! The `drivetheory preview` command.

use anyhow::{Context, Result};

use crate::context::{AppContext, Overrides};

pub async fn execute(overrides: &Overrides, topic_id: &str) -> Result<()> {
    let ctx = AppContext::load(overrides)?;
    let catalog = ctx.catalog().await;
    let quiz = ctx
        .source
        .load_quiz(topic_id)
        .await
        .with_context(|| format!("failed to load quiz for topic {topic_id}"))?;

    println!(
        "{} ({} questions)",
        catalog.display_name(topic_id),
        quiz.questions.len()
    );
    for (i, question) in quiz.questions.iter().enumerate() {
        let page = question
            .page_num
            .map(|p| format!(", page {p}"))
            .unwrap_or_default();
        println!(
            "\n{}. [#{}, {} pts{page}] {}",
            i + 1,
            question.index,
            question.point_value(),
            question.text
        );
        if let Some(image) = &question.image {
            println!("   [image] {image}");
        }
        if let Some(video) = &question.video {
            println!("   [video] {video}");
        }
        for answer in &question.answers {
            let mark = if answer.checked { "[x]" } else { "[ ]" };
            let text = answer.text.as_deref().unwrap_or("");
            match &answer.image {
                Some(image) => println!("   {mark} {text} [image] {image}"),
                None => println!("   {mark} {text}"),
            }
        }
    }

    Ok(())
}
