//! The `typequiz show` command.

use std::path::PathBuf;

use anyhow::Result;

use typequiz_core::model::InteractionStyle;

use super::open_catalog;

pub fn execute(
    question_id: String,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let (_, catalog) = open_catalog(catalog_path.as_deref(), config_path.as_deref())?;
    let found = catalog.lookup(&question_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    let question = found.question;
    println!("Question: {}: {}", question.id, question.title);
    println!(
        "Category: {} ({} of {})",
        found.category.title,
        found.index + 1,
        found.category.questions.len()
    );
    println!(
        "Kind: {} ({})",
        question.kind_name(),
        question.interaction()
    );

    let noun = match question.interaction() {
        InteractionStyle::HitTest => "Layers",
        _ => "Options",
    };
    println!("{noun}:");
    for target in question.targets() {
        let marker = if target.is_correct { "*" } else { " " };
        println!("  {marker} {} ({})", target.label, target.id);
    }

    let fonts = question.required_fonts();
    if !fonts.is_empty() {
        println!("Fonts: {}", fonts.join(", "));
    }

    match found.next_question_id {
        Some(next) => println!("Next: {next}"),
        None => println!("Next: (end of category)"),
    }

    Ok(())
}
