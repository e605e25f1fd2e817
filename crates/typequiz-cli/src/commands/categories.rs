//! The `typequiz categories` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::open_catalog;

pub fn execute(catalog_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (_, catalog) = open_catalog(catalog_path.as_deref(), config_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Questions", "Description"]);

    for category in catalog.categories() {
        table.add_row(vec![
            Cell::new(&category.id),
            Cell::new(&category.title),
            Cell::new(category.questions.len()),
            Cell::new(&category.description),
        ]);
    }

    println!("{table}");
    println!(
        "{} categories, {} questions",
        catalog.categories().len(),
        catalog.question_count()
    );

    Ok(())
}
