//! The `typequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use typequiz_core::parser;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalogs = if catalog_path.is_dir() {
        parser::load_catalog_directory(&catalog_path)?
    } else {
        vec![parser::parse_catalog(&catalog_path)?]
    };

    for catalog in &catalogs {
        println!(
            "Catalog: {} categories, {} questions",
            catalog.categories().len(),
            catalog.question_count()
        );
    }

    // Files in a directory are played as one catalog, so ids must be unique
    // across all of them.
    let merged = parser::merge_catalogs(catalogs);
    let warnings = parser::validate_catalog(&merged);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All catalogs valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
