//! The `typequiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create typequiz.toml
    if std::path::Path::new("typequiz.toml").exists() {
        println!("typequiz.toml already exists, skipping.");
    } else {
        std::fs::write("typequiz.toml", SAMPLE_CONFIG)?;
        println!("Created typequiz.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add questions to catalogs/example.toml");
    println!("  2. Run: typequiz validate --catalog catalogs/example.toml");
    println!("  3. Run: typequiz play --catalog catalogs/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# typequiz configuration

# Catalog file or directory. Leave unset to play the built-in questions.
# catalog = "catalogs/example.toml"

# Pause after each answer before moving on, in milliseconds.
advance_delay_ms = 1500

# Print image, overlay and font names on question screens.
show_assets = false
"#;

const EXAMPLE_CATALOG: &str = r#"[[categories]]
id = "starter"
title = "Starter"
description = "One question of every kind."

[[categories.questions]]
kind = "classification"
subtype = "classifier"
id = "starter_serif"
title = "Is Georgia a Serif or Sans-serif?"
main_subject = "Georgia"
main_subject_font = "Georgia, serif"
options = [
    { id = "serif", text = "Serif", is_correct = true },
    { id = "sans", text = "Sans-serif" },
]

[[categories.questions]]
kind = "classification"
subtype = "grid"
id = "starter_mono"
title = "which of these are monospace fonts?"
options = [
    { id = "courier", text = "courier", is_correct = true },
    { id = "helvetica", text = "helvetica" },
    { id = "menlo", text = "menlo", is_correct = true },
]

[[categories.questions]]
kind = "micro_typography"
id = "starter_micro"
title = "what property was adjusted?"
before_text = "type"
after_text = "t y p e"
correct_options = ["tracking"]

[[categories.questions]]
kind = "layered_hit_test"
id = "starter_anatomy"
title = "which part is the bowl?"
layers = [
    { id = "base", is_base = true },
    { id = "stem" },
    { id = "bowl", is_correct = true },
]

[[categories.questions]]
kind = "font_match"
id = "starter_poster"
title = "Pick the font for this poster"
canvas = { width = 1000, height = 1000, background_image = "poster.png" }
options = [
    { id = "1", font_family = "Inter", is_correct = true },
    { id = "2", font_family = "Comic Neue" },
]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use typequiz_core::parser::{parse_catalog_str, validate_catalog};

    #[test]
    fn example_catalog_is_valid() {
        let catalog = parse_catalog_str(EXAMPLE_CATALOG, &PathBuf::from("example.toml")).unwrap();
        assert_eq!(catalog.question_count(), 5);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::TypequizConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.advance_delay_ms, 1500);
        assert_eq!(config.catalog, None);
    }
}
