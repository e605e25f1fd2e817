//! TOML catalog parser.
//!
//! Loads catalogs from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{
    Canvas, Category, Classification, ClassificationKind, ClassificationOption, FontMatch,
    FontOption, Layer, LayeredHitTest, MainSubject, MarqueeItem, MicroTypography, Question,
    QuestionKind, StyleAdjustment,
};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    categories: Vec<TomlCategory>,
}

#[derive(Debug, Deserialize)]
struct TomlCategory {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TomlQuestion {
    FontMatch {
        id: String,
        title: String,
        canvas: Canvas,
        #[serde(default)]
        options: Vec<TomlFontOption>,
    },
    MicroTypography {
        id: String,
        title: String,
        before_text: String,
        after_text: String,
        #[serde(default)]
        options: Option<Vec<String>>,
        #[serde(default)]
        correct_options: Vec<String>,
    },
    Classification {
        id: String,
        title: String,
        subtype: String,
        #[serde(default)]
        main_subject: Option<String>,
        #[serde(default)]
        main_subject_font: Option<String>,
        #[serde(default)]
        options: Vec<TomlClassificationOption>,
        #[serde(default)]
        required_fonts: Vec<String>,
        #[serde(default)]
        marquee: Vec<MarqueeItem>,
    },
    LayeredHitTest {
        id: String,
        title: String,
        #[serde(default)]
        layers: Vec<TomlLayer>,
        #[serde(default)]
        result_asset: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct TomlFontOption {
    id: String,
    font_family: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    is_correct: bool,
    #[serde(default)]
    style_adjustment: Option<StyleAdjustment>,
}

#[derive(Debug, Deserialize)]
struct TomlClassificationOption {
    id: String,
    text: String,
    #[serde(default)]
    is_correct: bool,
    #[serde(default)]
    reveal_text: Option<String>,
    #[serde(default)]
    font_family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlLayer {
    id: String,
    #[serde(default)]
    is_base: bool,
    #[serde(default)]
    is_correct: bool,
}

impl TomlQuestion {
    fn into_question(self) -> Result<Question> {
        let question = match self {
            TomlQuestion::FontMatch {
                id,
                title,
                canvas,
                options,
            } => Question {
                id,
                title,
                kind: QuestionKind::FontMatch(FontMatch {
                    canvas,
                    options: options
                        .into_iter()
                        .map(|o| FontOption {
                            display_name: o.display_name.unwrap_or_else(|| o.font_family.clone()),
                            id: o.id,
                            font_family: o.font_family,
                            is_correct: o.is_correct,
                            style_adjustment: o.style_adjustment,
                        })
                        .collect(),
                }),
            },
            TomlQuestion::MicroTypography {
                id,
                title,
                before_text,
                after_text,
                options,
                correct_options,
            } => Question {
                id,
                title,
                kind: QuestionKind::MicroTypography(MicroTypography {
                    before_text,
                    after_text,
                    options: options.unwrap_or_else(MicroTypography::default_options),
                    correct_options,
                }),
            },
            TomlQuestion::Classification {
                id,
                title,
                subtype,
                main_subject,
                main_subject_font,
                options,
                required_fonts,
                marquee,
            } => {
                let subtype: ClassificationKind = subtype
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("question {id}: {e}"))?;
                Question {
                    id,
                    title,
                    kind: QuestionKind::Classification(Classification {
                        subtype,
                        main_subject: main_subject.map(|text| MainSubject {
                            text,
                            font_family: main_subject_font,
                        }),
                        options: options
                            .into_iter()
                            .map(|o| ClassificationOption {
                                id: o.id,
                                text: o.text,
                                is_correct: o.is_correct,
                                reveal_text: o.reveal_text,
                                font_family: o.font_family,
                            })
                            .collect(),
                        required_fonts,
                        marquee,
                    }),
                }
            }
            TomlQuestion::LayeredHitTest {
                id,
                title,
                layers,
                result_asset,
            } => Question {
                id,
                title,
                kind: QuestionKind::LayeredHitTest(LayeredHitTest {
                    layers: layers
                        .into_iter()
                        .map(|l| Layer {
                            id: l.id,
                            is_base: l.is_base,
                            is_correct: l.is_correct,
                        })
                        .collect(),
                    result_asset,
                }),
            },
        };
        Ok(question)
    }
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let categories = parsed
        .categories
        .into_iter()
        .map(|c| {
            let questions = c
                .questions
                .into_iter()
                .map(TomlQuestion::into_question)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("in category {}", c.id))?;
            Ok(Category {
                id: c.id,
                title: c.title,
                description: c.description,
                cover_image: c.cover_image,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog::new(categories))
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    // read_dir order is platform dependent; category order must not be
    paths.sort();

    for path in paths {
        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// Load a catalog file, or merge every catalog file in a directory.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        Ok(merge_catalogs(load_catalog_directory(path)?))
    } else {
        parse_catalog(path)
    }
}

/// Concatenate catalogs into one, keeping category order.
///
/// No deduplication: run [`validate_catalog`] on the result to catch ids
/// that collide across files.
pub fn merge_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Catalog {
    Catalog::new(
        catalogs
            .into_iter()
            .flat_map(Catalog::into_categories)
            .collect(),
    )
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for authoring mistakes.
///
/// The engine never panics on any of these; they produce questions that
/// can't be answered correctly, or categories that can't be played.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_categories = HashSet::new();
    for category in catalog.categories() {
        if !seen_categories.insert(&category.id) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("duplicate category ID: {}", category.id),
            });
        }
        if category.questions.is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("category {} has no questions", category.id),
            });
        }
    }

    // Check for duplicate question IDs across the whole catalog
    let mut seen_ids = HashSet::new();
    for question in catalog.questions() {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in catalog.questions() {
        validate_question(question, &mut warnings);
    }

    warnings
}

fn validate_question(question: &Question, warnings: &mut Vec<ValidationWarning>) {
    let id = question.id.as_str();

    if question.title.trim().is_empty() {
        warnings.push(ValidationWarning::question(id, "title is empty"));
    }

    let mut seen_targets = HashSet::new();
    for target in question.targets() {
        if !seen_targets.insert(target.id) {
            warnings.push(ValidationWarning::question(
                id,
                format!("duplicate option ID: {}", target.id),
            ));
        }
    }

    let correct = question.targets().iter().filter(|t| t.is_correct).count();

    match &question.kind {
        QuestionKind::FontMatch(_) => {
            if correct != 1 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("expected exactly one correct option, found {correct}"),
                ));
            }
        }
        QuestionKind::Classification(c) => match c.subtype {
            ClassificationKind::Classifier | ClassificationKind::Imposter => {
                if correct != 1 {
                    warnings.push(ValidationWarning::question(
                        id,
                        format!(
                            "{} expects exactly one correct option, found {correct}",
                            c.subtype
                        ),
                    ));
                }
            }
            ClassificationKind::Grid => {
                if correct == 0 {
                    warnings.push(ValidationWarning::question(
                        id,
                        "grid has no correct options",
                    ));
                }
            }
        },
        QuestionKind::MicroTypography(m) => {
            if m.correct_options.is_empty() {
                warnings.push(ValidationWarning::question(id, "correct_options is empty"));
            }
            for label in &m.correct_options {
                if !m.options.contains(label) {
                    warnings.push(ValidationWarning::question(
                        id,
                        format!("correct option {label:?} is not among the options"),
                    ));
                }
            }
        }
        QuestionKind::LayeredHitTest(h) => {
            let bases = h.layers.iter().filter(|l| l.is_base).count();
            if bases != 1 {
                warnings.push(ValidationWarning::question(
                    id,
                    format!("expected exactly one base layer, found {bases}"),
                ));
            }
            if h.layers.iter().any(|l| l.is_base && l.is_correct) {
                warnings.push(ValidationWarning::question(
                    id,
                    "base layer is flagged correct but can't be clicked",
                ));
            }
        }
    }
}
