//! The catalog that ships with typequiz.
//!
//! Built once per process on first access and shared read-only afterwards.
//! `catalogs/typography.toml` at the repository root carries the same
//! questions in catalog-file form.

use std::sync::OnceLock;

use crate::catalog::Catalog;
use crate::model::{
    Canvas, Category, Classification, ClassificationKind, ClassificationOption, FontMatch,
    FontOption, Layer, LayeredHitTest, MainSubject, MarqueeItem, MicroTypography, Question,
    QuestionKind, StyleAdjustment,
};

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The built-in catalog.
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(build)
}

const TRAIN_YOUR_EYE: &str = "Train your eye for spacing, weight, and font details.";

fn build() -> Catalog {
    Catalog::new(vec![
        Category {
            id: "fundamentals".into(),
            title: "Fundamentals".into(),
            description: TRAIN_YOUR_EYE.into(),
            cover_image: Some("technology.png".into()),
            questions: vec![terminal(), x_height()],
        },
        Category {
            id: "classification".into(),
            title: "Classification".into(),
            description: TRAIN_YOUR_EYE.into(),
            cover_image: Some("technology.png".into()),
            questions: vec![times_serif(), brush_script(), real_futura(), monospace_grid()],
        },
        Category {
            id: "micro".into(),
            title: "Micro-Typography".into(),
            description: TRAIN_YOUR_EYE.into(),
            cover_image: Some("technology.png".into()),
            questions: vec![
                micro(
                    "q_33",
                    "what property was adjusted?",
                    ("afsd", "af sd"),
                    &["weight", "kerning", "tracking", "leading"],
                    &["kerning"],
                ),
                micro(
                    "q_38",
                    "identify ALL modifications made",
                    ("ek4f", "ek4f"),
                    &["kerning", "weight", "leading", "tracking", "font"],
                    &["kerning", "weight", "font"],
                ),
            ],
        },
        Category {
            id: "poster".into(),
            title: "Poster Logo".into(),
            description: "Master the typography of posters and logos.".into(),
            cover_image: Some("technology.png".into()),
            questions: vec![tech_poster(), coffee_branding()],
        },
    ])
}

fn hit_test(id: &str, title: &str, layers: &[(&str, bool)], result: &str) -> Question {
    let mut all = vec![Layer {
        id: "base".into(),
        is_base: true,
        is_correct: false,
    }];
    all.extend(layers.iter().map(|(id, is_correct)| Layer {
        id: id.to_string(),
        is_base: false,
        is_correct: *is_correct,
    }));
    Question {
        id: id.into(),
        title: title.into(),
        kind: QuestionKind::LayeredHitTest(LayeredHitTest {
            layers: all,
            result_asset: Some(result.into()),
        }),
    }
}

fn terminal() -> Question {
    hit_test(
        "q_4",
        "which part is the terminal?",
        &[
            ("upper-serif", false),
            ("bottom-serif", false),
            ("bowl", false),
            ("terminal", true),
        ],
        "fundamentals/ans2.svg",
    )
}

fn x_height() -> Question {
    // Both the arrow and its guidelines mark the x-height.
    hit_test(
        "q_5",
        "identify the x-height in this word",
        &[
            ("cap-height", false),
            ("baseline", false),
            ("x-height-arrow", true),
            ("guidelines", true),
        ],
        "fundamentals/ans1.svg",
    )
}

fn opt(id: &str, text: &str, is_correct: bool) -> ClassificationOption {
    ClassificationOption {
        id: id.into(),
        text: text.into(),
        is_correct,
        reveal_text: None,
        font_family: None,
    }
}

fn styled(id: &str, text: &str, is_correct: bool, font_family: &str) -> ClassificationOption {
    ClassificationOption {
        font_family: Some(font_family.into()),
        ..opt(id, text, is_correct)
    }
}

fn marquee(text: &str, font_family: &str, styles: &[&str]) -> Vec<MarqueeItem> {
    styles
        .iter()
        .map(|style| MarqueeItem {
            text: text.into(),
            style: style.to_string(),
            font_family: Some(font_family.into()),
        })
        .collect()
}

fn classification(id: &str, title: &str, body: Classification) -> Question {
    Question {
        id: id.into(),
        title: title.into(),
        kind: QuestionKind::Classification(body),
    }
}

fn times_serif() -> Question {
    classification(
        "q_8",
        "Is this font Serif or Sans-serif?",
        Classification {
            subtype: ClassificationKind::Classifier,
            main_subject: Some(MainSubject {
                text: "Times New Roman".into(),
                font_family: Some("Times New Roman, serif".into()),
            }),
            options: vec![opt("opt1", "Serif", true), opt("opt2", "Sans-serif", false)],
            required_fonts: vec!["Times New Roman".into()],
            marquee: marquee(
                "Times New Roman",
                "Times New Roman",
                &["green", "pink italic", "white light", "yellow bold"],
            ),
        },
    )
}

fn brush_script() -> Question {
    classification(
        "q_7",
        "What category is Brush Script?",
        Classification {
            subtype: ClassificationKind::Classifier,
            main_subject: None,
            options: vec![
                opt("1", "Serif", false),
                opt("2", "Sans-serif", false),
                opt("3", "Script", true),
                opt("4", "Display", false),
                opt("5", "Monospace", false),
            ],
            required_fonts: vec!["Brush Script MT".into()],
            marquee: marquee(
                "Brush Script",
                "Brush Script MT, cursive",
                &["white", "pink", "yellow", "blue"],
            ),
        },
    )
}

fn real_futura() -> Question {
    let imposter = |id: &str, reveal: &str, is_correct: bool, font: &str| ClassificationOption {
        reveal_text: Some(reveal.into()),
        ..styled(id, "Futura", is_correct, font)
    };
    classification(
        "q_10",
        "Identify the real Futura",
        Classification {
            subtype: ClassificationKind::Imposter,
            main_subject: None,
            options: vec![
                imposter("opt1", "Avenir", false, "Avenir, sans-serif"),
                imposter("opt2", "Futura", true, "Futura, sans-serif"),
                imposter("opt3", "Carrois", false, "'Carrois Gothic', sans-serif"),
            ],
            required_fonts: vec!["Futura".into(), "Avenir".into(), "Carrois Gothic".into()],
            marquee: marquee("Futura Future", "Futura", &["blue", "green italic"]),
        },
    )
}

fn monospace_grid() -> Question {
    classification(
        "q_12",
        "which of these are monospace fonts?",
        Classification {
            subtype: ClassificationKind::Grid,
            main_subject: None,
            options: vec![
                styled("opt1", "courier", true, "'Courier New', Courier, monospace"),
                styled("opt2", "monaco", true, "Monaco, Consolas, monospace"),
                styled("opt3", "space", true, "'Space Mono', monospace"),
                styled("opt4", "inria", false, "'Inria Serif', serif"),
                styled("opt5", "kadwa", false, "'Kadwa', serif"),
                styled("opt6", "ibm plex", true, "'IBM Plex Mono', monospace"),
            ],
            required_fonts: vec![
                "Space Mono".into(),
                "Inria Serif".into(),
                "Kadwa".into(),
                "IBM Plex Mono".into(),
            ],
            marquee: vec![],
        },
    )
}

fn micro(
    id: &str,
    title: &str,
    (before, after): (&str, &str),
    options: &[&str],
    correct: &[&str],
) -> Question {
    Question {
        id: id.into(),
        title: title.into(),
        kind: QuestionKind::MicroTypography(MicroTypography {
            before_text: before.into(),
            after_text: after.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_options: correct.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

fn font(id: &str, name: &str, is_correct: bool) -> FontOption {
    labelled_font(id, name, name, is_correct)
}

fn labelled_font(id: &str, label: &str, family: &str, is_correct: bool) -> FontOption {
    FontOption {
        id: id.into(),
        display_name: label.into(),
        font_family: family.into(),
        is_correct,
        style_adjustment: None,
    }
}

fn tech_poster() -> Question {
    Question {
        id: "q_poster".into(),
        title: "which font matches the technical, clean aesthetic of the poster's body text?"
            .into(),
        kind: QuestionKind::FontMatch(FontMatch {
            canvas: Canvas {
                width: 1280,
                height: 1554,
                background_image: "technology.png".into(),
            },
            options: vec![
                labelled_font("1", "MONOTON", "Monoton", false),
                // the label's spelling differs from the family name
                labelled_font("2", "B621 Mono", "B612 Mono", false),
                font("3", "JetBrains Mono", true),
                font("4", "Quicksand", false),
            ],
        }),
    }
}

fn coffee_branding() -> Question {
    Question {
        id: "q_coffee".into(),
        title: "Pick the font for this coffee shop branding".into(),
        kind: QuestionKind::FontMatch(FontMatch {
            canvas: Canvas {
                width: 1000,
                height: 1000,
                background_image: "coffee.png".into(),
            },
            options: vec![
                FontOption {
                    style_adjustment: Some(StyleAdjustment {
                        scale: 0.9,
                        ..Default::default()
                    }),
                    ..font("1", "Georgia", false)
                },
                font("2", "Optima", true),
                font("3", "Crimson Text", false),
                FontOption {
                    style_adjustment: Some(StyleAdjustment {
                        scale: 1.1,
                        ..Default::default()
                    }),
                    ..font("4", "Cormorant SC", false)
                },
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate_catalog;

    #[test]
    fn builtin_catalog_is_valid() {
        let warnings = validate_catalog(catalog());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn builtin_catalog_is_shared() {
        assert!(std::ptr::eq(catalog(), catalog()));
        assert_eq!(catalog().categories().len(), 4);
        assert_eq!(catalog().question_count(), 10);
    }

    #[test]
    fn grid_correct_set_matches_design() {
        let q12 = catalog().lookup("q_12").unwrap().question;
        assert_eq!(q12.correct_ids(), vec!["opt1", "opt2", "opt3", "opt6"]);
    }
}
