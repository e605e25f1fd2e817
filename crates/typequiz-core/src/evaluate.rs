//! Correctness evaluation, one rule per variant.
//!
//! All evaluators are total: malformed questions (no correct option, unknown
//! ids in the selection) evaluate to `false` instead of failing.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::model::{ClassificationKind, Question, QuestionKind};

/// Decide whether `selection` answers `question` correctly.
pub fn evaluate(question: &Question, selection: &IndexSet<String>) -> bool {
    match &question.kind {
        QuestionKind::FontMatch(q) => single_pick(selection, |id| {
            q.options.iter().any(|o| o.id == id && o.is_correct)
        }),
        QuestionKind::Classification(q) => match q.subtype {
            ClassificationKind::Classifier | ClassificationKind::Imposter => {
                single_pick(selection, |id| {
                    q.options.iter().any(|o| o.id == id && o.is_correct)
                })
            }
            ClassificationKind::Grid => exact_set(
                selection,
                q.options
                    .iter()
                    .filter(|o| o.is_correct)
                    .map(|o| o.id.as_str()),
            ),
        },
        QuestionKind::MicroTypography(q) => {
            exact_set(selection, q.correct_options.iter().map(String::as_str))
        }
        QuestionKind::LayeredHitTest(q) => single_pick(selection, |id| {
            q.layers
                .iter()
                .any(|l| l.id == id && !l.is_base && l.is_correct)
        }),
    }
}

/// Exactly one id selected, and that id satisfies `is_correct`.
fn single_pick(selection: &IndexSet<String>, is_correct: impl Fn(&str) -> bool) -> bool {
    match selection.first() {
        Some(id) if selection.len() == 1 => is_correct(id),
        _ => false,
    }
}

/// Selection equals the correct set. An empty correct set never matches.
fn exact_set<'a>(selection: &IndexSet<String>, correct: impl Iterator<Item = &'a str>) -> bool {
    let correct: HashSet<&str> = correct.collect();
    !correct.is_empty()
        && selection.len() == correct.len()
        && selection.iter().all(|id| correct.contains(id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Classification, ClassificationOption, Layer, LayeredHitTest, MicroTypography,
    };

    fn sel(ids: &[&str]) -> IndexSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn option(id: &str, is_correct: bool) -> ClassificationOption {
        ClassificationOption {
            id: id.into(),
            text: id.into(),
            is_correct,
            reveal_text: None,
            font_family: None,
        }
    }

    fn classification(subtype: ClassificationKind, options: Vec<ClassificationOption>) -> Question {
        Question {
            id: "c".into(),
            title: "c".into(),
            kind: QuestionKind::Classification(Classification {
                subtype,
                main_subject: None,
                options,
                required_fonts: vec![],
                marquee: vec![],
            }),
        }
    }

    #[test]
    fn classifier_uses_selected_flag() {
        let q = classification(
            ClassificationKind::Classifier,
            vec![option("opt1", true), option("opt2", false)],
        );
        assert!(evaluate(&q, &sel(&["opt1"])));
        assert!(!evaluate(&q, &sel(&["opt2"])));
        assert!(!evaluate(&q, &sel(&[])));
        assert!(!evaluate(&q, &sel(&["opt1", "opt2"])));
        assert!(!evaluate(&q, &sel(&["ghost"])));
    }

    #[test]
    fn grid_needs_exact_set() {
        let q = classification(
            ClassificationKind::Grid,
            vec![option("a", true), option("b", true), option("c", false)],
        );
        assert!(evaluate(&q, &sel(&["b", "a"])));
        assert!(!evaluate(&q, &sel(&["a"])));
        assert!(!evaluate(&q, &sel(&["a", "b", "c"])));
        assert!(!evaluate(&q, &sel(&[])));
    }

    #[test]
    fn zero_correct_options_is_always_wrong() {
        let single = classification(
            ClassificationKind::Imposter,
            vec![option("a", false), option("b", false)],
        );
        assert!(!evaluate(&single, &sel(&["a"])));

        let grid = classification(ClassificationKind::Grid, vec![option("a", false)]);
        assert!(!evaluate(&grid, &sel(&[])));
        assert!(!evaluate(&grid, &sel(&["a"])));
    }

    #[test]
    fn micro_exact_match() {
        let q = Question {
            id: "q_38".into(),
            title: "identify ALL modifications made".into(),
            kind: QuestionKind::MicroTypography(MicroTypography {
                before_text: "ek4f".into(),
                after_text: "ek4f".into(),
                options: ["kerning", "weight", "leading", "tracking", "font"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                correct_options: vec!["kerning".into(), "weight".into(), "font".into()],
            }),
        };
        assert!(evaluate(&q, &sel(&["font", "kerning", "weight"])));
        assert!(!evaluate(&q, &sel(&["kerning", "weight"])));
    }

    #[test]
    fn any_correct_layer_wins_base_never_does() {
        let q = Question {
            id: "q_5".into(),
            title: "x-height".into(),
            kind: QuestionKind::LayeredHitTest(LayeredHitTest {
                layers: vec![
                    Layer {
                        id: "base".into(),
                        is_base: true,
                        is_correct: true,
                    },
                    Layer {
                        id: "arrow".into(),
                        is_base: false,
                        is_correct: true,
                    },
                    Layer {
                        id: "guides".into(),
                        is_base: false,
                        is_correct: true,
                    },
                    Layer {
                        id: "baseline".into(),
                        is_base: false,
                        is_correct: false,
                    },
                ],
                result_asset: None,
            }),
        };
        assert!(evaluate(&q, &sel(&["arrow"])));
        assert!(evaluate(&q, &sel(&["guides"])));
        assert!(!evaluate(&q, &sel(&["baseline"])));
        assert!(!evaluate(&q, &sel(&["base"])));
    }
}
