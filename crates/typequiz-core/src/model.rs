//! Core data model types for typequiz.
//!
//! A [`Question`] is a tagged union over the interaction shapes the quiz
//! supports. Everything downstream (evaluation, the answer state machine,
//! feedback) dispatches on [`QuestionKind`] rather than probing fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candidate labels used by micro-typography questions that don't list their own.
pub const DEFAULT_MICRO_OPTIONS: [&str; 4] = ["weight", "kerning", "tracking", "leading"];

/// A single quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier across the whole catalog.
    pub id: String,
    /// Prompt shown above the question.
    pub title: String,
    /// Variant-specific payload.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The variant of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    FontMatch(FontMatch),
    MicroTypography(MicroTypography),
    Classification(Classification),
    LayeredHitTest(LayeredHitTest),
}

/// Pick the font that fits a background composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMatch {
    pub canvas: Canvas,
    pub options: Vec<FontOption>,
}

/// Background composition a font-match question is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Opaque asset identifier, resolved by the renderer.
    pub background_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontOption {
    pub id: String,
    pub display_name: String,
    pub font_family: String,
    pub is_correct: bool,
    /// Optical correction applied when previewing this font on the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_adjustment: Option<StyleAdjustment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleAdjustment {
    #[serde(default)]
    pub x_offset: f32,
    #[serde(default)]
    pub y_offset: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for StyleAdjustment {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            scale: default_scale(),
        }
    }
}

/// Spot which typographic properties changed between two renderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroTypography {
    pub before_text: String,
    pub after_text: String,
    /// Candidate property labels, in display order.
    pub options: Vec<String>,
    /// Labels that together form the only accepted answer.
    pub correct_options: Vec<String>,
}

impl MicroTypography {
    /// The default candidate list as owned strings.
    pub fn default_options() -> Vec<String> {
        DEFAULT_MICRO_OPTIONS.iter().map(|s| s.to_string()).collect()
    }
}

/// Classify a typeface, find the imposter, or pick every member of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub subtype: ClassificationKind,
    /// Large specimen rendered above the options ("big text" classifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_subject: Option<MainSubject>,
    pub options: Vec<ClassificationOption>,
    /// Font families the renderer has to load before showing the options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_fonts: Vec<String>,
    /// Decorative scrolling specimens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marquee: Vec<MarqueeItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationKind {
    /// Single-select among labelled categories.
    Classifier,
    /// Single-select among identically labelled specimens; wrong ones reveal their real name.
    Imposter,
    /// Multi-select; every correct option must be picked.
    Grid,
}

impl fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationKind::Classifier => write!(f, "classifier"),
            ClassificationKind::Imposter => write!(f, "imposter"),
            ClassificationKind::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for ClassificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classifier" => Ok(ClassificationKind::Classifier),
            "imposter" | "impostor" => Ok(ClassificationKind::Imposter),
            "grid" => Ok(ClassificationKind::Grid),
            other => Err(format!("unknown classification subtype: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainSubject {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    /// Real name shown on a wrong imposter option once the answer is in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeItem {
    pub text: String,
    /// Free-form style hint for the renderer.
    #[serde(default)]
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Click the region of a letterform diagram that names the asked-for part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredHitTest {
    /// Layers in stacking order, bottom first.
    pub layers: Vec<Layer>,
    /// Answer overlay shown after submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_asset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    /// The non-interactive artwork every other layer sits on.
    #[serde(default)]
    pub is_base: bool,
    pub is_correct: bool,
}

/// How the player answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionStyle {
    /// One pick submits immediately.
    SingleSelect,
    /// Toggle any number of targets, then submit explicitly.
    MultiSelect,
    /// One click on a non-base layer submits immediately.
    HitTest,
}

impl fmt::Display for InteractionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionStyle::SingleSelect => write!(f, "single-select"),
            InteractionStyle::MultiSelect => write!(f, "multi-select"),
            InteractionStyle::HitTest => write!(f, "hit-test"),
        }
    }
}

/// A selectable thing on a question: an option, a property label, or a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub is_correct: bool,
    pub font_family: Option<&'a str>,
}

impl Question {
    /// Short name of the variant, as used in catalog files.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            QuestionKind::FontMatch(_) => "font_match",
            QuestionKind::MicroTypography(_) => "micro_typography",
            QuestionKind::Classification(_) => "classification",
            QuestionKind::LayeredHitTest(_) => "layered_hit_test",
        }
    }

    pub fn interaction(&self) -> InteractionStyle {
        match &self.kind {
            QuestionKind::FontMatch(_) => InteractionStyle::SingleSelect,
            QuestionKind::MicroTypography(_) => InteractionStyle::MultiSelect,
            QuestionKind::Classification(c) => match c.subtype {
                ClassificationKind::Classifier | ClassificationKind::Imposter => {
                    InteractionStyle::SingleSelect
                }
                ClassificationKind::Grid => InteractionStyle::MultiSelect,
            },
            QuestionKind::LayeredHitTest(_) => InteractionStyle::HitTest,
        }
    }

    /// Everything the player can pick, in display order.
    ///
    /// Base layers are not targets.
    pub fn targets(&self) -> Vec<Target<'_>> {
        match &self.kind {
            QuestionKind::FontMatch(q) => q
                .options
                .iter()
                .map(|o| Target {
                    id: &o.id,
                    label: &o.display_name,
                    is_correct: o.is_correct,
                    font_family: Some(&o.font_family),
                })
                .collect(),
            QuestionKind::MicroTypography(q) => q
                .options
                .iter()
                .map(|label| Target {
                    id: label,
                    label,
                    is_correct: q.correct_options.contains(label),
                    font_family: None,
                })
                .collect(),
            QuestionKind::Classification(q) => q
                .options
                .iter()
                .map(|o| Target {
                    id: &o.id,
                    label: &o.text,
                    is_correct: o.is_correct,
                    font_family: o.font_family.as_deref(),
                })
                .collect(),
            QuestionKind::LayeredHitTest(q) => q
                .layers
                .iter()
                .filter(|l| !l.is_base)
                .map(|l| Target {
                    id: &l.id,
                    label: &l.id,
                    is_correct: l.is_correct,
                    font_family: None,
                })
                .collect(),
        }
    }

    pub fn target(&self, id: &str) -> Option<Target<'_>> {
        self.targets().into_iter().find(|t| t.id == id)
    }

    /// Ids of every target flagged correct.
    pub fn correct_ids(&self) -> Vec<&str> {
        match &self.kind {
            // Micro answers are authored as a label list, which may name
            // labels that are not on offer; keep them so such a question
            // can never be answered correctly.
            QuestionKind::MicroTypography(q) => {
                q.correct_options.iter().map(String::as_str).collect()
            }
            _ => self
                .targets()
                .into_iter()
                .filter(|t| t.is_correct)
                .map(|t| t.id)
                .collect(),
        }
    }

    /// Whether `id` names the non-interactive base layer of a hit-test question.
    pub fn is_base_layer(&self, id: &str) -> bool {
        match &self.kind {
            QuestionKind::LayeredHitTest(q) => q.layers.iter().any(|l| l.is_base && l.id == id),
            _ => false,
        }
    }

    /// Font families that must be available before the question is interactive.
    pub fn required_fonts(&self) -> Vec<&str> {
        let mut fonts: Vec<&str> = match &self.kind {
            QuestionKind::FontMatch(q) => q.options.iter().map(|o| o.font_family.as_str()).collect(),
            QuestionKind::Classification(q) => {
                q.required_fonts.iter().map(String::as_str).collect()
            }
            QuestionKind::MicroTypography(_) | QuestionKind::LayeredHitTest(_) => Vec::new(),
        };
        let mut seen = std::collections::HashSet::new();
        fonts.retain(|f| seen.insert(*f));
        fonts
    }
}

/// An ordered, named playthrough track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Play order.
    pub questions: Vec<Question>,
}

impl Category {
    pub fn position(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }
}
