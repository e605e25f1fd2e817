//! Result feedback derived from an answer machine.
//!
//! Pure functions of the question and its answer state; the renderer maps
//! [`Mark`]s to colours.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::answer::AnswerMachine;
use crate::model::{ClassificationKind, Question, QuestionKind};

/// Headlines for a correct font match; one is picked at random.
pub const SUCCESS_PHRASES: [&str; 4] = [
    "That is correct! +1",
    "Fantastic! +1",
    "Excellent! +1",
    "Perfect Match! +1",
];

/// Headline for every other correct answer.
pub const CORRECT_HEADLINE: &str = "Correct! +1";

pub const FAILURE_HEADLINE: &str = "Oh no! The correct answer is:";

/// Hit-test questions may have several correct layers.
pub const FAILURE_HEADLINE_PLURAL: &str = "Oh no! The correct answers are:";

/// How a target should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Unanswered, not picked.
    Idle,
    /// Unanswered, currently picked.
    Selected,
    /// Answered; this target is part of the right answer.
    Correct,
    /// Answered; picked but wrong.
    WrongPick,
    /// Answered; neither picked nor correct.
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetFeedback<'a> {
    pub id: &'a str,
    /// Text to show, after any imposter reveal.
    pub text: &'a str,
    pub font_family: Option<&'a str>,
    pub mark: Mark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback<'a> {
    pub targets: Vec<TargetFeedback<'a>>,
    /// `None` while unanswered.
    pub correct: Option<bool>,
    /// Labels of the right answer, in display order.
    pub correct_labels: Vec<&'a str>,
    /// Overlay to show once answered, if the question has one.
    pub result_asset: Option<&'a str>,
    #[serde(skip)]
    question: &'a Question,
}

impl<'a> Feedback<'a> {
    pub fn for_machine(machine: &AnswerMachine<'a>) -> Self {
        let question = machine.question();
        let state = machine.state();
        let revealing = state.submitted
            && matches!(
                &question.kind,
                QuestionKind::Classification(c) if c.subtype == ClassificationKind::Imposter
            );

        let targets = question
            .targets()
            .into_iter()
            .map(|t| {
                let picked = state.selected.contains(t.id);
                let mark = match (state.submitted, t.is_correct, picked) {
                    (false, _, true) => Mark::Selected,
                    (false, _, false) => Mark::Idle,
                    (true, true, _) => Mark::Correct,
                    (true, false, true) => Mark::WrongPick,
                    (true, false, false) => Mark::Dimmed,
                };
                let text = if revealing && !t.is_correct {
                    reveal_text(machine, t.id).unwrap_or(t.label)
                } else {
                    t.label
                };
                TargetFeedback {
                    id: t.id,
                    text,
                    font_family: t.font_family,
                    mark,
                }
            })
            .collect();

        let correct_labels = question
            .targets()
            .into_iter()
            .filter(|t| t.is_correct)
            .map(|t| t.label)
            .collect();

        let result_asset = match &question.kind {
            QuestionKind::LayeredHitTest(q) if state.submitted => q.result_asset.as_deref(),
            _ => None,
        };

        Self {
            targets,
            correct: state.correct,
            correct_labels,
            result_asset,
            question,
        }
    }

    /// Headline shown once answered; `None` while unanswered.
    ///
    /// Font matches draw a random phrase from [`SUCCESS_PHRASES`]; the
    /// other kinds use [`CORRECT_HEADLINE`].
    pub fn headline<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let kind = &self.question.kind;
        match (self.correct?, kind) {
            (true, QuestionKind::FontMatch(_)) => {
                SUCCESS_PHRASES.choose(rng).map(|s| s.to_string())
            }
            (true, _) => Some(CORRECT_HEADLINE.to_string()),
            (false, QuestionKind::LayeredHitTest(_)) => Some(format!(
                "{FAILURE_HEADLINE_PLURAL} {}",
                self.correct_labels.join(", ")
            )),
            (false, _) => Some(format!(
                "{FAILURE_HEADLINE} {}",
                self.correct_labels.join(", ")
            )),
        }
    }
}

fn reveal_text<'a>(machine: &AnswerMachine<'a>, id: &str) -> Option<&'a str> {
    match &machine.question().kind {
        QuestionKind::Classification(c) => c
            .options
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.reveal_text.as_deref()),
        _ => None,
    }
}
