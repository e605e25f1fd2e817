//! Per-question answer state machine.
//!
//! One [`AnswerMachine`] exists per question visit. It starts unanswered,
//! accepts selection input until the answer is submitted, and is frozen from
//! then on. Inputs that don't apply are ignored and reported as
//! [`Transition::Ignored`], never as errors: they happen during ordinary
//! rapid clicking.

use indexmap::IndexSet;
use serde::Serialize;

use crate::evaluate::evaluate;
use crate::model::{InteractionStyle, Question};

/// Selection, submission flag, and the correctness frozen at submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerState {
    /// Picked ids in click order. Compared as a set.
    pub selected: IndexSet<String>,
    pub submitted: bool,
    /// `None` until submitted.
    pub correct: Option<bool>,
}

/// What an input did to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The selection changed; still unanswered.
    Updated,
    /// The answer was submitted with this verdict.
    Submitted { correct: bool },
    /// Nothing changed.
    Ignored(Rejection),
}

/// Why an input was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    AlreadySubmitted,
    /// The operation doesn't exist for this question's interaction style.
    WrongInteraction(InteractionStyle),
    /// Not an option, label or layer of this question.
    UnknownTarget(String),
    /// The base layer of a hit-test question is not clickable.
    BaseLayer,
}

#[derive(Debug, Clone)]
pub struct AnswerMachine<'q> {
    question: &'q Question,
    state: AnswerState,
}

impl<'q> AnswerMachine<'q> {
    pub fn new(question: &'q Question) -> Self {
        Self {
            question,
            state: AnswerState::default(),
        }
    }

    pub fn question(&self) -> &'q Question {
        self.question
    }

    pub fn state(&self) -> &AnswerState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state.submitted
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.state.correct
    }

    /// False once the answer is in.
    pub fn is_interactive(&self) -> bool {
        !self.state.submitted
    }

    /// Pick a single option or click a layer. Submits immediately.
    pub fn select(&mut self, id: &str) -> Transition {
        let style = self.question.interaction();
        if let Err(rejection) = self.check(id, style, |s| s != InteractionStyle::MultiSelect) {
            return self.ignore(rejection);
        }
        self.state.selected.clear();
        self.state.selected.insert(id.to_string());
        self.finish()
    }

    /// Add or remove a target from a multi-select answer.
    pub fn toggle(&mut self, id: &str) -> Transition {
        let style = self.question.interaction();
        if let Err(rejection) = self.check(id, style, |s| s == InteractionStyle::MultiSelect) {
            return self.ignore(rejection);
        }
        // shift_remove keeps the remaining click order intact
        if !self.state.selected.shift_remove(id) {
            self.state.selected.insert(id.to_string());
        }
        tracing::debug!(
            question = %self.question.id,
            selected = ?self.state.selected,
            "selection toggled"
        );
        Transition::Updated
    }

    /// Submit a multi-select answer. An empty selection is a wrong answer.
    pub fn submit(&mut self) -> Transition {
        if self.state.submitted {
            return self.ignore(Rejection::AlreadySubmitted);
        }
        let style = self.question.interaction();
        if style != InteractionStyle::MultiSelect {
            return self.ignore(Rejection::WrongInteraction(style));
        }
        self.finish()
    }

    fn check(
        &self,
        id: &str,
        style: InteractionStyle,
        allowed: impl Fn(InteractionStyle) -> bool,
    ) -> Result<(), Rejection> {
        if self.state.submitted {
            return Err(Rejection::AlreadySubmitted);
        }
        if !allowed(style) {
            return Err(Rejection::WrongInteraction(style));
        }
        if self.question.is_base_layer(id) {
            return Err(Rejection::BaseLayer);
        }
        if self.question.target(id).is_none() {
            return Err(Rejection::UnknownTarget(id.to_string()));
        }
        Ok(())
    }

    fn finish(&mut self) -> Transition {
        let correct = evaluate(self.question, &self.state.selected);
        self.state.submitted = true;
        self.state.correct = Some(correct);
        tracing::info!(
            question = %self.question.id,
            selected = ?self.state.selected,
            correct,
            "answer submitted"
        );
        Transition::Submitted { correct }
    }

    fn ignore(&self, rejection: Rejection) -> Transition {
        tracing::debug!(question = %self.question.id, ?rejection, "input ignored");
        Transition::Ignored(rejection)
    }
}
