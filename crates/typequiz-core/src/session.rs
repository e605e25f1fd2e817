//! Session sequencing: what to show after a question has been answered.

use serde::Serialize;

use crate::answer::AnswerMachine;
use crate::catalog::Catalog;
use crate::error::QuizError;

/// Where the front-end should navigate next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", content = "id", rename_all = "snake_case")]
pub enum NavigationTarget {
    Question(String),
    /// The category is exhausted.
    CategorySelect,
}

/// Resolves navigation against a read-only catalog.
#[derive(Debug, Clone, Copy)]
pub struct Sequencer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Sequencer<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Entry point of a category.
    pub fn start(&self, category_id: &str) -> Result<NavigationTarget, QuizError> {
        let target = match self.catalog.first_question(category_id)? {
            Some(q) => NavigationTarget::Question(q.id.clone()),
            None => NavigationTarget::CategorySelect,
        };
        tracing::debug!(category = category_id, ?target, "category started");
        Ok(target)
    }

    /// The question following `question_id` in its category, or category select.
    ///
    /// Does a fresh lookup every call. Only meaningful once the current
    /// question is submitted; see [`Sequencer::advance_from`].
    pub fn advance(&self, question_id: &str) -> Result<NavigationTarget, QuizError> {
        let found = self.catalog.lookup(question_id)?;
        let target = match found.next_question_id {
            Some(next) => NavigationTarget::Question(next.to_string()),
            None => NavigationTarget::CategorySelect,
        };
        tracing::info!(
            from = question_id,
            category = %found.category.id,
            ?target,
            "advancing"
        );
        Ok(target)
    }

    /// Like [`Sequencer::advance`], but refuses while the answer is still open.
    pub fn advance_from(&self, machine: &AnswerMachine<'_>) -> Result<NavigationTarget, QuizError> {
        let id = &machine.question().id;
        if !machine.is_submitted() {
            return Err(QuizError::NotSubmitted(id.clone()));
        }
        self.advance(id)
    }
}
