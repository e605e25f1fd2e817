//! Quiz engine error types.
//!
//! Every variant is recoverable: the front-end renders a fallback and offers
//! a way back to category selection.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// No category contains a question with this id.
    #[error("question not found: {0}")]
    QuestionNotFound(String),

    /// No category has this id.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Advance was requested before the question was answered.
    #[error("question {0} has not been submitted yet")]
    NotSubmitted(String),
}

impl QuizError {
    /// Returns `true` if the caller should fall back to category selection.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuizError::QuestionNotFound(_) | QuizError::CategoryNotFound(_)
        )
    }
}
