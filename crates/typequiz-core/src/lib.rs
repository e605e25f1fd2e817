//! typequiz-core: question catalog, answer state machine, and sequencing.
//!
//! This crate defines the question model that every quiz variant shares,
//! the per-question answer state machine, and the lookup and sequencing
//! logic that chains questions into a playthrough. It has no rendering
//! dependency.

pub mod answer;
pub mod builtin;
pub mod catalog;
pub mod error;
pub mod evaluate;
pub mod feedback;
pub mod model;
pub mod parser;
pub mod session;

pub use answer::{AnswerMachine, AnswerState, Rejection, Transition};
pub use catalog::{Catalog, QuestionLookup};
pub use error::QuizError;
pub use session::{NavigationTarget, Sequencer};
