//! The question catalog and id lookup.

use serde::Serialize;

use crate::error::QuizError;
use crate::model::{Category, Question};

/// Every category of a quiz, in menu order.
///
/// Read-only once built: there is no API to add, remove or edit questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

/// Where a question lives and what follows it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionLookup<'a> {
    pub question: &'a Question,
    #[serde(serialize_with = "category_id")]
    pub category: &'a Category,
    /// Position of the question inside its category.
    pub index: usize,
    /// The next question in the same category, `None` if this is the last one.
    pub next_question_id: Option<&'a str>,
}

fn category_id<S: serde::Serializer>(category: &&Category, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&category.id)
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn category(&self, category_id: &str) -> Result<&Category, QuizError> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| QuizError::CategoryNotFound(category_id.to_string()))
    }

    /// First question of a category, `None` if the category is empty.
    pub fn first_question(&self, category_id: &str) -> Result<Option<&Question>, QuizError> {
        Ok(self.category(category_id)?.questions.first())
    }

    /// Find a question by id.
    ///
    /// Categories are searched in order; the first one holding the id wins.
    pub fn lookup(&self, question_id: &str) -> Result<QuestionLookup<'_>, QuizError> {
        for category in &self.categories {
            if let Some(index) = category.position(question_id) {
                return Ok(QuestionLookup {
                    question: &category.questions[index],
                    category,
                    index,
                    next_question_id: category.questions.get(index + 1).map(|q| q.id.as_str()),
                });
            }
        }
        Err(QuizError::QuestionNotFound(question_id.to_string()))
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories.iter().flat_map(|c| c.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layer, LayeredHitTest, QuestionKind};

    fn layer_question(id: &str) -> Question {
        Question {
            id: id.into(),
            title: format!("question {id}"),
            kind: QuestionKind::LayeredHitTest(LayeredHitTest {
                layers: vec![
                    Layer {
                        id: "base".into(),
                        is_base: true,
                        is_correct: false,
                    },
                    Layer {
                        id: "bowl".into(),
                        is_base: false,
                        is_correct: true,
                    },
                ],
                result_asset: None,
            }),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Category {
                id: "anatomy".into(),
                title: "Anatomy".into(),
                description: String::new(),
                cover_image: None,
                questions: vec![layer_question("a1"), layer_question("a2")],
            },
            Category {
                id: "shared".into(),
                title: "Shared".into(),
                description: String::new(),
                cover_image: None,
                questions: vec![layer_question("s1"), layer_question("a2")],
            },
        ])
    }

    #[test]
    fn lookup_returns_next_in_category() {
        let catalog = catalog();
        let found = catalog.lookup("a1").unwrap();
        assert_eq!(found.question.id, "a1");
        assert_eq!(found.category.id, "anatomy");
        assert_eq!(found.index, 0);
        assert_eq!(found.next_question_id, Some("a2"));
    }

    #[test]
    fn lookup_last_question_has_no_next() {
        let catalog = catalog();
        let found = catalog.lookup("s1").unwrap();
        assert_eq!(found.next_question_id, Some("a2"));
        let found = catalog.lookup("a2").unwrap();
        // First category holding the id wins.
        assert_eq!(found.category.id, "anatomy");
        assert_eq!(found.next_question_id, None);
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let err = catalog().lookup("nope").unwrap_err();
        assert_eq!(err, QuizError::QuestionNotFound("nope".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn category_accessors() {
        let catalog = catalog();
        assert_eq!(catalog.question_count(), 4);
        assert_eq!(
            catalog.first_question("shared").unwrap().map(|q| q.id.as_str()),
            Some("s1")
        );
        assert!(matches!(
            catalog.category("missing"),
            Err(QuizError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn lookup_serializes_category_as_id() {
        let catalog = catalog();
        let json = serde_json::to_value(catalog.lookup("a1").unwrap()).unwrap();
        assert_eq!(json["category"], "anatomy");
        assert_eq!(json["next_question_id"], "a2");
        assert_eq!(json["question"]["kind"], "layered_hit_test");
    }
}
