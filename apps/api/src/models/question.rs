use serde::{Deserialize, Serialize};

/// The four question flavors the evaluator knows how to grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Hr,
    Technical,
    Coding,
    Behavioral,
}

/// A single interview question. Immutable once defined; owned by the
/// question bank and cloned into sessions as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: u8,
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hints: Vec<String>,
}

impl Question {
    pub fn new(
        id: &str,
        text: &str,
        question_type: QuestionType,
        difficulty: u8,
        category: &str,
        hints: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            question_type,
            difficulty,
            category: category.to_string(),
            hints: hints.iter().map(|h| h.to_string()).collect(),
        }
    }
}
