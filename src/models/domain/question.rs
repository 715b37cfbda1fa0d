use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: String,
    pub difficulty: Difficulty,
    pub points: i16,
    /// Present for multiple-choice questions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl Question {
    /// Case-insensitive substring match against the content or any option.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if self.content.to_lowercase().contains(&needle) {
            return true;
        }
        self.options
            .iter()
            .flatten()
            .any(|option| option.to_lowercase().contains(&needle))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    TrueFalse,
    Code,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Text => "text",
            QuestionType::TrueFalse => "true-false",
            QuestionType::Code => "code",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Copy)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The fixed set offered by the authoring UI, not derived from data.
    pub const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}
