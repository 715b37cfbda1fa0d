use serde::{Deserialize, Serialize};

use crate::models::domain::{Difficulty, Question, QuestionType};

/// Raw question-authoring input, exactly as the form collects it: the option
/// list may contain blank rows and `correct_answer` may be empty. It only
/// becomes a [`Question`] after validation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: String,
    pub difficulty: Difficulty,
    pub points: i16,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

impl Default for QuestionDraft {
    /// The blank form: multiple-choice, four empty option rows, one point.
    fn default() -> Self {
        QuestionDraft {
            content: String::new(),
            question_type: QuestionType::MultipleChoice,
            category: String::new(),
            difficulty: Difficulty::Easy,
            points: 1,
            options: vec![String::new(); 4],
            correct_answer: String::new(),
        }
    }
}

impl QuestionDraft {
    /// Options with non-blank content, values kept untrimmed.
    pub fn non_blank_options(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| !option.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Builds the committed record. Blank option rows are stripped for
    /// multiple-choice questions; other types carry no option list.
    pub fn into_question(self, id: String) -> Question {
        let options = match self.question_type {
            QuestionType::MultipleChoice => Some(self.non_blank_options()),
            _ => None,
        };
        let correct_answer = if self.correct_answer.trim().is_empty() {
            None
        } else {
            Some(self.correct_answer)
        };

        Question {
            id,
            content: self.content,
            question_type: self.question_type,
            category: self.category,
            difficulty: self.difficulty,
            points: self.points,
            options,
            correct_answer,
        }
    }
}
