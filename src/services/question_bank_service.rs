use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult, FieldErrors},
    models::domain::{Difficulty, Question, QuestionType},
    models::dto::QuestionDraft,
    repositories::{QuestionRepository, SearchFilters},
};

/// Authoring and lookup surface over the question collection. Drafts are
/// validated before anything reaches the repository; reads pass straight
/// through.
pub struct QuestionBankService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionBankService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Field-level validation of authoring input. Pure: returns an empty map
    /// when the draft is acceptable and never fails.
    ///
    /// Field keys match the form field names so messages land next to the
    /// right inputs.
    pub fn validate(draft: &QuestionDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if draft.content.trim().is_empty() {
            errors.insert(
                "content".to_string(),
                "Question content is required".to_string(),
            );
        }

        if draft.category.trim().is_empty() {
            errors.insert("category".to_string(), "Category is required".to_string());
        }

        if draft.points < 1 {
            errors.insert(
                "points".to_string(),
                "Points must be at least 1".to_string(),
            );
        }

        if draft.question_type == QuestionType::MultipleChoice {
            if draft.non_blank_options().len() < 2 {
                errors.insert(
                    "options".to_string(),
                    "At least 2 options are required".to_string(),
                );
            }
            if draft.correct_answer.trim().is_empty() {
                errors.insert(
                    "correctAnswer".to_string(),
                    "Correct answer is required".to_string(),
                );
            } else if !draft.options.contains(&draft.correct_answer) {
                errors.insert(
                    "correctAnswer".to_string(),
                    "Correct answer must match one of the options".to_string(),
                );
            }
        }

        errors
    }

    pub async fn create(&self, draft: QuestionDraft) -> AppResult<Question> {
        let errors = Self::validate(&draft);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let question = draft.into_question(Uuid::new_v4().to_string());
        self.repository.create(question).await
    }

    pub async fn update(&self, id: &str, draft: QuestionDraft) -> AppResult<Question> {
        let errors = Self::validate(&draft);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let question = draft.into_question(id.to_string());
        self.repository.update(id, question).await
    }

    /// Deletes without validation; fails with `NotFound` when the id is
    /// absent. Returns the removed record.
    pub async fn delete(&self, id: &str) -> AppResult<Question> {
        self.repository.delete(id).await
    }

    pub async fn search(&self, term: &str, filters: &SearchFilters) -> AppResult<Vec<Question>> {
        self.repository.search(term, filters).await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.repository.get_categories().await
    }

    pub async fn types(&self) -> AppResult<Vec<QuestionType>> {
        self.repository.get_types().await
    }

    pub fn difficulty_levels() -> Vec<Difficulty> {
        Difficulty::LEVELS.to_vec()
    }
}
