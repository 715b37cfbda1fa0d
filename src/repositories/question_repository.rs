use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, Question, QuestionType},
    repositories::Latency,
};

/// Search filters for the question bank. `None` turns a filter off (the UI's
/// "all" choice); active filters compose by AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Question>>;
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn update(&self, id: &str, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: &str) -> AppResult<Question>;
    async fn get_by_type(&self, question_type: QuestionType) -> AppResult<Vec<Question>>;
    async fn get_by_category(&self, category: &str) -> AppResult<Vec<Question>>;
    async fn get_by_difficulty(&self, difficulty: Difficulty) -> AppResult<Vec<Question>>;
    async fn search(&self, term: &str, filters: &SearchFilters) -> AppResult<Vec<Question>>;
    async fn get_categories(&self) -> AppResult<Vec<String>>;
    async fn get_difficulties(&self) -> AppResult<Vec<Difficulty>>;
    async fn get_types(&self) -> AppResult<Vec<QuestionType>>;
}

pub struct InMemoryQuestionRepository {
    records: RwLock<Vec<Question>>,
    latency: Latency,
}

impl InMemoryQuestionRepository {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<Question>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn get_all(&self) -> AppResult<Vec<Question>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.iter().find(|q| q.id == id).cloned())
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        if records.iter().any(|q| q.id == question.id) {
            return Err(AppError::AlreadyExists(format!(
                "Question with id '{}' already exists",
                question.id
            )));
        }
        records.push(question.clone());
        Ok(question)
    }

    async fn update(&self, id: &str, question: Question) -> AppResult<Question> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let slot = records.iter_mut().find(|q| q.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Question with id '{}' not found", id))
        })?;
        let mut question = question;
        question.id = id.to_string();
        *slot = question.clone();
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<Question> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let index = records.iter().position(|q| q.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Question with id '{}' not found", id))
        })?;
        Ok(records.remove(index))
    }

    async fn get_by_type(&self, question_type: QuestionType) -> AppResult<Vec<Question>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|q| q.question_type == question_type)
            .cloned()
            .collect())
    }

    async fn get_by_category(&self, category: &str) -> AppResult<Vec<Question>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn get_by_difficulty(&self, difficulty: Difficulty) -> AppResult<Vec<Question>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .cloned()
            .collect())
    }

    /// A blank term matches everything; otherwise case-insensitive substring
    /// against content or any option. Source order is preserved and the
    /// underlying collection is never touched.
    async fn search(&self, term: &str, filters: &SearchFilters) -> AppResult<Vec<Question>> {
        self.latency.simulate().await;
        let needle = term.trim().to_lowercase();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|q| needle.is_empty() || q.matches_term(&needle))
            .filter(|q| {
                filters
                    .category
                    .as_deref()
                    .map_or(true, |category| q.category == category)
            })
            .filter(|q| {
                filters
                    .difficulty
                    .map_or(true, |difficulty| q.difficulty == difficulty)
            })
            .filter(|q| {
                filters
                    .question_type
                    .map_or(true, |question_type| q.question_type == question_type)
            })
            .cloned()
            .collect())
    }

    async fn get_categories(&self) -> AppResult<Vec<String>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        let mut categories: Vec<String> = records.iter().map(|q| q.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn get_difficulties(&self) -> AppResult<Vec<Difficulty>> {
        self.latency.simulate().await;
        Ok(Difficulty::LEVELS.to_vec())
    }

    async fn get_types(&self) -> AppResult<Vec<QuestionType>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        let mut types: Vec<QuestionType> = records.iter().map(|q| q.question_type).collect();
        types.sort_by_key(|t| t.as_str());
        types.dedup();
        Ok(types)
    }
}
