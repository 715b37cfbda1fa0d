use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Candidate, CandidateStatus},
    repositories::Latency,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Candidate>>;
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Candidate>>;
    async fn create(&self, candidate: Candidate) -> AppResult<Candidate>;
    async fn update(&self, id: &str, candidate: Candidate) -> AppResult<Candidate>;
    async fn delete(&self, id: &str) -> AppResult<Candidate>;
    async fn get_by_status(&self, status: CandidateStatus) -> AppResult<Vec<Candidate>>;
    async fn search_by_name(&self, name: &str) -> AppResult<Vec<Candidate>>;
}

pub struct InMemoryCandidateRepository {
    records: RwLock<Vec<Candidate>>,
    latency: Latency,
}

impl InMemoryCandidateRepository {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<Candidate>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn get_all(&self) -> AppResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Candidate>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, candidate: Candidate) -> AppResult<Candidate> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        if records.iter().any(|c| c.id == candidate.id) {
            return Err(AppError::AlreadyExists(format!(
                "Candidate with id '{}' already exists",
                candidate.id
            )));
        }
        records.push(candidate.clone());
        Ok(candidate)
    }

    async fn update(&self, id: &str, candidate: Candidate) -> AppResult<Candidate> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let slot = records.iter_mut().find(|c| c.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Candidate with id '{}' not found", id))
        })?;
        let mut candidate = candidate;
        candidate.id = id.to_string();
        *slot = candidate.clone();
        Ok(candidate)
    }

    async fn delete(&self, id: &str) -> AppResult<Candidate> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let index = records.iter().position(|c| c.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Candidate with id '{}' not found", id))
        })?;
        Ok(records.remove(index))
    }

    async fn get_by_status(&self, status: CandidateStatus) -> AppResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn search_by_name(&self, name: &str) -> AppResult<Vec<Candidate>> {
        self.latency.simulate().await;
        let needle = name.to_lowercase();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
