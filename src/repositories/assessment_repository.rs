use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Assessment, AssessmentStatus, AssessmentType},
    repositories::Latency,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Assessment>>;
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Assessment>>;
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment>;
    async fn update(&self, id: &str, assessment: Assessment) -> AppResult<Assessment>;
    async fn delete(&self, id: &str) -> AppResult<Assessment>;
    async fn get_by_type(&self, assessment_type: AssessmentType) -> AppResult<Vec<Assessment>>;
    async fn get_by_status(&self, status: AssessmentStatus) -> AppResult<Vec<Assessment>>;
}

/// In-memory collection with simulated latency. Records keep insertion order,
/// and every read hands out clones so callers can never alias internal state.
pub struct InMemoryAssessmentRepository {
    records: RwLock<Vec<Assessment>>,
    latency: Latency,
}

impl InMemoryAssessmentRepository {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<Assessment>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn get_all(&self) -> AppResult<Vec<Assessment>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Assessment>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, assessment: Assessment) -> AppResult<Assessment> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        if records.iter().any(|a| a.id == assessment.id) {
            return Err(AppError::AlreadyExists(format!(
                "Assessment with id '{}' already exists",
                assessment.id
            )));
        }
        records.push(assessment.clone());
        Ok(assessment)
    }

    async fn update(&self, id: &str, assessment: Assessment) -> AppResult<Assessment> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let slot = records.iter_mut().find(|a| a.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Assessment with id '{}' not found", id))
        })?;
        // The addressed id wins over whatever the replacement carries.
        let mut assessment = assessment;
        assessment.id = id.to_string();
        *slot = assessment.clone();
        Ok(assessment)
    }

    async fn delete(&self, id: &str) -> AppResult<Assessment> {
        self.latency.simulate().await;
        let mut records = self.records.write().await;
        let index = records.iter().position(|a| a.id == id).ok_or_else(|| {
            AppError::NotFound(format!("Assessment with id '{}' not found", id))
        })?;
        Ok(records.remove(index))
    }

    async fn get_by_type(&self, assessment_type: AssessmentType) -> AppResult<Vec<Assessment>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| a.assessment_type == assessment_type)
            .cloned()
            .collect())
    }

    async fn get_by_status(&self, status: AssessmentStatus) -> AppResult<Vec<Assessment>> {
        self.latency.simulate().await;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| a.status == status)
            .cloned()
            .collect())
    }
}
