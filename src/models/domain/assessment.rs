use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    pub status: AssessmentStatus,
    pub scheduled_date: DateTime<Utc>,
    /// Duration of a live attempt, in minutes.
    pub duration: i64,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Test,
    Interview,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Draft,
    Scheduled,
    Active,
    Completed,
}

impl Assessment {
    pub fn new_draft(
        title: &str,
        assessment_type: AssessmentType,
        scheduled_date: DateTime<Utc>,
        duration: i64,
        questions: Vec<Question>,
    ) -> Self {
        Assessment {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            assessment_type,
            status: AssessmentStatus::Draft,
            scheduled_date,
            duration,
            questions,
        }
    }
}
