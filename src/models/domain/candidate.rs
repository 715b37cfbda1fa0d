use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: CandidateStatus,
    /// Percentage score of the most recently completed assessment, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub assessments: Vec<AssessmentRef>,
}

/// Link from a candidate to an assessment. Ownership is by reference: the
/// candidate for a given assessment is found by scanning these entries.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRef {
    pub assessment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Invited,
    Scheduled,
    Active,
    Completed,
}

impl Candidate {
    pub fn new_invited(name: &str, email: &str) -> Self {
        Candidate {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            status: CandidateStatus::Invited,
            score: None,
            assessments: Vec::new(),
        }
    }

    pub fn is_assigned(&self, assessment_id: &str) -> bool {
        self.assessments
            .iter()
            .any(|reference| reference.assessment_id == assessment_id)
    }
}
