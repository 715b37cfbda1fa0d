use std::sync::Arc;

use serde::Serialize;

use crate::{
    errors::AppResult,
    models::domain::{Assessment, AssessmentStatus, AssessmentType, CandidateStatus},
    repositories::{AssessmentRepository, CandidateRepository},
};

/// Headline numbers for the recruiter dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_tests: usize,
    pub pending_interviews: usize,
    /// Share of candidates who finished their assessment, rounded, 0-100.
    pub completion_rate: u8,
    pub total_candidates: usize,
}

pub struct DashboardService {
    assessment_repository: Arc<dyn AssessmentRepository>,
    candidate_repository: Arc<dyn CandidateRepository>,
}

impl DashboardService {
    pub fn new(
        assessment_repository: Arc<dyn AssessmentRepository>,
        candidate_repository: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            assessment_repository,
            candidate_repository,
        }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let (assessments, candidates) = futures::try_join!(
            self.assessment_repository.get_all(),
            self.candidate_repository.get_all()
        )?;

        let active_tests = assessments
            .iter()
            .filter(|a| a.status == AssessmentStatus::Active)
            .count();
        let pending_interviews = assessments
            .iter()
            .filter(|a| {
                a.assessment_type == AssessmentType::Interview
                    && a.status == AssessmentStatus::Scheduled
            })
            .count();
        let completed = candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Completed)
            .count();
        let completion_rate = if candidates.is_empty() {
            0
        } else {
            (completed as f64 / candidates.len() as f64 * 100.0).round() as u8
        };

        Ok(DashboardStats {
            active_tests,
            pending_interviews,
            completion_rate,
            total_candidates: candidates.len(),
        })
    }

    /// Calendar backing: every assessment, earliest scheduled date first.
    pub async fn schedule(&self) -> AppResult<Vec<Assessment>> {
        let mut assessments = self.assessment_repository.get_all().await?;
        assessments.sort_by_key(|a| a.scheduled_date);
        Ok(assessments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Assessment, Candidate};
    use crate::repositories::{
        InMemoryAssessmentRepository, InMemoryCandidateRepository, Latency,
    };
    use chrono::{Duration, Utc};

    fn make_assessment(
        title: &str,
        assessment_type: AssessmentType,
        status: AssessmentStatus,
        offset_days: i64,
    ) -> Assessment {
        let mut assessment = Assessment::new_draft(
            title,
            assessment_type,
            Utc::now() + Duration::days(offset_days),
            30,
            vec![],
        );
        assessment.status = status;
        assessment
    }

    fn make_candidate(name: &str, status: CandidateStatus) -> Candidate {
        let mut candidate = Candidate::new_invited(name, "candidate@example.com");
        candidate.status = status;
        candidate
    }

    fn service(assessments: Vec<Assessment>, candidates: Vec<Candidate>) -> DashboardService {
        DashboardService::new(
            Arc::new(InMemoryAssessmentRepository::with_records(
                assessments,
                Latency::none(),
            )),
            Arc::new(InMemoryCandidateRepository::with_records(
                candidates,
                Latency::none(),
            )),
        )
    }

    #[tokio::test]
    async fn stats_counts_active_tests_and_pending_interviews() {
        let service = service(
            vec![
                make_assessment("t1", AssessmentType::Test, AssessmentStatus::Active, 0),
                make_assessment("t2", AssessmentType::Test, AssessmentStatus::Scheduled, 1),
                make_assessment(
                    "i1",
                    AssessmentType::Interview,
                    AssessmentStatus::Scheduled,
                    2,
                ),
            ],
            vec![
                make_candidate("a", CandidateStatus::Completed),
                make_candidate("b", CandidateStatus::Active),
                make_candidate("c", CandidateStatus::Completed),
            ],
        );

        let stats = service.stats().await.expect("stats");

        assert_eq!(stats.active_tests, 1);
        assert_eq!(stats.pending_interviews, 1);
        assert_eq!(stats.completion_rate, 67);
        assert_eq!(stats.total_candidates, 3);
    }

    #[tokio::test]
    async fn stats_with_no_candidates_has_zero_completion_rate() {
        let service = service(vec![], vec![]);

        let stats = service.stats().await.expect("stats");

        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.total_candidates, 0);
    }

    #[tokio::test]
    async fn schedule_sorts_by_date_ascending() {
        let service = service(
            vec![
                make_assessment("later", AssessmentType::Test, AssessmentStatus::Scheduled, 5),
                make_assessment("soon", AssessmentType::Test, AssessmentStatus::Scheduled, 1),
            ],
            vec![],
        );

        let schedule = service.schedule().await.expect("schedule");

        assert_eq!(schedule[0].title, "soon");
        assert_eq!(schedule[1].title, "later");
    }
}
