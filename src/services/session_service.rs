use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        Assessment, AssessmentStatus, Candidate, CandidateStatus, Session, SessionResult,
        SubmitReason,
    },
    repositories::{AssessmentRepository, CandidateRepository},
};

/// Starts live sessions and propagates their results.
///
/// The session itself is local and authoritative: completion never waits on,
/// or rolls back for, the repository writes that follow it.
pub struct SessionService {
    assessment_repository: Arc<dyn AssessmentRepository>,
    candidate_repository: Arc<dyn CandidateRepository>,
}

/// What came out of finishing a session. `result` is always present;
/// `candidate` is the updated record when propagation reached one, and
/// `propagation_error` carries the non-fatal failure if it didn't.
#[derive(Clone, Debug)]
pub struct CompletionOutcome {
    pub result: SessionResult,
    pub candidate: Option<Candidate>,
    pub propagation_error: Option<AppError>,
}

impl SessionService {
    pub fn new(
        assessment_repository: Arc<dyn AssessmentRepository>,
        candidate_repository: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            assessment_repository,
            candidate_repository,
        }
    }

    /// Loads the assessment and opens a running session over it.
    pub async fn start(&self, assessment_id: &str) -> AppResult<Session> {
        let assessment = self
            .assessment_repository
            .get_by_id(assessment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Assessment with id '{}' not found",
                    assessment_id
                ))
            })?;

        log::info!(
            "starting session for assessment '{}' ({} questions, {} min)",
            assessment.id,
            assessment.questions.len(),
            assessment.duration
        );
        Ok(Session::start(assessment))
    }

    /// Submits the session (idempotent) and pushes the result out to the
    /// linked candidate and the assessment record. Propagation failure is
    /// reported in the outcome, not raised: the local result stands.
    pub async fn complete(&self, session: &mut Session, reason: SubmitReason) -> CompletionOutcome {
        let result = session.submit(reason);
        let assessment = session.assessment().clone();

        match self.propagate(&assessment, result).await {
            Ok(candidate) => CompletionOutcome {
                result,
                candidate,
                propagation_error: None,
            },
            Err(err) => {
                log::warn!(
                    "failed to propagate result for assessment '{}': {}",
                    assessment.id,
                    err
                );
                CompletionOutcome {
                    result,
                    candidate: None,
                    propagation_error: Some(AppError::Propagation(err.to_string())),
                }
            }
        }
    }

    async fn propagate(
        &self,
        assessment: &Assessment,
        result: SessionResult,
    ) -> AppResult<Option<Candidate>> {
        // The candidate is found by scanning for a reference to this
        // assessment; there is no foreign key in the other direction.
        let candidates = self.candidate_repository.get_all().await?;
        let linked = candidates
            .into_iter()
            .find(|candidate| candidate.is_assigned(&assessment.id));

        let candidate = match linked {
            Some(mut candidate) => {
                candidate.score = Some(result.score);
                candidate.status = CandidateStatus::Completed;
                let id = candidate.id.clone();
                Some(self.candidate_repository.update(&id, candidate).await?)
            }
            None => {
                log::debug!("no candidate linked to assessment '{}'", assessment.id);
                None
            }
        };

        let mut completed = assessment.clone();
        completed.status = AssessmentStatus::Completed;
        self.assessment_repository
            .update(&assessment.id, completed)
            .await?;

        Ok(candidate)
    }
}

/// Drives a session's countdown from a 1-second interval until it reaches the
/// terminal state, then returns the result. This is the single timer a live
/// session owns; dropping the future cancels it, and it stops on its own as
/// soon as the session completes for any reason (including a manual submit
/// from another handle).
///
/// Missed intervals are delivered in a burst, one `tick` per logical second,
/// so a stalled clock still submits exactly once.
pub async fn run_countdown(session: Arc<Mutex<Session>>) -> SessionResult {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    // The first tick of a tokio interval fires immediately; swallow it so the
    // countdown starts a full second after the session opens.
    interval.tick().await;

    loop {
        interval.tick().await;
        let mut session = session.lock().await;
        if let Some(result) = session.tick() {
            return result;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{AssessmentRef, AssessmentType, Difficulty, Question, QuestionType};
    use crate::repositories::assessment_repository::MockAssessmentRepository;
    use crate::repositories::candidate_repository::MockCandidateRepository;
    use chrono::Utc;

    fn make_question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            content: format!("Question {}", id),
            question_type: QuestionType::MultipleChoice,
            category: "General".to_string(),
            difficulty: Difficulty::Easy,
            points: 1,
            options: Some(vec!["A".into(), "B".into()]),
            correct_answer: Some(correct.to_string()),
        }
    }

    fn make_assessment(id: &str) -> Assessment {
        let mut assessment = Assessment::new_draft(
            "Screening",
            AssessmentType::Test,
            Utc::now(),
            30,
            vec![make_question("q1", "A"), make_question("q2", "B")],
        );
        assessment.id = id.to_string();
        assessment.status = AssessmentStatus::Active;
        assessment
    }

    fn make_candidate(id: &str, assessment_id: &str) -> Candidate {
        let mut candidate = Candidate::new_invited("Jane Smith", "jane@example.com");
        candidate.id = id.to_string();
        candidate.status = CandidateStatus::Active;
        candidate.assessments.push(AssessmentRef {
            assessment_id: assessment_id.to_string(),
            scheduled_date: None,
        });
        candidate
    }

    #[tokio::test]
    async fn start_fails_with_not_found_for_missing_assessment() {
        let mut assessments = MockAssessmentRepository::new();
        assessments
            .expect_get_by_id()
            .returning(|_| Ok(None));
        let candidates = MockCandidateRepository::new();

        let service = SessionService::new(Arc::new(assessments), Arc::new(candidates));

        let result = service.start("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn complete_updates_the_linked_candidate() {
        let mut assessments = MockAssessmentRepository::new();
        assessments
            .expect_update()
            .withf(|id, assessment| {
                id == "a-1" && assessment.status == AssessmentStatus::Completed
            })
            .returning(|_, assessment| Ok(assessment));

        let mut candidates = MockCandidateRepository::new();
        candidates
            .expect_get_all()
            .returning(|| Ok(vec![make_candidate("c-1", "a-1")]));
        candidates
            .expect_update()
            .withf(|id, candidate| {
                id == "c-1"
                    && candidate.score == Some(100)
                    && candidate.status == CandidateStatus::Completed
            })
            .times(1)
            .returning(|_, candidate| Ok(candidate));

        let service = SessionService::new(Arc::new(assessments), Arc::new(candidates));
        let mut session = Session::start(make_assessment("a-1"));
        session.record_answer("q1", "A");
        session.record_answer("q2", "B");

        let outcome = service.complete(&mut session, SubmitReason::Manual).await;

        assert_eq!(outcome.result.score, 100);
        assert!(outcome.propagation_error.is_none());
        let candidate = outcome.candidate.expect("candidate should be updated");
        assert_eq!(candidate.score, Some(100));
    }

    #[tokio::test]
    async fn propagation_failure_keeps_the_local_result() {
        let assessments = MockAssessmentRepository::new();
        let mut candidates = MockCandidateRepository::new();
        candidates
            .expect_get_all()
            .returning(|| Err(AppError::NotFound("collection offline".to_string())));

        let service = SessionService::new(Arc::new(assessments), Arc::new(candidates));
        let mut session = Session::start(make_assessment("a-1"));
        session.record_answer("q1", "A");

        let outcome = service.complete(&mut session, SubmitReason::Manual).await;

        assert_eq!(outcome.result.score, 50);
        assert!(session.is_completed());
        assert!(matches!(
            outcome.propagation_error,
            Some(AppError::Propagation(_))
        ));
    }

    #[tokio::test]
    async fn complete_without_linked_candidate_still_closes_assessment() {
        let mut assessments = MockAssessmentRepository::new();
        assessments
            .expect_update()
            .times(1)
            .returning(|_, assessment| Ok(assessment));
        let mut candidates = MockCandidateRepository::new();
        candidates.expect_get_all().returning(|| Ok(vec![]));

        let service = SessionService::new(Arc::new(assessments), Arc::new(candidates));
        let mut session = Session::start(make_assessment("a-1"));

        let outcome = service.complete(&mut session, SubmitReason::Timeout).await;

        assert!(outcome.candidate.is_none());
        assert!(outcome.propagation_error.is_none());
        assert_eq!(outcome.result.reason, SubmitReason::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn run_countdown_times_out_a_short_session() {
        let mut assessment = make_assessment("a-1");
        assessment.duration = 1; // 60 seconds on the clock
        let session = Arc::new(Mutex::new(Session::start(assessment)));

        let result = run_countdown(Arc::clone(&session)).await;

        assert_eq!(result.reason, SubmitReason::Timeout);
        let session = session.lock().await;
        assert_eq!(session.remaining_seconds(), 0);
        assert!(session.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn run_countdown_stops_after_manual_submit() {
        let session = Arc::new(Mutex::new(Session::start(make_assessment("a-1"))));

        session.lock().await.submit(SubmitReason::Manual);
        let result = run_countdown(Arc::clone(&session)).await;

        assert_eq!(result.reason, SubmitReason::Manual);
    }
}
