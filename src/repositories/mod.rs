use std::time::Duration;

use rand::Rng;

pub mod assessment_repository;
pub mod candidate_repository;
pub mod question_repository;

pub use assessment_repository::{AssessmentRepository, InMemoryAssessmentRepository};
pub use candidate_repository::{CandidateRepository, InMemoryCandidateRepository};
pub use question_repository::{InMemoryQuestionRepository, QuestionRepository, SearchFilters};

/// Bounded random delay applied to every collection call, standing in for
/// network latency. Always finite, so a call can never hang.
#[derive(Clone, Copy, Debug)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Latency {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No delay at all, for tests.
    pub fn none() -> Self {
        Latency::new(0, 0)
    }

    pub async fn simulate(&self) {
        if self.max_ms == 0 {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_clamps_inverted_bounds() {
        let latency = Latency::new(500, 200);

        assert_eq!(latency.min_ms, 500);
        assert_eq!(latency.max_ms, 500);
    }

    #[tokio::test]
    async fn zero_latency_resolves_immediately() {
        Latency::none().simulate().await;
    }
}
