use std::collections::HashMap;

use crate::models::domain::{Assessment, Question};

/// One in-progress timed attempt at an assessment.
///
/// The session is a plain state machine: the caller renders it, feeds it
/// answers and navigation, and drives the countdown by calling [`Session::tick`]
/// once per logical second. Wall-clock scheduling stays outside so the whole
/// lifecycle can be tested without a timer.
#[derive(Clone, Debug)]
pub struct Session {
    assessment: Assessment,
    current_index: usize,
    answers: HashMap<String, String>,
    remaining_seconds: i64,
    result: Option<SessionResult>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitReason {
    Manual,
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    /// Percentage of questions answered exactly right, rounded, 0-100.
    pub score: u8,
    pub reason: SubmitReason,
}

impl Session {
    pub fn start(assessment: Assessment) -> Self {
        let remaining_seconds = assessment.duration * 60;
        Session {
            assessment,
            current_index: 0,
            answers: HashMap::new(),
            remaining_seconds,
            result: None,
        }
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.assessment.questions.get(self.current_index)
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    /// Fraction of questions visited so far, for progress display.
    pub fn progress_percent(&self) -> f64 {
        let total = self.assessment.questions.len();
        if total == 0 {
            return 0.0;
        }
        (self.current_index + 1) as f64 / total as f64 * 100.0
    }

    /// Stores an answer for a question, overwriting any earlier one. The value
    /// is accepted as-is; the caller renders the input widget matching the
    /// question type, so no shape validation happens here.
    pub fn record_answer(&mut self, question_id: &str, value: impl Into<String>) {
        if self.result.is_some() {
            return;
        }
        self.answers.insert(question_id.to_string(), value.into());
    }

    /// Moves between questions, saturating at both ends. Never wraps.
    pub fn navigate(&mut self, direction: Direction) {
        if self.result.is_some() {
            return;
        }
        match direction {
            Direction::Next => {
                if self.current_index + 1 < self.assessment.questions.len() {
                    self.current_index += 1;
                }
            }
            Direction::Prev => {
                self.current_index = self.current_index.saturating_sub(1);
            }
        }
    }

    /// Advances the countdown by one logical second.
    ///
    /// When the previous value was 1 (or the clock somehow fell to zero or
    /// below), the session force-submits with [`SubmitReason::Timeout`]
    /// instead of merely reaching zero, so it can never sit running at
    /// non-positive time. Queued ticks delivered after completion return the
    /// stored result without submitting again.
    pub fn tick(&mut self) -> Option<SessionResult> {
        if let Some(result) = self.result {
            return Some(result);
        }
        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            return Some(self.submit(SubmitReason::Timeout));
        }
        self.remaining_seconds -= 1;
        None
    }

    /// Transitions to the terminal state exactly once and computes the score.
    /// Repeat calls return the stored result without recomputing.
    pub fn submit(&mut self, reason: SubmitReason) -> SessionResult {
        if let Some(result) = self.result {
            return result;
        }
        let result = SessionResult {
            score: self.compute_score(),
            reason,
        };
        self.result = Some(result);
        result
    }

    // An answer counts only when it strictly equals the question's stored
    // correct answer. Questions without one (free text, code) never match and
    // grade as incorrect.
    fn compute_score(&self) -> u8 {
        let total = self.assessment.questions.len();
        if total == 0 {
            return 0;
        }
        let correct = self
            .assessment
            .questions
            .iter()
            .filter(|question| {
                match (&question.correct_answer, self.answers.get(&question.id)) {
                    (Some(expected), Some(given)) => expected == given,
                    _ => false,
                }
            })
            .count();
        (correct as f64 / total as f64 * 100.0).round() as u8
    }
}
