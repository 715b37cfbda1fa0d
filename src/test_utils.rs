use crate::models::domain::{
    Assessment, AssessmentType, Candidate, Difficulty, Question, QuestionType,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::Utc;

    /// Creates a multiple-choice question with the given correct answer.
    pub fn choice_question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            content: format!("Question {}", id),
            question_type: QuestionType::MultipleChoice,
            category: "General".to_string(),
            difficulty: Difficulty::Easy,
            points: 1,
            options: Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
            correct_answer: Some(correct.to_string()),
        }
    }

    /// Creates a scheduled test assessment over the given questions.
    pub fn test_assessment(questions: Vec<Question>) -> Assessment {
        Assessment::new_draft(
            "Backend screening",
            AssessmentType::Test,
            Utc::now(),
            30,
            questions,
        )
    }

    /// Creates an invited candidate with a deterministic address.
    pub fn invited_candidate(name: &str) -> Candidate {
        Candidate::new_invited(name, &format!("{}@example.com", name.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_choice_question() {
        let question = choice_question("q1", "B");
        assert_eq!(question.correct_answer.as_deref(), Some("B"));
        assert_eq!(question.options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_fixtures_test_assessment() {
        let assessment = test_assessment(vec![choice_question("q1", "A")]);
        assert_eq!(assessment.duration, 30);
        assert_eq!(assessment.questions.len(), 1);
    }

    #[test]
    fn test_fixtures_invited_candidate() {
        let candidate = invited_candidate("Jane");
        assert_eq!(candidate.email, "jane@example.com");
        assert!(candidate.assessments.is_empty());
    }
}
