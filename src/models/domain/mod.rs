pub mod assessment;
pub mod candidate;
pub mod question;
pub mod session;
pub use assessment::{Assessment, AssessmentStatus, AssessmentType};
pub use candidate::{AssessmentRef, Candidate, CandidateStatus};
pub use question::{Difficulty, Question, QuestionType};
pub use session::{Direction, Session, SessionResult, SubmitReason};
