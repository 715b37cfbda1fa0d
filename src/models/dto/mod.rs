pub mod question_draft;
pub use question_draft::QuestionDraft;
