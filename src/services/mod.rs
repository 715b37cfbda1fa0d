pub mod dashboard_service;
pub mod question_bank_service;
pub mod session_service;

pub use dashboard_service::{DashboardService, DashboardStats};
pub use question_bank_service::QuestionBankService;
pub use session_service::{run_countdown, CompletionOutcome, SessionService};
