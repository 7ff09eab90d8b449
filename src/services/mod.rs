pub mod grading_service;
pub mod quiz_service;
pub mod result_service;
pub mod user_service;

pub use grading_service::{GradedAttempt, GradingService};
pub use quiz_service::QuizService;
pub use result_service::ResultService;
pub use user_service::UserService;
