pub mod auth_handler;
pub mod quiz_handler;
pub mod result_handler;
pub mod user_handler;

pub use auth_handler::{login, register};
pub use quiz_handler::{
    create_quiz, delete_quiz, get_quiz, get_quiz_answers, list_quizzes, update_quiz,
};
pub use result_handler::{get_result, list_all_results, list_my_results, submit_result};
pub use user_handler::{health_check, health_check_live, health_check_ready, list_users};
