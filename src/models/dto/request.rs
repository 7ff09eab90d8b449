use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::quiz::QuizCategory;

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must be alphanumeric with underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = validate_answer_index))]
pub struct QuestionInput {
    /// Present on update when the client wants to keep an existing question id.
    pub id: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub text: String,

    #[validate(length(min = 2, max = 10, message = "A question needs between 2 and 10 options"))]
    pub options: Vec<String>,

    pub correct_answer: u32,

    #[validate(range(min = 1, message = "Point value must be positive"))]
    pub points: u32,
}

fn validate_answer_index(input: &QuestionInput) -> Result<(), ValidationError> {
    if (input.correct_answer as usize) >= input.options.len() {
        return Err(ValidationError::new("correct_answer_out_of_range")
            .with_message("Correct answer index must address an existing option".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: String,

    pub category: QuizCategory,

    #[validate(range(min = 1, message = "Time limit must be positive"))]
    pub time_limit_minutes: u32,

    #[validate(
        length(min = 1, message = "A quiz needs at least one question"),
        nested
    )]
    pub questions: Vec<QuestionInput>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Update uses full-replace semantics, so the shape matches create.
pub type UpdateQuizRequest = CreateQuizRequest;

/// One answer per question, keyed by the question's stable id.
/// `selected_option: None` marks a question left unanswered (only the
/// timer-forced submission path produces these).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_option: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct SubmitResultRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    pub answers: Vec<SubmittedAnswer>,

    pub time_taken_secs: u32,
}
