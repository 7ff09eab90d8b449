use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The immutable outcome of one graded attempt. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub time_taken_secs: u32,
    pub answers: Vec<AnswerOutcome>,
    pub completed_at: DateTime<Utc>,
}

/// Per-question outcome, in quiz display order. `selected_option` is `None`
/// when the question was never answered (timer-forced submission).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub selected_option: Option<u32>,
    pub is_correct: bool,
}

impl QuizResult {
    pub fn new(
        user_id: &str,
        quiz_id: &str,
        score: u32,
        total_questions: u32,
        correct_answers: u32,
        time_taken_secs: u32,
        answers: Vec<AnswerOutcome>,
    ) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total_questions,
            correct_answers,
            time_taken_secs,
            answers,
            completed_at: Utc::now(),
        }
    }
}
