use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    quiz::QuizCategory, AnswerOutcome, Quiz, QuizQuestion, QuizResult, User, UserRole,
};

/// Quiz as served to quiz takers: every question is stripped of its
/// correct-answer index before it leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuizCategory,
    pub time_limit_minutes: u32,
    pub questions: Vec<QuestionDto>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDto {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub points: u32,
}

impl From<QuizQuestion> for QuestionDto {
    fn from(question: QuizQuestion) -> Self {
        QuestionDto {
            id: question.id,
            text: question.text,
            options: question.options,
            points: question.points,
        }
    }
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            category: quiz.category,
            time_limit_minutes: quiz.time_limit_minutes,
            questions: quiz.questions.into_iter().map(QuestionDto::from).collect(),
            is_active: quiz.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

/// Result as served to clients, with quiz title/category and username joined
/// in at read time. The joined fields are `None` when the referent has been
/// deleted since the attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ResultDto {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub time_taken_secs: u32,
    pub answers: Vec<AnswerOutcome>,
    pub completed_at: DateTime<Utc>,
    pub quiz_title: Option<String>,
    pub quiz_category: Option<QuizCategory>,
    pub username: Option<String>,
}

impl ResultDto {
    pub fn from_result(result: QuizResult, quiz: Option<&Quiz>, user: Option<&User>) -> Self {
        ResultDto {
            id: result.id,
            quiz_id: result.quiz_id,
            user_id: result.user_id,
            score: result.score,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            time_taken_secs: result.time_taken_secs,
            answers: result.answers,
            completed_at: result.completed_at,
            quiz_title: quiz.map(|q| q.title.clone()),
            quiz_category: quiz.map(|q| q.category),
            username: user.map(|u| u.username.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
