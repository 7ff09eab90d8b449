use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizQuestion},
    models::dto::request::{CreateQuizRequest, QuestionInput, UpdateQuizRequest},
    models::dto::response::QuizDto,
    repositories::QuizRepository,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    /// Active quizzes with correct answers stripped, for quiz takers.
    pub async fn list_active(&self) -> AppResult<Vec<QuizDto>> {
        let quizzes = self.repository.find_active().await?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    /// A single quiz with correct answers stripped, for quiz takers.
    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizDto> {
        let quiz = self.find_required(id).await?;
        Ok(QuizDto::from(quiz))
    }

    /// The full quiz including the answer key. Callers must be admin-gated.
    pub async fn get_quiz_with_answers(&self, id: &str) -> AppResult<Quiz> {
        self.find_required(id).await
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest, created_by: &str) -> AppResult<Quiz> {
        request.validate()?;

        let questions = request.questions.iter().map(build_question).collect();
        let mut quiz = Quiz::new(
            &request.title,
            &request.description,
            request.category,
            request.time_limit_minutes,
            questions,
            created_by,
        );
        quiz.is_active = request.is_active;

        self.repository.create(quiz).await
    }

    /// Full-replace update. Submitted questions keep their id when the client
    /// provides one, otherwise they are treated as new questions.
    pub async fn update_quiz(&self, id: &str, request: UpdateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let existing = self.find_required(id).await?;

        let quiz = Quiz {
            id: existing.id,
            title: request.title,
            description: request.description,
            category: request.category,
            time_limit_minutes: request.time_limit_minutes,
            questions: request.questions.iter().map(build_question).collect(),
            is_active: request.is_active,
            created_by: existing.created_by,
            created_at: existing.created_at,
            modified_at: Some(Utc::now()),
        };

        self.repository.replace(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await
    }

    async fn find_required(&self, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }
}

fn build_question(input: &QuestionInput) -> QuizQuestion {
    QuizQuestion {
        id: input
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        text: input.text.clone(),
        options: input.options.clone(),
        correct_answer: input.correct_answer,
        points: input.points,
    }
}
