use std::collections::HashMap;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_result::AnswerOutcome;
use crate::models::domain::QuizQuestion;
use crate::models::dto::request::SubmittedAnswer;

/// The outcome of grading one submission against the authoritative question
/// set. Outcomes are in quiz display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAttempt {
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub outcomes: Vec<AnswerOutcome>,
}

pub struct GradingService;

impl GradingService {
    /// Grade a submission. The submission must carry exactly one answer per
    /// question, keyed by question id; anything else (missing, unknown or
    /// duplicated ids, wrong length) is rejected outright rather than
    /// partially graded.
    pub fn grade(
        questions: &[QuizQuestion],
        answers: &[SubmittedAnswer],
    ) -> AppResult<GradedAttempt> {
        if answers.len() != questions.len() {
            return Err(AppError::ValidationError(format!(
                "Expected {} answers, got {}",
                questions.len(),
                answers.len()
            )));
        }

        let mut by_question: HashMap<&str, Option<u32>> = HashMap::with_capacity(answers.len());
        for answer in answers {
            if by_question
                .insert(answer.question_id.as_str(), answer.selected_option)
                .is_some()
            {
                return Err(AppError::ValidationError(format!(
                    "Duplicate answer for question '{}'",
                    answer.question_id
                )));
            }
        }

        let mut score: u32 = 0;
        let mut correct_answers: u32 = 0;
        let mut outcomes = Vec::with_capacity(questions.len());

        for question in questions {
            let selected = by_question.get(question.id.as_str()).copied().ok_or_else(|| {
                AppError::ValidationError(format!(
                    "No answer submitted for question '{}'",
                    question.id
                ))
            })?;

            let is_correct = selected == Some(question.correct_answer);
            if is_correct {
                score += question.points;
                correct_answers += 1;
            }

            outcomes.push(AnswerOutcome {
                question_id: question.id.clone(),
                selected_option: selected,
                is_correct,
            });
        }

        Ok(GradedAttempt {
            score,
            total_questions: questions.len() as u32,
            correct_answers,
            outcomes,
        })
    }
}
