//! Client-side driver for one pass through a quiz: question navigation,
//! answer selection, the countdown, and the hand-off to submission.
//!
//! The controller is a plain state machine. It owns no clock and performs no
//! I/O; the embedding UI calls [`AttemptController::tick`] once per elapsed
//! second and ships the payload returned by `tick`/`submit` to the server.
//! Driving it through `&mut self` serializes every transition, so a late tick
//! can never race a submission.

use thiserror::Error;

use crate::models::dto::request::{SubmitResultRequest, SubmittedAnswer};
use crate::models::dto::response::{QuestionDto, QuizDto};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("Attempt is not in progress")]
    NotInProgress,

    #[error("Quiz is already loaded")]
    AlreadyLoaded,

    #[error("Quiz has no questions")]
    NoQuestions,

    #[error("Option index {0} is out of range")]
    OptionOutOfRange(usize),

    #[error("Answer the current question before moving on")]
    CurrentUnanswered,

    #[error("Submission is only available from the last question")]
    NotAtLastQuestion,

    #[error("Please answer all questions before submitting")]
    UnansweredQuestions,

    #[error("A submission is already in flight")]
    AlreadySubmitting,
}

/// Observable phase of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Loading,
    InProgress,
    Submitting,
    Completed,
    Failed,
}

#[derive(Debug, Clone)]
struct AttemptState {
    quiz: QuizDto,
    time_limit_secs: u32,
    position: usize,
    answers: Vec<Option<u32>>,
    remaining_secs: u32,
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    InProgress(AttemptState),
    Submitting(AttemptState),
    Completed { result_id: String },
    Failed { error: String },
}

#[derive(Debug)]
pub struct AttemptController {
    phase: Phase,
    last_error: Option<String>,
}

impl AttemptController {
    /// A fresh attempt, waiting for the quiz to arrive.
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            last_error: None,
        }
    }

    /// The quiz arrived: start the attempt at the first question with the
    /// full time budget and every question unanswered.
    pub fn quiz_loaded(&mut self, quiz: QuizDto) -> Result<(), AttemptError> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(AttemptError::AlreadyLoaded);
        }

        if quiz.questions.is_empty() {
            self.phase = Phase::Failed {
                error: "Quiz has no questions".to_string(),
            };
            return Err(AttemptError::NoQuestions);
        }

        let question_count = quiz.questions.len();
        let time_limit_secs = quiz.time_limit_minutes * 60;
        self.phase = Phase::InProgress(AttemptState {
            quiz,
            time_limit_secs,
            position: 0,
            answers: vec![None; question_count],
            remaining_secs: time_limit_secs,
        });
        self.last_error = None;
        Ok(())
    }

    /// The quiz could not be retrieved. Terminal; a new attempt requires a
    /// fresh controller.
    pub fn load_failed(&mut self, message: &str) {
        if matches!(self.phase, Phase::Loading) {
            self.phase = Phase::Failed {
                error: message.to_string(),
            };
            self.last_error = Some(message.to_string());
        }
    }

    /// Record (or overwrite) the selection for the current question. Does not
    /// move the position.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), AttemptError> {
        let state = self.in_progress_mut()?;

        let option_count = state.quiz.questions[state.position].options.len();
        if option_index >= option_count {
            return Err(AttemptError::OptionOutOfRange(option_index));
        }

        state.answers[state.position] = Some(option_index as u32);
        Ok(())
    }

    /// Move forward one question. Gated on the current question being
    /// answered; a no-op at the last question.
    pub fn advance(&mut self) -> Result<(), AttemptError> {
        let state = self.in_progress_mut()?;

        if state.position + 1 >= state.quiz.questions.len() {
            return Ok(());
        }
        if state.answers[state.position].is_none() {
            return Err(AttemptError::CurrentUnanswered);
        }

        state.position += 1;
        Ok(())
    }

    /// Move back one question. Never gated; a no-op at the first question.
    pub fn retreat(&mut self) -> Result<(), AttemptError> {
        let state = self.in_progress_mut()?;

        if state.position > 0 {
            state.position -= 1;
        }
        Ok(())
    }

    /// One second of wall clock elapsed. Outside `InProgress` this is a
    /// strict no-op, which is what makes a late tick after submission
    /// harmless. When the clock hits zero the attempt is force-submitted
    /// with whatever answers exist.
    pub fn tick(&mut self) -> Option<SubmitResultRequest> {
        let Phase::InProgress(state) = &mut self.phase else {
            return None;
        };

        state.remaining_secs = state.remaining_secs.saturating_sub(1);
        if state.remaining_secs > 0 {
            return None;
        }

        Some(self.force_submission())
    }

    /// User-initiated submission: only from the last question, and only once
    /// every question has an answer. The timeout path never comes through
    /// here.
    pub fn submit(&mut self) -> Result<SubmitResultRequest, AttemptError> {
        let state = match &self.phase {
            Phase::InProgress(state) => state,
            Phase::Submitting(_) => return Err(AttemptError::AlreadySubmitting),
            _ => return Err(AttemptError::NotInProgress),
        };

        if state.position + 1 != state.quiz.questions.len() {
            return Err(AttemptError::NotAtLastQuestion);
        }
        if state.answers.iter().any(|a| a.is_none()) {
            return Err(AttemptError::UnansweredQuestions);
        }

        Ok(self.force_submission())
    }

    /// The server accepted the submission; the attempt is done.
    pub fn submission_accepted(&mut self, result_id: &str) -> Result<(), AttemptError> {
        if !matches!(self.phase, Phase::Submitting(_)) {
            return Err(AttemptError::NotInProgress);
        }

        self.phase = Phase::Completed {
            result_id: result_id.to_string(),
        };
        self.last_error = None;
        Ok(())
    }

    /// The submission failed. The attempt state is restored so the user can
    /// submit again; if the clock already ran out the next tick re-forces
    /// the submission.
    pub fn submission_failed(&mut self, message: &str) -> Result<(), AttemptError> {
        let Phase::Submitting(_) = &self.phase else {
            return Err(AttemptError::NotInProgress);
        };

        let Phase::Submitting(state) = std::mem::replace(&mut self.phase, Phase::Loading) else {
            unreachable!("phase checked above");
        };
        self.phase = Phase::InProgress(state);
        self.last_error = Some(message.to_string());
        Ok(())
    }

    pub fn phase(&self) -> AttemptPhase {
        match self.phase {
            Phase::Loading => AttemptPhase::Loading,
            Phase::InProgress(_) => AttemptPhase::InProgress,
            Phase::Submitting(_) => AttemptPhase::Submitting,
            Phase::Completed { .. } => AttemptPhase::Completed,
            Phase::Failed { .. } => AttemptPhase::Failed,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.state().map(|s| s.position)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.state().map(|s| s.remaining_secs)
    }

    pub fn current_question(&self) -> Option<&QuestionDto> {
        self.state().map(|s| &s.quiz.questions[s.position])
    }

    pub fn answer_at(&self, position: usize) -> Option<u32> {
        self.state().and_then(|s| s.answers.get(position).copied().flatten())
    }

    pub fn result_id(&self) -> Option<&str> {
        match &self.phase {
            Phase::Completed { result_id } => Some(result_id),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn state(&self) -> Option<&AttemptState> {
        match &self.phase {
            Phase::InProgress(state) | Phase::Submitting(state) => Some(state),
            _ => None,
        }
    }

    fn in_progress_mut(&mut self) -> Result<&mut AttemptState, AttemptError> {
        match &mut self.phase {
            Phase::InProgress(state) => Ok(state),
            _ => Err(AttemptError::NotInProgress),
        }
    }

    /// Move to `Submitting` and build the payload. The payload is produced
    /// exactly once per attempt: both the manual and the timeout path funnel
    /// through here, and from `Submitting` neither path can fire again.
    fn force_submission(&mut self) -> SubmitResultRequest {
        let Phase::InProgress(state) = std::mem::replace(&mut self.phase, Phase::Loading) else {
            unreachable!("force_submission is only reached from InProgress");
        };

        let request = SubmitResultRequest {
            quiz_id: state.quiz.id.clone(),
            answers: state
                .quiz
                .questions
                .iter()
                .zip(&state.answers)
                .map(|(question, selected)| SubmittedAnswer {
                    question_id: question.id.clone(),
                    selected_option: *selected,
                })
                .collect(),
            time_taken_secs: state.time_limit_secs - state.remaining_secs,
        };

        self.phase = Phase::Submitting(state);
        request
    }
}

impl Default for AttemptController {
    fn default() -> Self {
        Self::new()
    }
}
