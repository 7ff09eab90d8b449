use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question embedded in a quiz. Questions carry a stable id assigned at
/// creation time; submitted answers and graded outcomes are keyed by that id,
/// while display order is the position in the quiz's question vector.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    pub points: u32,
}

impl QuizQuestion {
    pub fn new(text: &str, options: Vec<String>, correct_answer: u32, points: u32) -> Self {
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            options,
            correct_answer,
            points,
        }
    }

    /// The correct-answer index must address an existing option.
    pub fn has_valid_answer_index(&self) -> bool {
        (self.correct_answer as usize) < self.options.len()
    }
}
