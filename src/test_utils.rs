pub mod fixtures {
    use crate::models::domain::{quiz::QuizCategory, Quiz, QuizQuestion};
    use crate::models::dto::request::{SubmitResultRequest, SubmittedAnswer};

    /// The canonical two-question set used across grading tests: Q0 has four
    /// options with correct index 1 worth 1 point, Q1 has two options with
    /// correct index 0 worth 2 points.
    pub fn two_questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new(
                "Q0",
                vec!["A".into(), "B".into(), "C".into(), "D".into()],
                1,
                1,
            ),
            QuizQuestion::new("Q1", vec!["X".into(), "Y".into()], 0, 2),
        ]
    }

    pub fn two_question_quiz() -> Quiz {
        Quiz::new(
            "Canonical",
            "Two questions",
            QuizCategory::GeneralKnowledge,
            10,
            two_questions(),
            "admin-1",
        )
    }

    /// Build a well-formed submission for `quiz`, one selection per question
    /// in display order.
    pub fn submission_for(
        quiz: &Quiz,
        selections: &[Option<u32>],
        time_taken_secs: u32,
    ) -> SubmitResultRequest {
        SubmitResultRequest {
            quiz_id: quiz.id.clone(),
            answers: quiz
                .questions
                .iter()
                .zip(selections)
                .map(|(q, s)| SubmittedAnswer {
                    question_id: q.id.clone(),
                    selected_option: *s,
                })
                .collect(),
            time_taken_secs,
        }
    }
}
