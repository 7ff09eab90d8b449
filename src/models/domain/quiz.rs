use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::QuizQuestion;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuizCategory,
    pub time_limit_minutes: u32,
    pub questions: Vec<QuizQuestion>,
    pub is_active: bool,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// The fixed category set offered by the authoring UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuizCategory {
    #[serde(rename = "General Knowledge")]
    GeneralKnowledge,
    Science,
    Mathematics,
    History,
    Geography,
    Literature,
    Technology,
    Sports,
    Entertainment,
    Other,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        category: QuizCategory,
        time_limit_minutes: u32,
        questions: Vec<QuizQuestion>,
        created_by: &str,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            time_limit_minutes,
            questions,
            is_active: true,
            created_by: created_by.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_minutes * 60
    }
}
