use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::{AnswerRecord, GroupBreakdown, Test};
use crate::db::types::{DifficultyLevel, ExamType, TestType};
use crate::schemas::question::QuestionPublic;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct TestCreate {
    #[validate(length(min = 1, max = 200))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(alias = "testType")]
    pub(crate) test_type: TestType,
    #[serde(alias = "questionIds")]
    #[validate(length(min = 1))]
    pub(crate) question_ids: Vec<String>,
    #[serde(alias = "durationMinutes")]
    #[validate(range(min = 1, max = 600))]
    pub(crate) duration_minutes: i32,
    #[serde(default)]
    pub(crate) subject: Option<String>,
    #[serde(default)]
    pub(crate) chapter: Option<String>,
    #[serde(default)]
    pub(crate) instructions: Vec<String>,
    #[serde(default)]
    #[serde(alias = "isPublic")]
    pub(crate) is_public: bool,
}

/// Difficulty selector for generated tests. `All` keeps the 40/40/20 mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DifficultyChoice {
    All,
    Easy,
    Medium,
    Hard,
}

impl DifficultyChoice {
    pub(crate) fn level(self) -> Option<DifficultyLevel> {
        match self {
            Self::All => None,
            Self::Easy => Some(DifficultyLevel::Easy),
            Self::Medium => Some(DifficultyLevel::Medium),
            Self::Hard => Some(DifficultyLevel::Hard),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct GenerateTestRequest {
    #[serde(default)]
    pub(crate) exam: Option<ExamType>,
    #[serde(default)]
    pub(crate) subject: Option<String>,
    #[serde(default)]
    pub(crate) chapters: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) difficulty: Option<DifficultyChoice>,
    #[serde(default = "default_question_count")]
    #[serde(alias = "questionCount")]
    #[validate(range(min = 1, max = 100))]
    pub(crate) question_count: u32,
    #[serde(default)]
    pub(crate) title: Option<String>,
}

fn default_question_count() -> u32 {
    25
}

#[derive(Debug, Serialize)]
pub(crate) struct TestResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) test_type: TestType,
    pub(crate) question_ids: Vec<String>,
    pub(crate) question_count: usize,
    pub(crate) duration_minutes: i32,
    pub(crate) subject: Option<String>,
    pub(crate) chapter: Option<String>,
    pub(crate) max_marks: i32,
    pub(crate) instructions: Vec<String>,
    pub(crate) is_public: bool,
    pub(crate) created_at: String,
}

impl TestResponse {
    pub(crate) fn from_db(test: Test) -> Self {
        let question_count = test.question_ids.0.len();
        Self {
            id: test.id,
            title: test.title,
            description: test.description,
            test_type: test.test_type,
            question_ids: test.question_ids.0,
            question_count,
            duration_minutes: test.duration_minutes,
            subject: test.subject,
            chapter: test.chapter,
            max_marks: test.max_marks,
            instructions: test.instructions.0,
            is_public: test.is_public,
            created_at: format_primitive(test.created_at),
        }
    }
}

/// Test payload for a started attempt: questions resolved in presentation
/// order with the answer key stripped.
#[derive(Debug, Serialize)]
pub(crate) struct TestForStudent {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) test_type: TestType,
    pub(crate) duration_minutes: i32,
    pub(crate) subject: Option<String>,
    pub(crate) chapter: Option<String>,
    pub(crate) max_marks: i32,
    pub(crate) instructions: Vec<String>,
    pub(crate) questions: Vec<QuestionPublic>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAnswer {
    #[serde(alias = "questionId")]
    pub(crate) question_id: String,
    #[serde(default)]
    #[serde(alias = "selectedAnswer")]
    pub(crate) selected_answer: Option<i32>,
    #[serde(default)]
    #[serde(alias = "timeSpentSeconds")]
    pub(crate) time_spent_seconds: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitTestRequest {
    pub(crate) answers: Vec<SubmitAnswer>,
    #[serde(default)]
    #[serde(alias = "timeTakenSeconds")]
    pub(crate) time_taken_seconds: i32,
}

/// Per-question review line returned after submission; this is where the
/// answer key is finally revealed.
#[derive(Debug, Serialize)]
pub(crate) struct AnswerReview {
    pub(crate) question_id: String,
    pub(crate) selected_answer: Option<i32>,
    pub(crate) is_correct: bool,
    pub(crate) correct_answer: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResult {
    pub(crate) performance_id: String,
    pub(crate) score: i32,
    pub(crate) max_marks: i32,
    pub(crate) percentage: f64,
    pub(crate) subject_wise: Vec<GroupBreakdown>,
    pub(crate) chapter_wise: Vec<GroupBreakdown>,
    pub(crate) answers: Vec<AnswerReview>,
}

impl AnswerReview {
    pub(crate) fn from_record(record: &AnswerRecord, correct_answer: i32) -> Self {
        Self {
            question_id: record.question_id.clone(),
            selected_answer: record.selected_answer,
            is_correct: record.is_correct,
            correct_answer,
        }
    }
}
