use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{DifficultyLevel, ExamType, MaterialType, TestType, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) hashed_password: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
    pub(crate) target_exam: Option<ExamType>,
    pub(crate) class_level: Option<String>,
    pub(crate) school: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) tests_attempted: i32,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) question: String,
    pub(crate) options: Json<Vec<String>>,
    pub(crate) correct_answer: i32,
    pub(crate) explanation: Option<String>,
    pub(crate) solution: Option<String>,
    pub(crate) subject: String,
    pub(crate) chapter: String,
    pub(crate) topic: Option<String>,
    pub(crate) difficulty: DifficultyLevel,
    pub(crate) marks: i32,
    pub(crate) exam: Option<ExamType>,
    pub(crate) year: Option<i32>,
    pub(crate) source: Option<String>,
    pub(crate) created_by: String,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Test {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) test_type: TestType,
    pub(crate) question_ids: Json<Vec<String>>,
    pub(crate) duration_minutes: i32,
    pub(crate) subject: Option<String>,
    pub(crate) chapter: Option<String>,
    pub(crate) max_marks: i32,
    pub(crate) instructions: Json<Vec<String>>,
    pub(crate) is_public: bool,
    pub(crate) created_by: String,
    pub(crate) created_at: PrimitiveDateTime,
}

/// Per-question outcome stored inside a performance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AnswerRecord {
    pub(crate) question_id: String,
    pub(crate) selected_answer: Option<i32>,
    pub(crate) is_correct: bool,
    pub(crate) time_spent_seconds: i32,
}

/// Aggregated outcome for one subject or chapter group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GroupBreakdown {
    pub(crate) key: String,
    pub(crate) correct: i32,
    pub(crate) total: i32,
    pub(crate) percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Performance {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) test_id: String,
    pub(crate) score: i32,
    pub(crate) max_marks: i32,
    pub(crate) percentage: f64,
    pub(crate) time_taken_seconds: i32,
    pub(crate) answers: Json<Vec<AnswerRecord>>,
    pub(crate) subject_wise: Json<Vec<GroupBreakdown>>,
    pub(crate) chapter_wise: Json<Vec<GroupBreakdown>>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudyMaterial {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) material_type: MaterialType,
    pub(crate) subject: String,
    pub(crate) chapter: Option<String>,
    pub(crate) topic: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) created_by: String,
    pub(crate) created_at: PrimitiveDateTime,
}
