use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Question;
use crate::db::types::{DifficultyLevel, ExamType};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct QuestionCreate {
    #[validate(length(min = 1))]
    pub(crate) question: String,
    #[validate(length(min = 2, max = 6))]
    pub(crate) options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub(crate) correct_answer: i32,
    #[serde(default)]
    pub(crate) explanation: Option<String>,
    #[serde(default)]
    pub(crate) solution: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) subject: String,
    #[validate(length(min = 1))]
    pub(crate) chapter: String,
    #[serde(default)]
    pub(crate) topic: Option<String>,
    pub(crate) difficulty: DifficultyLevel,
    /// Defaults to the difficulty's standard marks when omitted.
    #[serde(default)]
    #[validate(range(min = 1, max = 10))]
    pub(crate) marks: Option<i32>,
    #[serde(default)]
    pub(crate) exam: Option<ExamType>,
    #[serde(default)]
    pub(crate) year: Option<i32>,
    #[serde(default)]
    pub(crate) source: Option<String>,
}

/// Full question view, including the answer key. Admin-facing.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionResponse {
    pub(crate) id: String,
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
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
    pub(crate) created_at: String,
}

impl QuestionResponse {
    pub(crate) fn from_db(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.question,
            options: question.options.0,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
            solution: question.solution,
            subject: question.subject,
            chapter: question.chapter,
            topic: question.topic,
            difficulty: question.difficulty,
            marks: question.marks,
            exam: question.exam,
            year: question.year,
            source: question.source,
            created_at: format_primitive(question.created_at),
        }
    }
}

/// Question view handed to a student during a test: no answer key, no
/// explanation, no worked solution.
#[derive(Debug, Serialize)]
pub(crate) struct QuestionPublic {
    pub(crate) id: String,
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    pub(crate) subject: String,
    pub(crate) chapter: String,
    pub(crate) topic: Option<String>,
    pub(crate) difficulty: DifficultyLevel,
    pub(crate) marks: i32,
}

impl QuestionPublic {
    pub(crate) fn from_db(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.question,
            options: question.options.0,
            subject: question.subject,
            chapter: question.chapter,
            topic: question.topic,
            difficulty: question.difficulty,
            marks: question.marks,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FiltersResponse {
    pub(crate) subjects: Vec<String>,
    pub(crate) chapters: Vec<String>,
    pub(crate) exams: Vec<ExamType>,
    pub(crate) difficulties: Vec<DifficultyLevel>,
}
