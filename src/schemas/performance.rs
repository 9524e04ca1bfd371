use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::{GroupBreakdown, Performance};

#[derive(Debug, Serialize)]
pub(crate) struct PerformanceEntry {
    pub(crate) id: String,
    pub(crate) test_id: String,
    pub(crate) score: i32,
    pub(crate) max_marks: i32,
    pub(crate) percentage: f64,
    pub(crate) time_taken_seconds: i32,
    pub(crate) subject_wise: Vec<GroupBreakdown>,
    pub(crate) chapter_wise: Vec<GroupBreakdown>,
    pub(crate) created_at: String,
}

impl PerformanceEntry {
    pub(crate) fn from_db(performance: Performance) -> Self {
        Self {
            id: performance.id,
            test_id: performance.test_id,
            score: performance.score,
            max_marks: performance.max_marks,
            percentage: performance.percentage,
            time_taken_seconds: performance.time_taken_seconds,
            subject_wise: performance.subject_wise.0,
            chapter_wise: performance.chapter_wise.0,
            created_at: format_primitive(performance.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PerformanceStats {
    pub(crate) total_tests: usize,
    pub(crate) average_score: f64,
    pub(crate) best_score: f64,
    pub(crate) total_questions: usize,
    pub(crate) correct_answers: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct PerformanceHistoryResponse {
    pub(crate) history: Vec<PerformanceEntry>,
    pub(crate) stats: PerformanceStats,
}
