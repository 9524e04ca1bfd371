use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::db::models::Performance;
use crate::repositories;
use crate::schemas::performance::{PerformanceEntry, PerformanceHistoryResponse, PerformanceStats};
use crate::services::scoring::round2;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(history))
}

/// Own performance history, newest first, with aggregate stats on top.
async fn history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<PerformanceHistoryResponse>, ApiError> {
    let performances = repositories::performances::list_by_user(state.db(), &user.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch performance history"))?;

    let stats = summarize(&performances);

    Ok(Json(PerformanceHistoryResponse {
        history: performances.into_iter().map(PerformanceEntry::from_db).collect(),
        stats,
    }))
}

fn summarize(performances: &[Performance]) -> PerformanceStats {
    let total_tests = performances.len();
    let average_score = if total_tests == 0 {
        0.0
    } else {
        round2(performances.iter().map(|p| p.percentage).sum::<f64>() / total_tests as f64)
    };
    let best_score = round2(performances.iter().map(|p| p.percentage).fold(0.0, f64::max));
    let total_questions: usize = performances.iter().map(|p| p.answers.0.len()).sum();
    let correct_answers: usize = performances
        .iter()
        .map(|p| p.answers.0.iter().filter(|a| a.is_correct).count())
        .sum();

    PerformanceStats { total_tests, average_score, best_score, total_questions, correct_answers }
}

#[cfg(test)]
mod tests {
    use sqlx::types::Json;
    use time::macros::datetime;

    use super::summarize;
    use crate::db::models::{AnswerRecord, Performance};

    fn attempt(id: &str, percentage: f64, answers: Vec<AnswerRecord>) -> Performance {
        Performance {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            test_id: "test-1".to_string(),
            score: 0,
            max_marks: 10,
            percentage,
            time_taken_seconds: 300,
            answers: Json(answers),
            subject_wise: Json(Vec::new()),
            chapter_wise: Json(Vec::new()),
            created_at: datetime!(2025-01-15 10:00:00),
        }
    }

    fn answer(is_correct: bool) -> AnswerRecord {
        AnswerRecord {
            question_id: "q-1".to_string(),
            selected_answer: Some(0),
            is_correct,
            time_spent_seconds: 30,
        }
    }

    #[test]
    fn rounds_average_and_best_to_two_decimals() {
        let performances = vec![
            attempt("p-1", 33.333333333333336, vec![answer(true), answer(false), answer(false)]),
            attempt("p-2", 66.66666666666667, vec![answer(true), answer(true), answer(false)]),
        ];

        let stats = summarize(&performances);

        assert_eq!(stats.total_tests, 2);
        assert_eq!(stats.average_score, 50.0);
        assert_eq!(stats.best_score, 66.67);
        assert_eq!(stats.total_questions, 6);
        assert_eq!(stats.correct_answers, 3);
    }

    #[test]
    fn empty_history_yields_zeroed_stats() {
        let stats = summarize(&[]);

        assert_eq!(stats.total_tests, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.best_score, 0.0);
        assert_eq!(stats.total_questions, 0);
        assert_eq!(stats.correct_answers, 0);
    }
}
