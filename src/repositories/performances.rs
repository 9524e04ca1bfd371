use sqlx::types::Json as SqlxJson;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::{AnswerRecord, GroupBreakdown, Performance};

pub(crate) const COLUMNS: &str = "\
    id, user_id, test_id, score, max_marks, percentage, time_taken_seconds, answers, \
    subject_wise, chapter_wise, created_at";

pub(crate) struct CreatePerformance<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) test_id: &'a str,
    pub(crate) score: i32,
    pub(crate) max_marks: i32,
    pub(crate) percentage: f64,
    pub(crate) time_taken_seconds: i32,
    pub(crate) answers: Vec<AnswerRecord>,
    pub(crate) subject_wise: Vec<GroupBreakdown>,
    pub(crate) chapter_wise: Vec<GroupBreakdown>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreatePerformance<'_>,
) -> Result<Performance, sqlx::Error> {
    sqlx::query_as::<_, Performance>(&format!(
        "INSERT INTO performances (
            id, user_id, test_id, score, max_marks, percentage, time_taken_seconds,
            answers, subject_wise, chapter_wise, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.test_id)
    .bind(params.score)
    .bind(params.max_marks)
    .bind(params.percentage)
    .bind(params.time_taken_seconds)
    .bind(SqlxJson(params.answers))
    .bind(SqlxJson(params.subject_wise))
    .bind(SqlxJson(params.chapter_wise))
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn list_by_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<Performance>, sqlx::Error> {
    sqlx::query_as::<_, Performance>(&format!(
        "SELECT {COLUMNS}
         FROM performances
         WHERE user_id = $1
         ORDER BY created_at DESC, id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
