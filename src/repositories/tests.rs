use sqlx::types::Json as SqlxJson;
use sqlx::{PgPool, Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::db::models::Test;
use crate::db::types::TestType;

pub(crate) const COLUMNS: &str = "\
    id, title, description, test_type, question_ids, duration_minutes, subject, chapter, \
    max_marks, instructions, is_public, created_by, created_at";

pub(crate) struct CreateTest<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<String>,
    pub(crate) test_type: TestType,
    pub(crate) question_ids: Vec<String>,
    pub(crate) duration_minutes: i32,
    pub(crate) subject: Option<String>,
    pub(crate) chapter: Option<String>,
    pub(crate) max_marks: i32,
    pub(crate) instructions: Vec<String>,
    pub(crate) is_public: bool,
    pub(crate) created_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateTest<'_>,
) -> Result<Test, sqlx::Error> {
    sqlx::query_as::<_, Test>(&format!(
        "INSERT INTO tests (
            id, title, description, test_type, question_ids, duration_minutes,
            subject, chapter, max_marks, instructions, is_public, created_by, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.test_type)
    .bind(SqlxJson(params.question_ids))
    .bind(params.duration_minutes)
    .bind(params.subject)
    .bind(params.chapter)
    .bind(params.max_marks)
    .bind(SqlxJson(params.instructions))
    .bind(params.is_public)
    .bind(params.created_by)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Test>, sqlx::Error> {
    sqlx::query_as::<_, Test>(&format!("SELECT {COLUMNS} FROM tests WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn list_public(
    pool: &PgPool,
    test_type: Option<TestType>,
    subject: Option<&str>,
) -> Result<Vec<Test>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {COLUMNS} FROM tests WHERE is_public = TRUE"
    ));

    if let Some(test_type) = test_type {
        builder.push(" AND test_type = ");
        builder.push_bind(test_type);
    }
    if let Some(subject) = subject {
        builder.push(" AND subject = ");
        builder.push_bind(subject.to_string());
    }

    builder.push(" ORDER BY created_at DESC, id");

    builder.build_query_as::<Test>().fetch_all(pool).await
}

pub(crate) async fn set_visibility(
    pool: &PgPool,
    id: &str,
    is_public: bool,
) -> Result<Option<Test>, sqlx::Error> {
    sqlx::query_as::<_, Test>(&format!(
        "UPDATE tests SET is_public = $1 WHERE id = $2 RETURNING {COLUMNS}"
    ))
    .bind(is_public)
    .bind(id)
    .fetch_optional(pool)
    .await
}
