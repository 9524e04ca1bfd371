use sqlx::types::Json as SqlxJson;
use sqlx::{PgPool, Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::db::models::Question;
use crate::db::types::{DifficultyLevel, ExamType};

pub(crate) const COLUMNS: &str = "\
    id, question, options, correct_answer, explanation, solution, subject, chapter, topic, \
    difficulty, marks, exam, year, source, created_by, created_at";

pub(crate) struct CreateQuestion<'a> {
    pub(crate) id: &'a str,
    pub(crate) question: &'a str,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: i32,
    pub(crate) explanation: Option<String>,
    pub(crate) solution: Option<String>,
    pub(crate) subject: &'a str,
    pub(crate) chapter: &'a str,
    pub(crate) topic: Option<String>,
    pub(crate) difficulty: DifficultyLevel,
    pub(crate) marks: i32,
    pub(crate) exam: Option<ExamType>,
    pub(crate) year: Option<i32>,
    pub(crate) source: Option<String>,
    pub(crate) created_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateQuestion<'_>,
) -> Result<Question, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "INSERT INTO questions (
            id, question, options, correct_answer, explanation, solution, subject, chapter,
            topic, difficulty, marks, exam, year, source, created_by, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.question)
    .bind(SqlxJson(params.options))
    .bind(params.correct_answer)
    .bind(params.explanation)
    .bind(params.solution)
    .bind(params.subject)
    .bind(params.chapter)
    .bind(params.topic)
    .bind(params.difficulty)
    .bind(params.marks)
    .bind(params.exam)
    .bind(params.year)
    .bind(params.source)
    .bind(params.created_by)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!("SELECT {COLUMNS} FROM questions WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[derive(Debug, Default, Clone)]
pub(crate) struct QuestionFilter {
    pub(crate) subject: Option<String>,
    pub(crate) chapter: Option<String>,
    pub(crate) chapters: Option<Vec<String>>,
    pub(crate) difficulty: Option<DifficultyLevel>,
    pub(crate) exam: Option<ExamType>,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &QuestionFilter) {
    if let Some(subject) = &filter.subject {
        builder.push(" AND subject = ");
        builder.push_bind(subject.clone());
    }
    if let Some(chapter) = &filter.chapter {
        builder.push(" AND chapter = ");
        builder.push_bind(chapter.clone());
    }
    if let Some(chapters) = &filter.chapters {
        builder.push(" AND chapter = ANY(");
        builder.push_bind(chapters.clone());
        builder.push(")");
    }
    if let Some(difficulty) = filter.difficulty {
        builder.push(" AND difficulty = ");
        builder.push_bind(difficulty);
    }
    if let Some(exam) = filter.exam {
        builder.push(" AND exam = ");
        builder.push_bind(exam);
    }
}

pub(crate) async fn list(
    pool: &PgPool,
    filter: &QuestionFilter,
    skip: i64,
    limit: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {COLUMNS} FROM questions WHERE TRUE"
    ));
    push_filters(&mut builder, filter);
    builder.push(" ORDER BY created_at, id");
    builder.push(" OFFSET ");
    builder.push_bind(skip.max(0));
    builder.push(" LIMIT ");
    builder.push_bind(limit.clamp(1, 1000));

    builder.build_query_as::<Question>().fetch_all(pool).await
}

pub(crate) async fn count_by_filter(
    pool: &PgPool,
    filter: &QuestionFilter,
) -> Result<i64, sqlx::Error> {
    let mut builder =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM questions WHERE TRUE");
    push_filters(&mut builder, filter);

    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

/// Candidate pool for the test assembler; the assembler samples in memory.
pub(crate) async fn list_by_filter(
    pool: &PgPool,
    filter: &QuestionFilter,
) -> Result<Vec<Question>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {COLUMNS} FROM questions WHERE TRUE"
    ));
    push_filters(&mut builder, filter);
    builder.push(" ORDER BY id");

    builder.build_query_as::<Question>().fetch_all(pool).await
}

/// Resolves test question references, preserving the stored presentation order.
pub(crate) async fn list_by_ids(
    pool: &PgPool,
    ids: &[String],
) -> Result<Vec<Question>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS}
         FROM questions
         WHERE id = ANY($1)
         ORDER BY array_position($1::text[], id)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub(crate) async fn distinct_subjects(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT subject FROM questions ORDER BY subject")
        .fetch_all(pool)
        .await
}

pub(crate) async fn distinct_chapters(
    pool: &PgPool,
    subject: Option<&str>,
) -> Result<Vec<String>, sqlx::Error> {
    match subject {
        Some(subject) => {
            sqlx::query_scalar::<_, String>(
                "SELECT DISTINCT chapter FROM questions WHERE subject = $1 ORDER BY chapter",
            )
            .bind(subject)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_scalar::<_, String>(
                "SELECT DISTINCT chapter FROM questions ORDER BY chapter",
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub(crate) async fn distinct_exams(pool: &PgPool) -> Result<Vec<ExamType>, sqlx::Error> {
    sqlx::query_scalar::<_, ExamType>(
        "SELECT DISTINCT exam FROM questions WHERE exam IS NOT NULL ORDER BY exam",
    )
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions").fetch_one(pool).await
}
