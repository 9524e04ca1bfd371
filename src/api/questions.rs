use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentUser};
use crate::api::pagination::{default_limit, PaginatedResponse};
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::{DifficultyLevel, ExamType};
use crate::repositories;
use crate::repositories::questions::QuestionFilter;
use crate::schemas::question::{FiltersResponse, QuestionCreate, QuestionResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/filters", get(filters))
        .route("/:id", get(get_question))
}

#[derive(Debug, Deserialize)]
struct ListQuestionsQuery {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    chapter: Option<String>,
    #[serde(default)]
    difficulty: Option<DifficultyLevel>,
    #[serde(default)]
    exam: Option<ExamType>,
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

async fn list_questions(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<PaginatedResponse<QuestionResponse>>, ApiError> {
    let filter = QuestionFilter {
        subject: query.subject,
        chapter: query.chapter,
        difficulty: query.difficulty,
        exam: query.exam,
        ..Default::default()
    };

    let total_count = repositories::questions::count_by_filter(state.db(), &filter)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count questions"))?;
    let questions = repositories::questions::list(state.db(), &filter, query.skip, query.limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch questions"))?;

    Ok(Json(PaginatedResponse {
        items: questions.into_iter().map(QuestionResponse::from_db).collect(),
        total_count,
        skip: query.skip,
        limit: query.limit,
    }))
}

/// Distinct filter values for the question-bank browser.
async fn filters(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<FiltersResponse>, ApiError> {
    let subjects = repositories::questions::distinct_subjects(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch subjects"))?;
    let chapters = repositories::questions::distinct_chapters(state.db(), None)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch chapters"))?;
    let exams = repositories::questions::distinct_exams(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exams"))?;

    Ok(Json(FiltersResponse {
        subjects,
        chapters,
        exams,
        difficulties: vec![DifficultyLevel::Easy, DifficultyLevel::Medium, DifficultyLevel::Hard],
    }))
}

async fn get_question(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = repositories::questions::find_by_id(state.db(), &id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch question"))?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?;

    Ok(Json(QuestionResponse::from_db(question)))
}

async fn create_question(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(payload): Json<QuestionCreate>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    validation::validate_payload(&payload)?;
    validation::validate_correct_answer(payload.correct_answer, payload.options.len())?;

    let marks = payload.marks.unwrap_or_else(|| payload.difficulty.default_marks());
    let question = repositories::questions::create(
        state.db(),
        repositories::questions::CreateQuestion {
            id: &Uuid::new_v4().to_string(),
            question: &payload.question,
            options: payload.options,
            correct_answer: payload.correct_answer,
            explanation: payload.explanation,
            solution: payload.solution,
            subject: &payload.subject,
            chapter: &payload.chapter,
            topic: payload.topic,
            difficulty: payload.difficulty,
            marks,
            exam: payload.exam,
            year: payload.year,
            source: payload.source,
            created_by: &admin.id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create question"))?;

    Ok((StatusCode::CREATED, Json(QuestionResponse::from_db(question))))
}
