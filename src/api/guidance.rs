use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::repositories;
use crate::repositories::questions::QuestionFilter;
use crate::schemas::guidance::{GuidanceBody, GuidanceResponse};
use crate::services::ai_guidance;
use crate::services::guidance;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(get_guidance))
}

#[derive(Debug, Deserialize)]
struct GuidanceQuery {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    chapter: Option<String>,
}

/// Scope comes from the query params: subject+chapter, subject only, or
/// neither (overall). The recommendation itself is deterministic; the AI
/// insight is best-effort on top.
async fn get_guidance(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<GuidanceQuery>,
) -> Result<Json<GuidanceResponse>, ApiError> {
    let history = repositories::performances::list_by_user(state.db(), &user.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch performance history"))?;

    let (body, focus, summary) = match (&query.subject, &query.chapter) {
        (Some(subject), Some(chapter)) => {
            let filter = QuestionFilter {
                subject: Some(subject.clone()),
                chapter: Some(chapter.clone()),
                ..Default::default()
            };
            let questions = repositories::questions::list_by_filter(state.db(), &filter)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to fetch chapter questions"))?;
            let materials = repositories::study_materials::list(
                state.db(),
                Some(subject.as_str()),
                Some(chapter.as_str()),
                None,
            )
            .await
            .map_err(|e| ApiError::internal(e, "Failed to fetch study materials"))?;

            let result =
                guidance::chapter_guidance(subject, chapter, &questions, &history, &materials);
            let summary = format!(
                "Scope: chapter '{chapter}' in {subject}. Average score {:.2}%, \
                 {} questions available in the bank.",
                result.statistics.average_score, result.statistics.total_questions
            );
            (GuidanceBody::Chapter(result), chapter.clone(), summary)
        }
        (Some(subject), None) => {
            let filter = QuestionFilter { subject: Some(subject.clone()), ..Default::default() };
            let total_questions = repositories::questions::count_by_filter(state.db(), &filter)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to count subject questions"))?;
            let chapters =
                repositories::questions::distinct_chapters(state.db(), Some(subject.as_str()))
                    .await
                    .map_err(|e| ApiError::internal(e, "Failed to fetch chapters"))?;
            let materials =
                repositories::study_materials::list(state.db(), Some(subject.as_str()), None, None)
                    .await
                    .map_err(|e| ApiError::internal(e, "Failed to fetch study materials"))?;

            let result = guidance::subject_guidance(
                subject,
                total_questions as usize,
                &chapters,
                &history,
                &materials,
            );
            let summary = format!(
                "Scope: subject {subject}. Weak chapters: {}. Strong chapters: {}.",
                join_or_none(&result.statistics.weak_chapters),
                join_or_none(&result.statistics.strong_chapters)
            );
            (GuidanceBody::Subject(result), subject.clone(), summary)
        }
        (None, Some(_)) => {
            return Err(ApiError::BadRequest(
                "Chapter guidance requires a subject parameter".to_string(),
            ));
        }
        (None, None) => {
            let subjects = repositories::questions::distinct_subjects(state.db())
                .await
                .map_err(|e| ApiError::internal(e, "Failed to fetch subjects"))?;

            let result = guidance::overall_guidance(&subjects, &history);
            let focus = if result.statistics.weak_subjects.is_empty() {
                "overall consistency".to_string()
            } else {
                result.statistics.weak_subjects.join(", ")
            };
            let summary = format!(
                "Scope: overall. {} tests taken, average score {:.2}%. Weak subjects: {}.",
                result.statistics.total_tests,
                result.statistics.average_score,
                join_or_none(&result.statistics.weak_subjects)
            );
            (GuidanceBody::Overall(result), focus, summary)
        }
    };

    let ai_insight = match state.ai() {
        Some(service) => match service.elaborate(&summary).await {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "AI elaboration failed, using static fallback");
                Some(ai_guidance::fallback_insight(&focus))
            }
        },
        None => None,
    };

    Ok(Json(GuidanceResponse { guidance: body, ai_insight }))
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
