use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::db::types::MaterialType;
use crate::repositories;
use crate::schemas::material::StudyMaterialResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_materials))
}

#[derive(Debug, Deserialize)]
struct ListMaterialsQuery {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    chapter: Option<String>,
    #[serde(default)]
    #[serde(alias = "type")]
    material_type: Option<MaterialType>,
}

async fn list_materials(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<ListMaterialsQuery>,
) -> Result<Json<Vec<StudyMaterialResponse>>, ApiError> {
    let materials = repositories::study_materials::list(
        state.db(),
        query.subject.as_deref(),
        query.chapter.as_deref(),
        query.material_type,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to fetch study materials"))?;

    Ok(Json(materials.into_iter().map(StudyMaterialResponse::from_db).collect()))
}
