use serde::Serialize;

use crate::services::guidance::{ChapterGuidance, OverallGuidance, SubjectGuidance};

/// Guidance payload for one of the three scopes, with an optional AI
/// elaboration attached on top of the deterministic recommendation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum GuidanceBody {
    Chapter(ChapterGuidance),
    Subject(SubjectGuidance),
    Overall(OverallGuidance),
}

#[derive(Debug, Serialize)]
pub(crate) struct GuidanceResponse {
    #[serde(flatten)]
    pub(crate) guidance: GuidanceBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ai_insight: Option<String>,
}
