use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::StudyMaterial;
use crate::db::types::MaterialType;

#[derive(Debug, Serialize)]
pub(crate) struct StudyMaterialResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) material_type: MaterialType,
    pub(crate) subject: String,
    pub(crate) chapter: Option<String>,
    pub(crate) topic: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
}

impl StudyMaterialResponse {
    pub(crate) fn from_db(material: StudyMaterial) -> Self {
        Self {
            id: material.id,
            title: material.title,
            material_type: material.material_type,
            subject: material.subject,
            chapter: material.chapter,
            topic: material.topic,
            url: material.url,
            description: material.description,
            created_at: format_primitive(material.created_at),
        }
    }
}
