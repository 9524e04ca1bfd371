use sqlx::{PgPool, Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::db::models::StudyMaterial;
use crate::db::types::MaterialType;

pub(crate) const COLUMNS: &str = "\
    id, title, material_type, subject, chapter, topic, url, description, created_by, created_at";

pub(crate) struct CreateStudyMaterial<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) material_type: MaterialType,
    pub(crate) subject: &'a str,
    pub(crate) chapter: Option<String>,
    pub(crate) topic: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) created_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateStudyMaterial<'_>,
) -> Result<StudyMaterial, sqlx::Error> {
    sqlx::query_as::<_, StudyMaterial>(&format!(
        "INSERT INTO study_materials (
            id, title, material_type, subject, chapter, topic, url, description,
            created_by, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.material_type)
    .bind(params.subject)
    .bind(params.chapter)
    .bind(params.topic)
    .bind(params.url)
    .bind(params.description)
    .bind(params.created_by)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn list(
    pool: &PgPool,
    subject: Option<&str>,
    chapter: Option<&str>,
    material_type: Option<MaterialType>,
) -> Result<Vec<StudyMaterial>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {COLUMNS} FROM study_materials WHERE TRUE"
    ));

    if let Some(subject) = subject {
        builder.push(" AND subject = ");
        builder.push_bind(subject.to_string());
    }
    if let Some(chapter) = chapter {
        builder.push(" AND chapter = ");
        builder.push_bind(chapter.to_string());
    }
    if let Some(material_type) = material_type {
        builder.push(" AND material_type = ");
        builder.push_bind(material_type);
    }

    builder.push(" ORDER BY created_at, id");

    builder.build_query_as::<StudyMaterial>().fetch_all(pool).await
}
