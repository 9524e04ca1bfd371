use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;
use crate::services::seed;

/// Creates the default superuser on first boot, or repairs it when the
/// stored row drifted from the configured credentials.
pub(crate) async fn ensure_superuser(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_superuser_password.is_empty() {
        tracing::warn!("FIRST_SUPERUSER_PASSWORD not configured; skipping superuser creation");
        return Ok(());
    }

    let username = &admin.first_superuser_username;
    let now = primitive_now_utc();

    if let Some(user) = repositories::users::find_by_username(state.db(), username).await? {
        let verified =
            security::verify_password(&admin.first_superuser_password, &user.hashed_password)
                .unwrap_or(false);

        if verified && user.role == UserRole::Admin && user.is_active {
            tracing::info!("Default superuser already up to date");
            return Ok(());
        }

        let hashed_password = if verified {
            user.hashed_password.clone()
        } else {
            security::hash_password(&admin.first_superuser_password)?
        };
        repositories::users::repair_superuser(state.db(), &user.id, &hashed_password, now).await?;
        tracing::info!("Updated default superuser {username}");
        return Ok(());
    }

    let hashed_password = security::hash_password(&admin.first_superuser_password)?;
    repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            username,
            hashed_password,
            full_name: "Super Admin",
            role: UserRole::Admin,
            target_exam: None,
            class_level: None,
            school: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    tracing::info!("Created default superuser {username}");
    Ok(())
}

/// Seeds the question bank, sample tests and study materials on an empty
/// database. Skipped entirely when the bank already has questions.
pub(crate) async fn seed_initial_data(state: &AppState) -> anyhow::Result<()> {
    if !state.settings().admin().seed_sample_data {
        return Ok(());
    }

    let existing = repositories::questions::count_all(state.db()).await?;
    if existing > 0 {
        tracing::debug!(questions = existing, "Question bank already populated; skipping seed");
        return Ok(());
    }

    let now = primitive_now_utc();
    let bank = seed::generate_question_bank(&mut rand::thread_rng());
    let total = bank.len();

    for question in bank {
        repositories::questions::create(
            state.db(),
            repositories::questions::CreateQuestion {
                id: &Uuid::new_v4().to_string(),
                question: &question.question,
                options: question.options,
                correct_answer: question.correct_answer,
                explanation: Some(question.explanation),
                solution: Some(question.solution),
                subject: question.subject,
                chapter: question.chapter,
                topic: Some(question.topic.to_string()),
                difficulty: question.difficulty,
                marks: question.marks,
                exam: Some(question.exam),
                year: Some(question.year),
                source: Some(question.source),
                created_by: "system",
                created_at: now,
            },
        )
        .await?;
    }
    tracing::info!(questions = total, "Seeded question bank");

    seed_sample_tests(state).await?;
    seed_study_materials(state).await?;
    Ok(())
}

async fn seed_sample_tests(state: &AppState) -> anyhow::Result<()> {
    let now = primitive_now_utc();

    for blueprint in seed::SAMPLE_TESTS {
        let filter = repositories::questions::QuestionFilter {
            subject: blueprint.subject.map(str::to_string),
            chapter: blueprint.chapter.map(str::to_string),
            ..Default::default()
        };
        let questions = repositories::questions::list(state.db(), &filter, 0, 30).await?;
        if questions.is_empty() {
            continue;
        }

        let max_marks: i32 = questions.iter().map(|q| q.marks).sum();
        repositories::tests::create(
            state.db(),
            repositories::tests::CreateTest {
                id: &Uuid::new_v4().to_string(),
                title: blueprint.title,
                description: Some(blueprint.description.to_string()),
                test_type: blueprint.test_type,
                question_ids: questions.into_iter().map(|q| q.id).collect(),
                duration_minutes: blueprint.duration_minutes,
                subject: blueprint.subject.map(str::to_string),
                chapter: blueprint.chapter.map(str::to_string),
                max_marks,
                instructions: seed::TEST_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
                is_public: true,
                created_by: "system",
                created_at: now,
            },
        )
        .await?;
    }

    tracing::info!("Seeded sample tests");
    Ok(())
}

async fn seed_study_materials(state: &AppState) -> anyhow::Result<()> {
    let now = primitive_now_utc();

    for material in seed::SAMPLE_MATERIALS {
        repositories::study_materials::create(
            state.db(),
            repositories::study_materials::CreateStudyMaterial {
                id: &Uuid::new_v4().to_string(),
                title: material.title,
                material_type: material.material_type,
                subject: material.subject,
                chapter: material.chapter.map(str::to_string),
                topic: None,
                url: None,
                description: Some(material.description.to_string()),
                created_by: "system",
                created_at: now,
            },
        )
        .await?;
    }

    tracing::info!("Seeded study materials");
    Ok(())
}
