use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::ai_guidance::AiGuidanceService;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    ai: Option<AiGuidanceService>,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, ai: Option<AiGuidanceService>) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, ai }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn ai(&self) -> Option<&AiGuidanceService> {
        self.inner.ai.as_ref()
    }
}
