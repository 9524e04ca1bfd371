use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::types::{ExamType, UserRole};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UserCreate {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 128))]
    pub(crate) full_name: String,
    pub(crate) password: String,
    #[serde(default)]
    #[serde(alias = "targetExam")]
    pub(crate) target_exam: Option<ExamType>,
    #[serde(default)]
    #[serde(alias = "classLevel")]
    pub(crate) class_level: Option<String>,
    #[serde(default)]
    pub(crate) school: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLogin {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
    pub(crate) target_exam: Option<ExamType>,
    pub(crate) class_level: Option<String>,
    pub(crate) school: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) tests_attempted: i32,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: crate::db::models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            target_exam: user.target_exam,
            class_level: user.class_level,
            school: user.school,
            is_active: user.is_active,
            tests_attempted: user.tests_attempted,
            created_at: format_primitive(user.created_at),
        }
    }
}
