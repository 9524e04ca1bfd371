use validator::Validate;

use crate::api::errors::ApiError;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn validate_username(username: &str) -> Result<(), ApiError> {
    let valid = (3..=64).contains(&username.chars().count())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid username format".to_string()))
    }
}

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

/// Runs the derive-based validation and flattens failures into one message.
pub(crate) fn validate_payload(payload: &impl Validate) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| ApiError::BadRequest(errors.to_string()))
}

/// The stored answer key must point at one of the provided options.
pub(crate) fn validate_correct_answer(
    correct_answer: i32,
    option_count: usize,
) -> Result<(), ApiError> {
    if correct_answer >= 0 && (correct_answer as usize) < option_count {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "correct_answer must be between 0 and {}",
            option_count.saturating_sub(1)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_format() {
        assert!(validate_username("student_42").is_ok());
        assert!(validate_username("a.b-c").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn correct_answer_bounds() {
        assert!(validate_correct_answer(0, 4).is_ok());
        assert!(validate_correct_answer(3, 4).is_ok());
        assert!(validate_correct_answer(4, 4).is_err());
        assert!(validate_correct_answer(-1, 4).is_err());
    }

    #[test]
    fn password_length() {
        assert!(validate_password_len("12345678").is_ok());
        assert!(validate_password_len("1234567").is_err());
    }
}
