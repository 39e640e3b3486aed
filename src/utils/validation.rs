use regex::Regex;
use std::sync::LazyLock;
use crate::error::{AppError, AppResult};

pub const USERNAME_MAX_LEN: usize = 45;
pub const EMAIL_MAX_LEN: usize = 50;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

pub fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX_LEN {
        return Err(AppError::ValidationError(format!(
            "Username must be between 1 and {USERNAME_MAX_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::ValidationError(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(AppError::ValidationError(format!(
            "Email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::ValidationError("Invalid email address".to_string()));
    }
    Ok(())
}
