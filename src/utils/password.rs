use bcrypt::{DEFAULT_COST, hash, verify};
use crate::error::{AppError, AppResult};

/// bcrypt ignores everything past this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Checks password length.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 || password.len() > PASSWORD_MAX_BYTES {
        return Err(AppError::ValidationError(format!(
            "Password must be between 8 and {PASSWORD_MAX_BYTES} bytes"
        )));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))
}
