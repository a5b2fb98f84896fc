use crate::model::{NewStudent, StudentPayload};
use thiserror::Error;

/// Reasons a student payload is rejected before it reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `name` was empty.
    #[error("name is required")]
    MissingName,
    /// `age` was zero, negative, or too large to store.
    #[error("age must be positive")]
    InvalidAge,
    /// `email` was empty.
    #[error("email is required")]
    MissingEmail,
}

/// Check a decoded payload and convert it into storable fields.
///
/// Fields are checked in declaration order and the first failure wins.
pub fn validate_student(payload: StudentPayload) -> Result<NewStudent, ValidationError> {
    let StudentPayload { name, age, email } = payload;
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let age = u32::try_from(age)
        .ok()
        .filter(|age| *age > 0)
        .ok_or(ValidationError::InvalidAge)?;
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    Ok(NewStudent { name, age, email })
}
