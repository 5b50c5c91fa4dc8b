use thiserror::Error;

use crate::domain::contact::Field;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{}", .0.taken_message())]
    Uniqueness(Field),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl AppError {
    pub fn contact_not_found() -> Self {
        AppError::NotFound("Contact".to_string())
    }

    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AppError::StoreUnavailable("contact store lock poisoned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_not_found_message() {
        assert_eq!(AppError::contact_not_found().to_string(), "Contact Not found");
    }

    #[test]
    fn confirm_uniqueness_message() {
        assert_eq!(
            AppError::Uniqueness(Field::Email).to_string(),
            "This email is already registered"
        );
        assert_eq!(
            AppError::Uniqueness(Field::Phone).to_string(),
            "This phone number is already registered"
        );
    }

    #[test]
    fn poisoned_lock_is_store_unavailable() {
        let lock = std::sync::Mutex::new(());
        let _ = std::panic::catch_unwind(|| {
            let _guard = lock.lock().unwrap();
            panic!("poison");
        });

        let err: AppError = lock.lock().unwrap_err().into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
