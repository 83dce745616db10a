use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    pub fn invalid(field: &str, expected: &str) -> Self {
        Self::Validation(format!("`{field}` must be {expected}"))
    }
}
