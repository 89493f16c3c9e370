use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("required fields missing: {}", .0.join(", "))]
    IncompleteContact(Vec<&'static str>),
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    #[error("data error: {0}")]
    Data(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition { from: from.to_string(), to: to.to_string() }
    }
}
