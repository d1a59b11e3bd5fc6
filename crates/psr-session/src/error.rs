use thiserror::Error;

use psr_model::ModelError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("Form is not submittable")]
    NotSubmittable,
    #[error("Operation requires the {expected} step")]
    WrongStep { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, SessionError>;
