use thiserror::Error;

use crate::fields::{FieldId, FieldKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Field is read-only: {0}")]
    ReadOnlyField(FieldId),
    #[error("Wrong value kind for {field}: expected {expected}")]
    WrongKind { field: FieldId, expected: FieldKind },
    #[error("Not a calendar date: {0}")]
    InvalidDate(String),
    #[error("Unknown gender: {0}")]
    UnknownGender(String),
    #[error("Unknown title: {0}")]
    UnknownTitle(String),
    #[error("Unknown field name: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
