use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulesError {
    #[error("Schedule not found: {id}")]
    NotFound { id: Uuid },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: Uuid },

    #[error("Schedule overlaps an existing one on {date}")]
    Conflict { date: NaiveDate },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error")]
    Internal,
}

impl SchedulesError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<DomainError> for SchedulesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ScheduleNotFound { id } => Self::NotFound { id },
            DomainError::CategoryNotFound { id } => Self::CategoryNotFound { id },
            DomainError::TimeConflict { date, .. } => Self::Conflict { date },
            DomainError::Validation { .. }
            | DomainError::MissingParameter { .. }
            | DomainError::InvalidRange { .. } => Self::validation(e.to_string()),
            DomainError::Unauthorized { .. } => Self::Unauthorized,
            DomainError::Database { .. } => Self::Internal,
        }
    }
}
