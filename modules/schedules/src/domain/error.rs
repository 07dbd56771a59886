use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid date range: {message}")]
    InvalidRange { message: String },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: Uuid },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Schedule not found: {id}")]
    ScheduleNotFound { id: Uuid },

    #[error("Time slot {start}-{end} on {date} overlaps schedule {conflicting_id}")]
    TimeConflict {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        conflicting_id: Uuid,
    },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    pub fn category_not_found(id: Uuid) -> Self {
        Self::CategoryNotFound { id }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn schedule_not_found(id: Uuid) -> Self {
        Self::ScheduleNotFound { id }
    }

    pub fn time_conflict(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        conflicting_id: Uuid,
    ) -> Self {
        Self::TimeConflict {
            date,
            start,
            end,
            conflicting_id,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
