use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::domain::error::DomainError;

const ERROR_TYPE_BASE: &str = "https://errors.dayplan.dev";

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
    trace_id: Option<&str>,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("{ERROR_TYPE_BASE}/{code}"))
        .with_code(code)
        .with_instance(instance);

    let problem = match trace_id {
        Some(id) => problem.with_trace_id(id),
        None => problem,
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC 9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str, trace_id: Option<&str>) -> ProblemResponse {
    match e {
        DomainError::Validation { field, message } => {
            let mut resp = from_parts(
                StatusCode::BAD_REQUEST,
                "SCHEDULES_VALIDATION",
                "Validation error",
                e.to_string(),
                instance,
                trace_id,
            );
            resp.0 = resp
                .0
                .with_errors(vec![ValidationError::new(format!("/{field}"), message.clone())]);
            resp
        }
        DomainError::MissingParameter { name } => from_parts(
            StatusCode::BAD_REQUEST,
            "SCHEDULES_MISSING_PARAMETER",
            "Missing parameter",
            format!("Missing required parameter: {name}"),
            instance,
            trace_id,
        ),
        DomainError::InvalidRange { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "SCHEDULES_INVALID_RANGE",
            "Invalid date range",
            e.to_string(),
            instance,
            trace_id,
        ),
        DomainError::CategoryNotFound { id } => from_parts(
            StatusCode::BAD_REQUEST,
            "SCHEDULES_CATEGORY_NOT_FOUND",
            "Category not found",
            format!("Category with id {id} does not exist"),
            instance,
            trace_id,
        ),
        DomainError::Unauthorized { .. } => from_parts(
            StatusCode::UNAUTHORIZED,
            "SCHEDULES_UNAUTHORIZED",
            "Unauthorized",
            "Unauthorized",
            instance,
            trace_id,
        ),
        DomainError::ScheduleNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "SCHEDULES_NOT_FOUND",
            "Schedule not found",
            format!("Schedule with id {id} was not found"),
            instance,
            trace_id,
        ),
        DomainError::TimeConflict {
            date,
            start,
            end,
            conflicting_id,
        } => from_parts(
            StatusCode::CONFLICT,
            "SCHEDULES_TIME_CONFLICT",
            "Time conflict",
            format!(
                "{start}-{end} on {date} overlaps existing schedule {conflicting_id}"
            ),
            instance,
            trace_id,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
    }
}

/// Malformed path, query or body that never reached the domain.
pub fn rejection(detail: impl Into<String>, instance: &str, trace_id: Option<&str>) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "SCHEDULES_VALIDATION",
        "Validation error",
        detail,
        instance,
        trace_id,
    )
}
