use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use modkit::api::extract_trace_id;
use modkit::ProblemResponse;

use crate::api::rest::error::{map_domain_error, rejection};
use crate::domain::error::DomainError;

/// Request path and trace id, for rendering problems.
#[derive(Debug, Clone)]
pub struct RequestCtx {
    pub instance: String,
    pub trace_id: Option<String>,
}

impl RequestCtx {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            instance: parts.uri.path().to_string(),
            trace_id: extract_trace_id(&parts.headers),
        }
    }

    pub fn problem(&self, e: &DomainError) -> ProblemResponse {
        map_domain_error(e, &self.instance, self.trace_id.as_deref())
    }

    pub fn rejection(&self, detail: impl Into<String>) -> ProblemResponse {
        rejection(detail, &self.instance, self.trace_id.as_deref())
    }
}

impl<S> FromRequestParts<S> for RequestCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
