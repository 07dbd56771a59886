//! Caller identity asserted by the upstream auth proxy.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use modkit::ProblemResponse;
use tracing::debug;

use crate::api::rest::context::RequestCtx;
use crate::config::IdentityConfig;
use crate::contract::model::{Identity, User};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Authenticated caller; rejects with 401 when no identity is asserted.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Caller if known; never rejects for a missing, unknown or malformed identity.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

pub fn identity_from_headers(headers: &HeaderMap, cfg: &IdentityConfig) -> Option<Identity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    Some(Identity {
        email: header(&cfg.email_header)?,
        username: header(&cfg.username_header),
    })
}

fn lookup(parts: &Parts, ctx: &RequestCtx) -> Result<(Arc<Service>, Option<Identity>), ProblemResponse> {
    let svc = parts.extensions.get::<Arc<Service>>().cloned();
    let cfg = parts.extensions.get::<Arc<IdentityConfig>>();
    match (svc, cfg) {
        (Some(svc), Some(cfg)) => Ok((svc, identity_from_headers(&parts.headers, cfg))),
        _ => {
            tracing::error!("schedules routes are missing their service extensions");
            let mut resp = modkit::internal_error("Service is not configured");
            resp.0 = resp.0.with_instance(ctx.instance.as_str());
            Err(resp)
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = RequestCtx::from_parts(parts);
        let (svc, identity) = lookup(parts, &ctx)?;
        let Some(identity) = identity else {
            debug!(path = %ctx.instance, "Request without identity");
            return Err(ctx.problem(&DomainError::unauthorized("no identity asserted")));
        };
        svc.resolve_user(identity)
            .await
            .map(Self)
            .map_err(|e| ctx.problem(&e))
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = RequestCtx::from_parts(parts);
        let (svc, identity) = lookup(parts, &ctx)?;
        let Some(identity) = identity else {
            return Ok(Self(None));
        };
        match svc.resolve_user(identity).await {
            Ok(user) => Ok(Self(Some(user))),
            // A malformed asserted identity is treated as not logged in.
            Err(DomainError::Unauthorized { .. } | DomainError::Validation { .. }) => {
                Ok(Self(None))
            }
            Err(e) => Err(ctx.problem(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn email_header_is_required() {
        let cfg = IdentityConfig::default();
        let mut h = HeaderMap::new();
        h.insert("x-auth-request-user", HeaderValue::from_static("alice"));
        assert!(identity_from_headers(&h, &cfg).is_none());

        h.insert("x-auth-request-email", HeaderValue::from_static(" alice@example.com "));
        let id = identity_from_headers(&h, &cfg).unwrap();
        assert_eq!(id.email, "alice@example.com");
        assert_eq!(id.username.as_deref(), Some("alice"));
    }

    #[test]
    fn blank_headers_count_as_missing() {
        let cfg = IdentityConfig::default();
        let mut h = HeaderMap::new();
        h.insert("x-auth-request-email", HeaderValue::from_static("   "));
        assert!(identity_from_headers(&h, &cfg).is_none());
    }

    #[test]
    fn custom_header_names() {
        let cfg = IdentityConfig {
            email_header: "x-forwarded-email".into(),
            username_header: "x-forwarded-user".into(),
            auto_provision: false,
        };
        let mut h = HeaderMap::new();
        h.insert("x-forwarded-email", HeaderValue::from_static("bob@example.com"));
        let id = identity_from_headers(&h, &cfg).unwrap();
        assert_eq!(id.email, "bob@example.com");
        assert!(id.username.is_none());
    }
}
