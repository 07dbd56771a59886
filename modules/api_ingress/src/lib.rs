//! HTTP host for Dayplan.
//!
//! Takes the module routers, adds the shared middleware stack and the
//! service endpoints (`/health`, `/openapi.json`, `/docs`) and serves them.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
    openapi: Option<Arc<utoipa::openapi::OpenApi>>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            openapi: None,
        }
    }

    /// OpenAPI document served at `/openapi.json` when docs are enabled.
    pub fn with_openapi(mut self, doc: utoipa::openapi::OpenApi) -> Self {
        self.openapi = Some(Arc::new(doc));
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap module routes with the middleware stack.
    ///
    /// Layers are added innermost first, so a request passes through:
    /// SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
    /// -> Timeout -> CORS -> BodyLimit -> handler
    pub fn build_router(&self, routes: Router) -> Router {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes);

        if self.config.enable_docs {
            if let Some(doc) = &self.openapi {
                router = router
                    .route(
                        "/openapi.json",
                        get(web::openapi_json).with_state(doc.clone()),
                    )
                    .route("/docs", get(web::serve_docs));
            }
        }

        router = router.fallback(web::route_not_found);

        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_secs),
        ));

        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind `bind_addr` and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_addr))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        serve_with_listener(listener, router, shutdown).await
    }
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("HTTP server shutting down gracefully");
        })
        .await
        .context("HTTP server failed")
}
