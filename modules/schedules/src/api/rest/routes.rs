use std::sync::Arc;

use axum::{
    routing::get,
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::config::IdentityConfig;
use crate::domain::service::Service;

/// Mount the `/api` routes of the module onto `router`.
///
/// The service and identity settings travel as request extensions; the
/// identity extractors read them from there.
pub fn register_routes(router: Router, service: Arc<Service>, identity: IdentityConfig) -> Router {
    router
        .route("/api/me", get(handlers::get_me))
        .route("/api/time-options", get(handlers::time_options))
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/schedules",
            get(handlers::list_schedules)
                .post(handlers::create_schedule)
                .delete(handlers::delete_schedules_on_date),
        )
        .route("/api/schedules/highlights", get(handlers::highlight_dates))
        .route("/api/schedules/graph", get(handlers::time_graph))
        .route(
            "/api/schedules/{id}",
            get(handlers::get_schedule)
                .put(handlers::update_schedule)
                .delete(handlers::delete_schedule),
        )
        .layer(Extension(Arc::new(identity)))
        .layer(Extension(service))
}
