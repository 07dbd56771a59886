pub mod auth;
pub mod context;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use openapi::ApiDoc;
pub use routes::register_routes;
