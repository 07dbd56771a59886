//! # ModKit
//!
//! Shared plumbing for Dayplan modules: RFC 9457 problem responses,
//! JSON response helpers and process shutdown signals.

pub use anyhow::Result;

pub mod api;
pub mod runtime;

pub use api::problem::{
    internal_error, not_found, Problem, ProblemResponse, ValidationError,
    APPLICATION_PROBLEM_JSON,
};
pub use api::response::{created_json, no_content};
pub use runtime::shutdown::wait_for_shutdown;
