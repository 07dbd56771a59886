//! Schedules module: users, categories and per-day schedules with the
//! no-overlap rule, calendar highlight dates and the 24-hour pie-chart
//! geometry.

// === PUBLIC CONTRACT ===
// Other crates consume the module through `contract` only.
pub mod contract;

pub use contract::{client, error, model};

// === INTERNAL MODULES ===
// Exposed for the server binary and integration tests.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
