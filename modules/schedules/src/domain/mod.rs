pub mod conflict;
pub mod error;
pub mod highlight;
pub mod repo;
pub mod service;
pub mod timegraph;
pub mod validation;
