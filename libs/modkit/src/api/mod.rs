pub mod problem;
pub mod response;
pub mod trace;

pub use trace::extract_trace_id;
