pub mod category;
pub mod schedule;
pub mod user;
