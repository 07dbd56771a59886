pub mod local;

pub use local::SchedulesLocalClient;
