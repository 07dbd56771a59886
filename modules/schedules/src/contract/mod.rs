pub mod client;
pub mod error;
pub mod model;

pub use client::SchedulesApi;
pub use error::SchedulesError;
pub use model::{
    Category, DateRange, GraphSegment, HourTick, Identity, NewCategory, NewSchedule, Schedule,
    SchedulePatch, SegmentKind, TimeGraph, User,
};
