use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// Pure models for inter-module communication (no serde/utoipa).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity asserted by the upstream auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub username: Option<String>,
}

/// Template supplying defaults for new schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub default_title: String,
    pub default_start: Option<NaiveTime>,
    pub default_end: Option<NaiveTime>,
    pub default_note: Option<String>,
    pub default_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub default_title: String,
    pub default_start: Option<NaiveTime>,
    pub default_end: Option<NaiveTime>,
    pub default_note: Option<String>,
    /// Falls back to the configured default color.
    pub default_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a schedule.
///
/// Empty or missing fields are filled from the category when `category_id`
/// is set, so times are optional here and validated after filling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub category_id: Option<Uuid>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<String>,
    pub note: Option<String>,
}

/// Partial update; `None` leaves the field unchanged.
///
/// `note: Some("")` clears the note; `category_id: Some(None)` detaches the
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulePatch {
    pub category_id: Option<Option<Uuid>>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<String>,
    pub note: Option<String>,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Idle,
    Schedule,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Idle => "idle",
            SegmentKind::Schedule => "schedule",
        }
    }
}

/// One slice of the 24-hour pie chart, angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSegment {
    pub kind: SegmentKind,
    pub color: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub schedule_id: Option<Uuid>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourTick {
    pub hour: u32,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGraph {
    pub date: NaiveDate,
    pub segments: Vec<GraphSegment>,
    pub ticks: Vec<HourTick>,
}
