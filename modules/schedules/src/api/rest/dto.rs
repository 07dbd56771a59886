use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{
    Category, GraphSegment, HourTick, NewCategory, NewSchedule, Schedule, SchedulePatch,
    TimeGraph, User,
};
use crate::domain::error::DomainError;
use crate::domain::validation::{format_time, parse_date, parse_optional_time};

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login state of the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeDto {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub default_title: String,
    /// `HH:MM:SS`
    pub default_start: Option<String>,
    /// `HH:MM:SS`
    pub default_end: Option<String>,
    pub default_note: Option<String>,
    pub default_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryReq {
    pub name: String,
    pub default_title: String,
    /// `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub default_start: Option<String>,
    #[serde(default)]
    pub default_end: Option<String>,
    #[serde(default)]
    pub default_note: Option<String>,
    /// `#RRGGBB`; the configured default when omitted.
    #[serde(default)]
    pub default_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub date: NaiveDate,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    pub color: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New schedule. With `category_id`, blank fields take the category defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateScheduleReq {
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Partial update; omitted fields stay unchanged, an empty note clears it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateScheduleReq {
    /// Absent keeps the category, `null` detaches it.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub color: Option<String>,
    pub note: Option<String>,
}

/// Tells an explicit `null` (`Some(None)`) apart from a missing key (`None`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GraphQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Radius for hour tick positions.
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HighlightQuery {
    /// First day, `YYYY-MM-DD`
    pub start: Option<String>,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end: Option<String>,
    /// Whole month, `YYYY-MM`; used when start/end are absent
    pub month: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HighlightDatesDto {
    pub highlight_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedDto {
    pub deleted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphSegmentDto {
    /// `idle` or `schedule`
    pub kind: String,
    pub color: String,
    /// Sweep in degrees.
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub schedule_id: Option<Uuid>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HourTickDto {
    pub hour: u32,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeGraphDto {
    pub date: NaiveDate,
    pub segments: Vec<GraphSegmentDto>,
    pub ticks: Vec<HourTickDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeOptionsDto {
    pub hours: Vec<String>,
    pub minutes: Vec<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            default_title: c.default_title,
            default_start: c.default_start.map(format_time),
            default_end: c.default_end.map(format_time),
            default_note: c.default_note,
            default_color: c.default_color,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Schedule> for ScheduleDto {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            category_id: s.category_id,
            title: s.title,
            date: s.date,
            start_time: format_time(s.start_time),
            end_time: format_time(s.end_time),
            color: s.color,
            note: s.note,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<GraphSegment> for GraphSegmentDto {
    fn from(s: GraphSegment) -> Self {
        Self {
            kind: s.kind.as_str().to_string(),
            color: s.color,
            value: s.value,
            start_angle: s.start_angle,
            end_angle: s.end_angle,
            schedule_id: s.schedule_id,
            title: s.title,
        }
    }
}

impl From<HourTick> for HourTickDto {
    fn from(t: HourTick) -> Self {
        Self {
            hour: t.hour,
            label: t.label,
            x: t.x,
            y: t.y,
        }
    }
}

impl From<TimeGraph> for TimeGraphDto {
    fn from(g: TimeGraph) -> Self {
        Self {
            date: g.date,
            segments: g.segments.into_iter().map(Into::into).collect(),
            ticks: g.ticks.into_iter().map(Into::into).collect(),
        }
    }
}

// Requests carry text dates/times; parsing can fail, hence TryFrom.

impl TryFrom<CreateCategoryReq> for NewCategory {
    type Error = DomainError;

    fn try_from(req: CreateCategoryReq) -> Result<Self, Self::Error> {
        Ok(Self {
            default_start: parse_optional_time("default_start", req.default_start.as_deref())?,
            default_end: parse_optional_time("default_end", req.default_end.as_deref())?,
            name: req.name,
            default_title: req.default_title,
            default_note: req.default_note,
            default_color: req.default_color.filter(|c| !c.trim().is_empty()),
        })
    }
}

impl TryFrom<CreateScheduleReq> for NewSchedule {
    type Error = DomainError;

    fn try_from(req: CreateScheduleReq) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date("date", &req.date)?,
            start_time: parse_optional_time("start_time", req.start_time.as_deref())?,
            end_time: parse_optional_time("end_time", req.end_time.as_deref())?,
            category_id: req.category_id,
            title: req.title,
            color: req.color,
            note: req.note,
        })
    }
}

impl TryFrom<UpdateScheduleReq> for SchedulePatch {
    type Error = DomainError;

    fn try_from(req: UpdateScheduleReq) -> Result<Self, Self::Error> {
        Ok(Self {
            date: req
                .date
                .as_deref()
                .map(|d| parse_date("date", d))
                .transpose()?,
            start_time: parse_optional_time("start_time", req.start_time.as_deref())?,
            end_time: parse_optional_time("end_time", req.end_time.as_deref())?,
            category_id: req.category_id,
            title: req.title,
            color: req.color,
            note: req.note,
        })
    }
}
