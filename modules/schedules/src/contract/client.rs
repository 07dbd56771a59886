use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::contract::error::SchedulesError;
use crate::contract::model::{
    Category, DateRange, Identity, NewCategory, NewSchedule, Schedule, SchedulePatch, TimeGraph,
    User,
};

/// Public API of the schedules module for in-process consumers.
///
/// Every schedule operation is scoped to the owning user's id.
#[async_trait]
pub trait SchedulesApi: Send + Sync {
    async fn resolve_user(&self, identity: Identity) -> Result<User, SchedulesError>;

    async fn list_schedules(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, SchedulesError>;

    async fn get_schedule(&self, user_id: Uuid, id: Uuid) -> Result<Schedule, SchedulesError>;

    async fn create_schedule(
        &self,
        user_id: Uuid,
        new_schedule: NewSchedule,
    ) -> Result<Schedule, SchedulesError>;

    async fn update_schedule(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: SchedulePatch,
    ) -> Result<Schedule, SchedulesError>;

    async fn delete_schedule(&self, user_id: Uuid, id: Uuid) -> Result<(), SchedulesError>;

    /// Remove every schedule of the day; returns the number removed.
    async fn delete_schedules_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<u64, SchedulesError>;

    async fn highlight_dates(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, SchedulesError>;

    async fn time_graph(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        radius: Option<f64>,
    ) -> Result<TimeGraph, SchedulesError>;

    async fn list_categories(&self) -> Result<Vec<Category>, SchedulesError>;

    async fn create_category(&self, new_category: NewCategory)
        -> Result<Category, SchedulesError>;
}
