use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::contract::model::{Category, Schedule, User};

/// Ports for the domain layer: persistence operations the service needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Insert a fully-formed user; the service owns id and timestamps.
    async fn insert(&self, u: User) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Category>>;
    /// All categories ordered by name.
    async fn list_all(&self) -> anyhow::Result<Vec<Category>>;
    async fn insert(&self, c: Category) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SchedulesRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Schedule>>;
    /// Schedules of one user and date ordered by start time.
    async fn list_on_date(&self, user_id: Uuid, date: NaiveDate) -> anyhow::Result<Vec<Schedule>>;
    /// Dates in `[start, end]` with at least one schedule. May contain duplicates.
    async fn dates_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<NaiveDate>>;
    async fn insert(&self, s: Schedule) -> anyhow::Result<()>;
    /// Update by primary key in `s.id`.
    async fn update(&self, s: Schedule) -> anyhow::Result<()>;
    /// Returns true if a row owned by `user_id` was deleted.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn delete_on_date(&self, user_id: Uuid, date: NaiveDate) -> anyhow::Result<u64>;
}
