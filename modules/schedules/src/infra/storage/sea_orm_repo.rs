//! SeaORM-backed implementations of the domain ports.
//!
//! Each repository is generic over `C: ConnectionTrait`, so it can be built
//! with a `DatabaseConnection` or a transaction.

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::contract::model::{Category, Schedule, User};
use crate::domain::repo::{CategoriesRepository, SchedulesRepository, UsersRepository};
use crate::infra::storage::entity::{category, schedule, user};
use crate::infra::storage::mapper::{
    category_active_model, schedule_active_model, user_active_model,
};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        let _ = user_active_model(u)
            .insert(&self.conn)
            .await
            .context("user insert failed")?;
        Ok(())
    }
}

pub struct SeaOrmCategoriesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmCategoriesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> CategoriesRepository for SeaOrmCategoriesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Category>> {
        let found = category::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("category find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.conn)
            .await
            .context("category list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, c: Category) -> anyhow::Result<()> {
        let _ = category_active_model(c)
            .insert(&self.conn)
            .await
            .context("category insert failed")?;
        Ok(())
    }
}

pub struct SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> SchedulesRepository for SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Schedule>> {
        let found = schedule::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("schedule find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_on_date(&self, user_id: Uuid, date: NaiveDate) -> anyhow::Result<Vec<Schedule>> {
        let rows = schedule::Entity::find()
            .filter(schedule::Column::UserId.eq(user_id))
            .filter(schedule::Column::Date.eq(date))
            .order_by_asc(schedule::Column::StartTime)
            .all(&self.conn)
            .await
            .context("list_on_date failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn dates_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<NaiveDate>> {
        let dates = schedule::Entity::find()
            .select_only()
            .column(schedule::Column::Date)
            .distinct()
            .filter(schedule::Column::UserId.eq(user_id))
            .filter(schedule::Column::Date.between(start, end))
            .order_by_asc(schedule::Column::Date)
            .into_tuple::<NaiveDate>()
            .all(&self.conn)
            .await
            .context("dates_between failed")?;
        Ok(dates)
    }

    async fn insert(&self, s: Schedule) -> anyhow::Result<()> {
        let _ = schedule_active_model(s)
            .insert(&self.conn)
            .await
            .context("schedule insert failed")?;
        Ok(())
    }

    async fn update(&self, s: Schedule) -> anyhow::Result<()> {
        let _ = schedule_active_model(s)
            .update(&self.conn)
            .await
            .context("schedule update failed")?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = schedule::Entity::delete_many()
            .filter(schedule::Column::Id.eq(id))
            .filter(schedule::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("schedule delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_on_date(&self, user_id: Uuid, date: NaiveDate) -> anyhow::Result<u64> {
        let res = schedule::Entity::delete_many()
            .filter(schedule::Column::UserId.eq(user_id))
            .filter(schedule::Column::Date.eq(date))
            .exec(&self.conn)
            .await
            .context("delete_on_date failed")?;
        Ok(res.rows_affected)
    }
}
