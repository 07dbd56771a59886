use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::SchedulesApi,
    error::SchedulesError,
    model::{
        Category, DateRange, Identity, NewCategory, NewSchedule, Schedule, SchedulePatch,
        TimeGraph, User,
    },
};
use crate::domain::service::Service;

/// Local implementation of `SchedulesApi` that delegates to the domain service.
pub struct SchedulesLocalClient {
    service: Arc<Service>,
}

impl SchedulesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SchedulesApi for SchedulesLocalClient {
    async fn resolve_user(&self, identity: Identity) -> Result<User, SchedulesError> {
        self.service.resolve_user(identity).await.map_err(Into::into)
    }

    async fn list_schedules(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, SchedulesError> {
        self.service
            .list_schedules(user_id, date)
            .await
            .map_err(Into::into)
    }

    async fn get_schedule(&self, user_id: Uuid, id: Uuid) -> Result<Schedule, SchedulesError> {
        self.service
            .get_schedule(user_id, id)
            .await
            .map_err(Into::into)
    }

    async fn create_schedule(
        &self,
        user_id: Uuid,
        new_schedule: NewSchedule,
    ) -> Result<Schedule, SchedulesError> {
        self.service
            .create_schedule(user_id, new_schedule)
            .await
            .map_err(Into::into)
    }

    async fn update_schedule(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: SchedulePatch,
    ) -> Result<Schedule, SchedulesError> {
        self.service
            .update_schedule(user_id, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_schedule(&self, user_id: Uuid, id: Uuid) -> Result<(), SchedulesError> {
        self.service
            .delete_schedule(user_id, id)
            .await
            .map_err(Into::into)
    }

    async fn delete_schedules_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<u64, SchedulesError> {
        self.service
            .delete_schedules_on(user_id, date)
            .await
            .map_err(Into::into)
    }

    async fn highlight_dates(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, SchedulesError> {
        self.service
            .highlight_dates(user_id, range)
            .await
            .map_err(Into::into)
    }

    async fn time_graph(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        radius: Option<f64>,
    ) -> Result<TimeGraph, SchedulesError> {
        self.service
            .time_graph(user_id, date, radius)
            .await
            .map_err(Into::into)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, SchedulesError> {
        self.service.list_categories().await.map_err(Into::into)
    }

    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, SchedulesError> {
        self.service
            .create_category(new_category)
            .await
            .map_err(Into::into)
    }
}
