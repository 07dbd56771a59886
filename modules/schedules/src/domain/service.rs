use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::SchedulesConfig;
use crate::contract::model::{
    Category, DateRange, Identity, NewCategory, NewSchedule, Schedule, SchedulePatch, TimeGraph,
    User,
};
use crate::domain::conflict::find_conflict;
use crate::domain::error::DomainError;
use crate::domain::highlight::{check_range, collect_dates};
use crate::domain::repo::{CategoriesRepository, SchedulesRepository, UsersRepository};
use crate::domain::timegraph::{build_segments, hour_ticks, DEFAULT_TICK_RADIUS};
use crate::domain::validation::{
    validate_color, validate_email, validate_new_category, validate_time_range, validate_title,
    validate_username,
};

/// Domain service with the business rules for users, categories and schedules.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    users: Arc<dyn UsersRepository>,
    categories: Arc<dyn CategoriesRepository>,
    schedules: Arc<dyn SchedulesRepository>,
    config: ServiceConfig,
    /// Held across "check for overlap, then write" and user provisioning.
    write_lock: Arc<Mutex<()>>,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_title_length: usize,
    pub max_category_name_length: usize,
    pub max_highlight_range_days: i64,
    pub default_color: String,
    pub auto_provision: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&SchedulesConfig::default())
    }
}

impl From<&SchedulesConfig> for ServiceConfig {
    fn from(cfg: &SchedulesConfig) -> Self {
        Self {
            max_title_length: cfg.max_title_length,
            max_category_name_length: cfg.max_category_name_length,
            max_highlight_range_days: cfg.max_highlight_range_days,
            default_color: cfg.default_color.clone(),
            auto_provision: cfg.identity.auto_provision,
        }
    }
}

fn db_error(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fill blanks of `new` from `category`; explicit values win.
pub(crate) fn apply_category_defaults(mut new: NewSchedule, category: Option<&Category>) -> NewSchedule {
    new.color = non_blank(new.color);
    new.note = non_blank(new.note);

    if let Some(c) = category {
        if new.title.trim().is_empty() {
            new.title = c.default_title.clone();
        }
        if new.note.is_none() {
            new.note = non_blank(c.default_note.clone());
        }
        if new.color.is_none() {
            new.color = Some(c.default_color.clone());
        }
        if new.start_time.is_none() {
            new.start_time = c.default_start;
        }
        if new.end_time.is_none() {
            new.end_time = c.default_end;
        }
    }
    new
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        users: Arc<dyn UsersRepository>,
        categories: Arc<dyn CategoriesRepository>,
        schedules: Arc<dyn SchedulesRepository>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            users,
            categories,
            schedules,
            config,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Map an upstream identity to a local user, provisioning it when allowed.
    #[instrument(
        name = "schedules.service.resolve_user",
        skip(self, identity),
        fields(email = %identity.email)
    )]
    pub async fn resolve_user(&self, identity: Identity) -> Result<User, DomainError> {
        let email = identity.email.trim().to_string();
        if let Some(user) = self.users.find_by_email(&email).await.map_err(db_error)? {
            return Ok(user);
        }
        if !self.config.auto_provision {
            return Err(DomainError::unauthorized(format!(
                "no local account for '{email}'"
            )));
        }

        validate_email(&email)?;
        let username = non_blank(identity.username)
            .map(|u| u.trim().to_string())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        validate_username(&username)?;

        let _guard = self.write_lock.lock().await;
        // Another request may have provisioned the same email meanwhile.
        if let Some(user) = self.users.find_by_email(&email).await.map_err(db_error)? {
            return Ok(user);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.clone()).await.map_err(db_error)?;

        info!(user_id = %user.id, "Provisioned user from upstream identity");
        Ok(user)
    }

    #[instrument(name = "schedules.service.list_schedules", skip(self), fields(user_id = %user_id, date = %date))]
    pub async fn list_schedules(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, DomainError> {
        let list = self
            .schedules
            .list_on_date(user_id, date)
            .await
            .map_err(db_error)?;
        debug!("Found {} schedules", list.len());
        Ok(list)
    }

    #[instrument(name = "schedules.service.get_schedule", skip(self), fields(user_id = %user_id, schedule_id = %id))]
    pub async fn get_schedule(&self, user_id: Uuid, id: Uuid) -> Result<Schedule, DomainError> {
        self.load_owned(user_id, id).await
    }

    #[instrument(
        name = "schedules.service.create_schedule",
        skip(self, new_schedule),
        fields(user_id = %user_id, date = %new_schedule.date)
    )]
    pub async fn create_schedule(
        &self,
        user_id: Uuid,
        new_schedule: NewSchedule,
    ) -> Result<Schedule, DomainError> {
        info!("Creating schedule");

        let category = match new_schedule.category_id {
            Some(id) => Some(self.load_category(id).await?),
            None => None,
        };
        let filled = apply_category_defaults(new_schedule, category.as_ref());

        let title = filled.title.trim().to_string();
        let (start, end) = self.validate_slot(
            &title,
            filled.start_time,
            filled.end_time,
            filled.color.as_deref(),
        )?;

        let _guard = self.write_lock.lock().await;
        self.ensure_free(user_id, filled.date, start, end, None)
            .await?;

        let now = Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4(),
            user_id,
            category_id: filled.category_id,
            title,
            date: filled.date,
            start_time: start,
            end_time: end,
            color: filled.color,
            note: filled.note,
            created_at: now,
            updated_at: now,
        };
        self.schedules
            .insert(schedule.clone())
            .await
            .map_err(db_error)?;

        info!(schedule_id = %schedule.id, "Successfully created schedule");
        Ok(schedule)
    }

    #[instrument(
        name = "schedules.service.update_schedule",
        skip(self, patch),
        fields(user_id = %user_id, schedule_id = %id)
    )]
    pub async fn update_schedule(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: SchedulePatch,
    ) -> Result<Schedule, DomainError> {
        info!("Updating schedule");

        let _guard = self.write_lock.lock().await;
        let mut current = self.load_owned(user_id, id).await?;

        match patch.category_id {
            Some(Some(category_id)) => {
                self.load_category(category_id).await?;
                current.category_id = Some(category_id);
            }
            Some(None) => current.category_id = None,
            None => {}
        }
        if let Some(title) = patch.title {
            current.title = title.trim().to_string();
        }
        if let Some(date) = patch.date {
            current.date = date;
        }
        if let Some(start) = patch.start_time {
            current.start_time = start;
        }
        if let Some(end) = patch.end_time {
            current.end_time = end;
        }
        if let Some(color) = patch.color {
            current.color = non_blank(Some(color));
        }
        if let Some(note) = patch.note {
            current.note = non_blank(Some(note));
        }

        self.validate_slot(
            &current.title,
            Some(current.start_time),
            Some(current.end_time),
            current.color.as_deref(),
        )?;
        self.ensure_free(
            user_id,
            current.date,
            current.start_time,
            current.end_time,
            Some(id),
        )
        .await?;

        current.updated_at = Utc::now();
        self.schedules
            .update(current.clone())
            .await
            .map_err(db_error)?;

        info!("Successfully updated schedule");
        Ok(current)
    }

    #[instrument(name = "schedules.service.delete_schedule", skip(self), fields(user_id = %user_id, schedule_id = %id))]
    pub async fn delete_schedule(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let deleted = self
            .schedules
            .delete(user_id, id)
            .await
            .map_err(db_error)?;
        if !deleted {
            return Err(DomainError::schedule_not_found(id));
        }
        info!("Successfully deleted schedule");
        Ok(())
    }

    /// Clear a whole day.
    #[instrument(name = "schedules.service.delete_schedules_on", skip(self), fields(user_id = %user_id, date = %date))]
    pub async fn delete_schedules_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<u64, DomainError> {
        let count = self
            .schedules
            .delete_on_date(user_id, date)
            .await
            .map_err(db_error)?;
        info!(count, "Cleared schedules of the day");
        Ok(count)
    }

    #[instrument(
        name = "schedules.service.highlight_dates",
        skip(self),
        fields(user_id = %user_id, start = %range.start, end = %range.end)
    )]
    pub async fn highlight_dates(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        check_range(&range, self.config.max_highlight_range_days)?;
        let dates = self
            .schedules
            .dates_between(user_id, range.start, range.end)
            .await
            .map_err(db_error)?;
        Ok(collect_dates(dates, &range))
    }

    #[instrument(name = "schedules.service.time_graph", skip(self), fields(user_id = %user_id, date = %date))]
    pub async fn time_graph(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        radius: Option<f64>,
    ) -> Result<TimeGraph, DomainError> {
        let radius = radius.unwrap_or(DEFAULT_TICK_RADIUS);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DomainError::validation(
                "radius",
                "radius must be a positive number",
            ));
        }

        let schedules = self.list_schedules(user_id, date).await?;
        Ok(TimeGraph {
            date,
            segments: build_segments(&schedules, &self.config.default_color),
            ticks: hour_ticks(radius),
        })
    }

    #[instrument(name = "schedules.service.list_categories", skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.list_all().await.map_err(db_error)
    }

    #[instrument(
        name = "schedules.service.create_category",
        skip(self, new_category),
        fields(name = %new_category.name)
    )]
    pub async fn create_category(&self, new_category: NewCategory) -> Result<Category, DomainError> {
        info!("Creating category");
        validate_new_category(&new_category, self.config.max_category_name_length)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name.trim().to_string(),
            default_title: new_category.default_title.trim().to_string(),
            default_start: new_category.default_start,
            default_end: new_category.default_end,
            default_note: non_blank(new_category.default_note),
            default_color: new_category
                .default_color
                .unwrap_or_else(|| self.config.default_color.clone()),
            created_at: now,
            updated_at: now,
        };
        self.categories
            .insert(category.clone())
            .await
            .map_err(db_error)?;

        info!(category_id = %category.id, "Successfully created category");
        Ok(category)
    }

    async fn load_owned(&self, user_id: Uuid, id: Uuid) -> Result<Schedule, DomainError> {
        self.schedules
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .filter(|s| s.user_id == user_id)
            .ok_or_else(|| DomainError::schedule_not_found(id))
    }

    async fn load_category(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::category_not_found(id))
    }

    fn validate_slot(
        &self,
        title: &str,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        color: Option<&str>,
    ) -> Result<(NaiveTime, NaiveTime), DomainError> {
        validate_title(title, self.config.max_title_length)?;
        let start =
            start.ok_or_else(|| DomainError::validation("start_time", "start_time is required"))?;
        let end = end.ok_or_else(|| DomainError::validation("end_time", "end_time is required"))?;
        validate_time_range(start, end)?;
        if let Some(color) = color {
            validate_color("color", color)?;
        }
        Ok((start, end))
    }

    /// Caller must hold `write_lock`.
    async fn ensure_free(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let existing = self
            .schedules
            .list_on_date(user_id, date)
            .await
            .map_err(db_error)?;
        match find_conflict(&existing, start, end, exclude) {
            Some(other) => {
                debug!(conflicting_id = %other.id, "Time slot is taken");
                Err(DomainError::time_conflict(date, start, end, other.id))
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn category() -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: "Sleep".into(),
            default_title: "Sleep".into(),
            default_start: Some(t(0, 0)),
            default_end: Some(t(7, 0)),
            default_note: Some("lights off".into()),
            default_color: "#223344".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn blank(category_id: Option<Uuid>) -> NewSchedule {
        NewSchedule {
            category_id,
            title: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start_time: None,
            end_time: None,
            color: Some(String::new()),
            note: None,
        }
    }

    #[test]
    fn category_fills_blank_fields() {
        let c = category();
        let filled = apply_category_defaults(blank(Some(c.id)), Some(&c));
        assert_eq!(filled.title, "Sleep");
        assert_eq!(filled.start_time, Some(t(0, 0)));
        assert_eq!(filled.end_time, Some(t(7, 0)));
        assert_eq!(filled.color.as_deref(), Some("#223344"));
        assert_eq!(filled.note.as_deref(), Some("lights off"));
    }

    #[test]
    fn explicit_values_win_over_category() {
        let c = category();
        let mut new = blank(Some(c.id));
        new.title = "Nap".into();
        new.start_time = Some(t(13, 0));
        new.color = Some("#abcdef".into());
        new.note = Some("short".into());

        let filled = apply_category_defaults(new, Some(&c));
        assert_eq!(filled.title, "Nap");
        assert_eq!(filled.start_time, Some(t(13, 0)));
        assert_eq!(filled.end_time, Some(t(7, 0)));
        assert_eq!(filled.color.as_deref(), Some("#abcdef"));
        assert_eq!(filled.note.as_deref(), Some("short"));
    }

    #[test]
    fn without_category_blanks_stay_blank() {
        let filled = apply_category_defaults(blank(None), None);
        assert!(filled.title.is_empty());
        assert!(filled.start_time.is_none());
        assert!(filled.color.is_none());
    }
}
