//! Service spans and rules checked against in-memory mock repositories.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use tracing_test::traced_test;
use uuid::Uuid;

use schedules::contract::model::{Category, Identity, NewSchedule, Schedule, User};
use schedules::domain::error::DomainError;
use schedules::domain::repo::{CategoriesRepository, SchedulesRepository, UsersRepository};
use schedules::domain::service::{Service, ServiceConfig};

#[derive(Default)]
struct MockUsersRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait::async_trait]
impl UsersRepository for MockUsersRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, u: User) -> Result<()> {
        self.users.lock().unwrap().push(u);
        Ok(())
    }
}

struct EmptyCategories;

#[async_trait::async_trait]
impl CategoriesRepository for EmptyCategories {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Category>> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Category>> {
        Ok(Vec::new())
    }

    async fn insert(&self, _c: Category) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MockSchedulesRepository {
    rows: Mutex<Vec<Schedule>>,
    fail: bool,
}

#[async_trait::async_trait]
impl SchedulesRepository for MockSchedulesRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list_on_date(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Schedule>> {
        if self.fail {
            anyhow::bail!("connection reset");
        }
        let mut out: Vec<Schedule> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.date == date)
            .cloned()
            .collect();
        out.sort_by_key(|s| s.start_time);
        Ok(out)
    }

    async fn dates_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.date >= start && s.date <= end)
            .map(|s| s.date)
            .collect())
    }

    async fn insert(&self, s: Schedule) -> Result<()> {
        self.rows.lock().unwrap().push(s);
        Ok(())
    }

    async fn update(&self, s: Schedule) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.id == s.id) {
            *row = s;
        }
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(rows.len() < before)
    }

    async fn delete_on_date(&self, user_id: Uuid, date: NaiveDate) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.user_id == user_id && s.date == date));
        Ok((before - rows.len()) as u64)
    }
}

fn service_with(schedules: MockSchedulesRepository) -> Service {
    Service::new(
        Arc::new(MockUsersRepository::default()),
        Arc::new(EmptyCategories),
        Arc::new(schedules),
        ServiceConfig::default(),
    )
}

fn new_schedule(start: u32, end: u32) -> NewSchedule {
    NewSchedule {
        category_id: None,
        title: "Focus".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(start, 0, 0),
        end_time: NaiveTime::from_hms_opt(end, 0, 0),
        color: None,
        note: None,
    }
}

#[traced_test]
#[tokio::test]
async fn create_schedule_emits_spans() {
    let service = service_with(MockSchedulesRepository::default());
    let user_id = Uuid::new_v4();

    let created = service.create_schedule(user_id, new_schedule(9, 10)).await;

    assert!(created.is_ok());
    assert!(logs_contain("schedules.service.create_schedule"));
    assert!(logs_contain("Successfully created schedule"));
}

#[traced_test]
#[tokio::test]
async fn conflict_is_logged_inside_the_span() {
    let service = service_with(MockSchedulesRepository::default());
    let user_id = Uuid::new_v4();
    service
        .create_schedule(user_id, new_schedule(9, 11))
        .await
        .unwrap();

    let err = service
        .create_schedule(user_id, new_schedule(10, 12))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::TimeConflict { .. }));
    assert!(logs_contain("Time slot is taken"));
}

#[traced_test]
#[tokio::test]
async fn resolve_user_logs_provisioning() {
    let service = service_with(MockSchedulesRepository::default());

    let user = service
        .resolve_user(Identity {
            email: "carol@example.com".to_string(),
            username: None,
        })
        .await
        .unwrap();

    assert_eq!(user.username, "carol");
    assert!(logs_contain("schedules.service.resolve_user"));
    assert!(logs_contain("Provisioned user from upstream identity"));
}

#[traced_test]
#[tokio::test]
async fn repository_failures_become_database_errors() {
    let service = service_with(MockSchedulesRepository {
        fail: true,
        ..Default::default()
    });

    let err = service
        .list_schedules(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .await
        .unwrap_err();

    match err {
        DomainError::Database { message } => assert!(message.contains("connection reset")),
        other => panic!("expected database error, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_creates_cannot_both_take_a_slot() {
    let service = Arc::new(service_with(MockSchedulesRepository::default()));
    let user_id = Uuid::new_v4();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let svc = service.clone();
            tokio::spawn(async move { svc.create_schedule(user_id, new_schedule(9, 10)).await })
        })
        .collect();

    let mut ok = 0;
    for t in tasks {
        if t.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);

    let now = Utc::now();
    assert!(service
        .list_schedules(user_id, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .await
        .unwrap()
        .iter()
        .all(|s| s.created_at <= now));
}
