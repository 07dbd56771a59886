//! Shared fixtures: a fresh in-memory SQLite database per test with
//! migrations applied, and the service/router built on top of it.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use modkit_db::{ConnectOpts, DbHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use schedules::api::rest::register_routes;
use schedules::config::SchedulesConfig;
use schedules::domain::service::{Service, ServiceConfig};
use schedules::infra::storage::{
    Migrator, SeaOrmCategoriesRepository, SeaOrmSchedulesRepository, SeaOrmUsersRepository,
};

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";

pub async fn create_test_db() -> DatabaseConnection {
    let handle = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("Failed to connect to test database");
    let db = handle.sea();
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn build_service(db: DatabaseConnection, config: &SchedulesConfig) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(SeaOrmUsersRepository::new(db.clone())),
        Arc::new(SeaOrmCategoriesRepository::new(db.clone())),
        Arc::new(SeaOrmSchedulesRepository::new(db)),
        ServiceConfig::from(config),
    ))
}

pub async fn create_test_service() -> Arc<Service> {
    build_service(create_test_db().await, &SchedulesConfig::default())
}

pub async fn create_test_router_with(config: SchedulesConfig) -> Router {
    let service = build_service(create_test_db().await, &config);
    register_routes(Router::new(), service, config.identity)
}

pub async fn create_test_router() -> Router {
    create_test_router_with(SchedulesConfig::default()).await
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
