use sea_orm_migration::prelude::*;

mod m20240101_000001_create_tables;
mod m20240101_000002_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_tables::Migration),
            Box::new(m20240101_000002_seed_categories::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Categories {
    Table,
    Id,
    Name,
    DefaultTitle,
    DefaultStart,
    DefaultEnd,
    DefaultNote,
    DefaultColor,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Schedules {
    Table,
    Id,
    UserId,
    CategoryId,
    Title,
    Date,
    StartTime,
    EndTime,
    Color,
    Note,
    CreatedAt,
    UpdatedAt,
}
