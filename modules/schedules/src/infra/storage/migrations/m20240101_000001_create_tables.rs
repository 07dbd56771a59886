use sea_orm_migration::prelude::*;

use super::{Categories, Schedules, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Categories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Categories::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Categories::DefaultTitle)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Categories::DefaultStart).time().null())
                    .col(ColumnDef::new(Categories::DefaultEnd).time().null())
                    .col(ColumnDef::new(Categories::DefaultNote).text().null())
                    .col(
                        ColumnDef::new(Categories::DefaultColor)
                            .string_len(7)
                            .not_null()
                            .default("#87CEFA"),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schedules::UserId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::CategoryId).uuid().null())
                    .col(ColumnDef::new(Schedules::Title).string_len(50).not_null())
                    .col(ColumnDef::new(Schedules::Date).date().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).time().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).time().not_null())
                    .col(ColumnDef::new(Schedules::Color).string_len(7).null())
                    .col(ColumnDef::new(Schedules::Note).text().null())
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_user")
                            .from(Schedules::Table, Schedules::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_category")
                            .from(Schedules::Table, Schedules::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_user_date")
                    .table(Schedules::Table)
                    .col(Schedules::UserId)
                    .col(Schedules::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
