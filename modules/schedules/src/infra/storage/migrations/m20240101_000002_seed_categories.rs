use chrono::{NaiveTime, Utc};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

struct Starter {
    name: &'static str,
    title: &'static str,
    start: (u32, u32),
    end: (u32, u32),
    color: &'static str,
}

const STARTERS: &[Starter] = &[
    Starter { name: "Sleep", title: "Sleep", start: (0, 0), end: (7, 0), color: "#6A5ACD" },
    Starter { name: "Work", title: "Work", start: (9, 0), end: (18, 0), color: "#87CEFA" },
    Starter { name: "Meal", title: "Lunch", start: (12, 0), end: (13, 0), color: "#FFA07A" },
    Starter { name: "Exercise", title: "Workout", start: (18, 0), end: (19, 0), color: "#90EE90" },
    Starter { name: "Study", title: "Study", start: (20, 0), end: (22, 0), color: "#F0E68C" },
];

fn time(hm: (u32, u32)) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hm.0, hm.1, 0)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now();
        let mut insert = Query::insert();
        insert.into_table(Categories::Table).columns([
            Categories::Id,
            Categories::Name,
            Categories::DefaultTitle,
            Categories::DefaultStart,
            Categories::DefaultEnd,
            Categories::DefaultColor,
            Categories::CreatedAt,
            Categories::UpdatedAt,
        ]);
        for s in STARTERS {
            insert
                .values([
                    Uuid::new_v4().into(),
                    s.name.into(),
                    s.title.into(),
                    time(s.start).into(),
                    time(s.end).into(),
                    s.color.into(),
                    now.into(),
                    now.into(),
                ])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        let stmt = manager.get_database_backend().build(&insert);
        manager.get_connection().execute(stmt).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<&str> = STARTERS.iter().map(|s| s.name).collect();
        let delete = Query::delete()
            .from_table(Categories::Table)
            .and_where(Expr::col(Categories::Name).is_in(names))
            .to_owned();
        let stmt = manager.get_database_backend().build(&delete);
        manager.get_connection().execute(stmt).await?;
        Ok(())
    }
}
