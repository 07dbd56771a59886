//! Service and local client against a real SQLite database.
//!
//! Each test runs on a fresh in-memory database with migrations applied,
//! using the SeaORM adapters behind the domain ports.

mod common;

use std::sync::Arc;

use schedules::config::SchedulesConfig;
use schedules::contract::client::SchedulesApi;
use schedules::contract::error::SchedulesError;
use schedules::contract::model::{
    DateRange, Identity, NewCategory, NewSchedule, SchedulePatch, SegmentKind, User,
};
use schedules::domain::error::DomainError;
use schedules::domain::service::Service;
use schedules::gateways::local::SchedulesLocalClient;
use uuid::Uuid;

use common::{build_service, create_test_db, create_test_service, date, time, ALICE, BOB};

async fn user(svc: &Service, email: &str) -> User {
    svc.resolve_user(Identity {
        email: email.to_string(),
        username: None,
    })
    .await
    .expect("user should be provisioned")
}

fn slot(d: chrono::NaiveDate, start: (u32, u32), end: (u32, u32), title: &str) -> NewSchedule {
    NewSchedule {
        category_id: None,
        title: title.to_string(),
        date: d,
        start_time: Some(time(start.0, start.1)),
        end_time: Some(time(end.0, end.1)),
        color: None,
        note: None,
    }
}

#[tokio::test]
async fn starter_categories_are_seeded_and_sorted() {
    let svc = create_test_service().await;
    let names: Vec<String> = svc
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Exercise", "Meal", "Sleep", "Study", "Work"]);
}

#[tokio::test]
async fn users_are_provisioned_once() {
    let svc = create_test_service().await;
    let first = user(&svc, ALICE).await;
    assert_eq!(first.username, "alice");

    let again = svc
        .resolve_user(Identity {
            email: ALICE.to_string(),
            username: Some("someone-else".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(again.username, "alice");
}

#[tokio::test]
async fn asserted_username_is_used_for_new_users() {
    let svc = create_test_service().await;
    let u = svc
        .resolve_user(Identity {
            email: BOB.to_string(),
            username: Some("Bobby".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(u.username, "Bobby");
    assert_eq!(u.email, BOB);
}

#[tokio::test]
async fn unknown_users_are_rejected_without_auto_provision() {
    let mut config = SchedulesConfig::default();
    config.identity.auto_provision = false;
    let svc = build_service(create_test_db().await, &config);

    let err = svc
        .resolve_user(Identity {
            email: ALICE.to_string(),
            username: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized { .. }));
}

#[tokio::test]
async fn schedules_are_listed_by_start_time() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let day = date(2024, 5, 1);

    svc.create_schedule(alice.id, slot(day, (13, 0), (14, 0), "Lunch"))
        .await
        .unwrap();
    svc.create_schedule(alice.id, slot(day, (9, 0), (10, 0), "Standup"))
        .await
        .unwrap();
    svc.create_schedule(alice.id, slot(date(2024, 5, 2), (9, 0), (10, 0), "Other day"))
        .await
        .unwrap();

    let titles: Vec<String> = svc
        .list_schedules(alice.id, day)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Standup", "Lunch"]);
}

#[tokio::test]
async fn overlapping_slots_are_rejected_touching_ones_are_not() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let day = date(2024, 5, 1);

    let first = svc
        .create_schedule(alice.id, slot(day, (9, 0), (10, 0), "Standup"))
        .await
        .unwrap();

    let err = svc
        .create_schedule(alice.id, slot(day, (9, 30), (10, 30), "Review"))
        .await
        .unwrap_err();
    match err {
        DomainError::TimeConflict { conflicting_id, .. } => assert_eq!(conflicting_id, first.id),
        other => panic!("expected conflict, got {other:?}"),
    }

    svc.create_schedule(alice.id, slot(day, (10, 0), (11, 0), "Review"))
        .await
        .expect("touching slot is allowed");
    assert_eq!(svc.list_schedules(alice.id, day).await.unwrap().len(), 2);
}

#[tokio::test]
async fn overlap_is_scoped_to_user_and_date() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let bob = user(&svc, BOB).await;

    svc.create_schedule(alice.id, slot(date(2024, 5, 1), (9, 0), (10, 0), "A"))
        .await
        .unwrap();
    svc.create_schedule(bob.id, slot(date(2024, 5, 1), (9, 0), (10, 0), "B"))
        .await
        .expect("other user's day is independent");
    svc.create_schedule(alice.id, slot(date(2024, 5, 2), (9, 0), (10, 0), "C"))
        .await
        .expect("other date is independent");
}

#[tokio::test]
async fn invalid_slots_fail_validation() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let day = date(2024, 5, 1);

    let zero = svc
        .create_schedule(alice.id, slot(day, (9, 0), (9, 0), "Zero"))
        .await
        .unwrap_err();
    assert!(matches!(zero, DomainError::Validation { ref field, .. } if field == "end_time"));

    let untitled = svc
        .create_schedule(alice.id, slot(day, (9, 0), (10, 0), "  "))
        .await
        .unwrap_err();
    assert!(matches!(untitled, DomainError::Validation { ref field, .. } if field == "title"));

    let mut no_times = slot(day, (9, 0), (10, 0), "No times");
    no_times.start_time = None;
    let err = svc.create_schedule(alice.id, no_times).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "start_time"));

    let mut bad_color = slot(day, (9, 0), (10, 0), "Colored");
    bad_color.color = Some("red".to_string());
    let err = svc.create_schedule(alice.id, bad_color).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "color"));
}

#[tokio::test]
async fn category_defaults_fill_the_schedule() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let sleep = svc
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Sleep")
        .unwrap();

    let created = svc
        .create_schedule(
            alice.id,
            NewSchedule {
                category_id: Some(sleep.id),
                title: String::new(),
                date: date(2024, 5, 1),
                start_time: None,
                end_time: None,
                color: None,
                note: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(created.title, sleep.default_title);
    assert_eq!(Some(created.start_time), sleep.default_start);
    assert_eq!(Some(created.end_time), sleep.default_end);
    assert_eq!(created.color.as_deref(), Some(sleep.default_color.as_str()));
    assert_eq!(created.category_id, Some(sleep.id));
}

#[tokio::test]
async fn category_without_default_times_still_needs_times() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let reading = svc
        .create_category(NewCategory {
            name: "Reading".into(),
            default_title: "Read a book".into(),
            default_start: None,
            default_end: None,
            default_note: Some("  ".into()),
            default_color: None,
        })
        .await
        .unwrap();
    assert_eq!(reading.default_color, "#87CEFA");
    assert!(reading.default_note.is_none());

    let mut new = slot(date(2024, 5, 1), (20, 0), (21, 0), "");
    new.category_id = Some(reading.id);
    new.end_time = None;
    let err = svc.create_schedule(alice.id, new).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "end_time"));
}

#[tokio::test]
async fn unknown_category_is_reported() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let missing = Uuid::new_v4();

    let mut new = slot(date(2024, 5, 1), (9, 0), (10, 0), "x");
    new.category_id = Some(missing);
    let err = svc.create_schedule(alice.id, new).await.unwrap_err();
    assert!(matches!(err, DomainError::CategoryNotFound { id } if id == missing));
}

#[tokio::test]
async fn update_excludes_itself_and_checks_target_date() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let may1 = date(2024, 5, 1);
    let may2 = date(2024, 5, 2);

    let standup = svc
        .create_schedule(alice.id, slot(may1, (9, 0), (10, 0), "Standup"))
        .await
        .unwrap();
    svc.create_schedule(alice.id, slot(may2, (9, 0), (10, 0), "Busy"))
        .await
        .unwrap();

    // Growing within its own slot is fine.
    let grown = svc
        .update_schedule(
            alice.id,
            standup.id,
            SchedulePatch {
                end_time: Some(time(10, 30)),
                note: Some("bring notes".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(grown.end_time, time(10, 30));
    assert_eq!(grown.note.as_deref(), Some("bring notes"));
    assert!(grown.updated_at >= standup.updated_at);

    // Moving onto a taken slot of another day is not.
    let err = svc
        .update_schedule(
            alice.id,
            standup.id,
            SchedulePatch {
                date: Some(may2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TimeConflict { date, .. } if date == may2));

    let moved = svc
        .update_schedule(
            alice.id,
            standup.id,
            SchedulePatch {
                date: Some(may2),
                start_time: Some(time(11, 0)),
                end_time: Some(time(12, 0)),
                note: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.date, may2);
    assert!(moved.note.is_none());
    assert!(svc.list_schedules(alice.id, may1).await.unwrap().is_empty());
}

#[tokio::test]
async fn schedules_of_other_users_are_invisible() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let bob = user(&svc, BOB).await;
    let s = svc
        .create_schedule(alice.id, slot(date(2024, 5, 1), (9, 0), (10, 0), "Private"))
        .await
        .unwrap();

    assert!(matches!(
        svc.get_schedule(bob.id, s.id).await,
        Err(DomainError::ScheduleNotFound { .. })
    ));
    assert!(matches!(
        svc.update_schedule(bob.id, s.id, SchedulePatch::default()).await,
        Err(DomainError::ScheduleNotFound { .. })
    ));
    assert!(matches!(
        svc.delete_schedule(bob.id, s.id).await,
        Err(DomainError::ScheduleNotFound { .. })
    ));
    assert_eq!(svc.get_schedule(alice.id, s.id).await.unwrap().title, "Private");
}

#[tokio::test]
async fn delete_single_and_whole_day() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let day = date(2024, 5, 1);

    let a = svc
        .create_schedule(alice.id, slot(day, (8, 0), (9, 0), "A"))
        .await
        .unwrap();
    svc.create_schedule(alice.id, slot(day, (9, 0), (10, 0), "B"))
        .await
        .unwrap();
    svc.create_schedule(alice.id, slot(day, (10, 0), (11, 0), "C"))
        .await
        .unwrap();

    svc.delete_schedule(alice.id, a.id).await.unwrap();
    assert!(matches!(
        svc.delete_schedule(alice.id, a.id).await,
        Err(DomainError::ScheduleNotFound { .. })
    ));

    assert_eq!(svc.delete_schedules_on(alice.id, day).await.unwrap(), 2);
    assert_eq!(svc.delete_schedules_on(alice.id, day).await.unwrap(), 0);
}

#[tokio::test]
async fn highlight_dates_are_distinct_and_bounded() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;

    for (d, start) in [
        (date(2024, 3, 9), 8),
        (date(2024, 3, 9), 10),
        (date(2024, 3, 2), 8),
        (date(2024, 4, 1), 8),
    ] {
        svc.create_schedule(alice.id, slot(d, (start, 0), (start + 1, 0), "x"))
            .await
            .unwrap();
    }

    let march = DateRange {
        start: date(2024, 3, 1),
        end: date(2024, 3, 31),
    };
    assert_eq!(
        svc.highlight_dates(alice.id, march).await.unwrap(),
        vec![date(2024, 3, 2), date(2024, 3, 9)]
    );

    let reversed = DateRange {
        start: date(2024, 3, 31),
        end: date(2024, 3, 1),
    };
    assert!(matches!(
        svc.highlight_dates(alice.id, reversed).await,
        Err(DomainError::InvalidRange { .. })
    ));
}

#[tokio::test]
async fn time_graph_covers_the_day() {
    let svc = create_test_service().await;
    let alice = user(&svc, ALICE).await;
    let day = date(2024, 5, 1);

    let empty = svc.time_graph(alice.id, day, None).await.unwrap();
    assert!(empty.segments.is_empty());
    assert_eq!(empty.ticks.len(), 24);

    svc.create_schedule(alice.id, slot(day, (6, 0), (9, 0), "Morning"))
        .await
        .unwrap();
    let graph = svc.time_graph(alice.id, day, Some(100.0)).await.unwrap();
    let kinds: Vec<SegmentKind> = graph.segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SegmentKind::Idle, SegmentKind::Schedule, SegmentKind::Idle]
    );
    assert_eq!(graph.segments[1].color, "#87CEFA");
    assert!((graph.ticks[6].x - 100.0).abs() < 1e-9);

    assert!(matches!(
        svc.time_graph(alice.id, day, Some(0.0)).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn local_client_maps_errors_to_contract() {
    let svc = create_test_service().await;
    let client: Arc<dyn SchedulesApi> = Arc::new(SchedulesLocalClient::new(svc));

    let alice = client
        .resolve_user(Identity {
            email: ALICE.to_string(),
            username: None,
        })
        .await
        .unwrap();
    let day = date(2024, 5, 1);
    client
        .create_schedule(alice.id, slot(day, (9, 0), (10, 0), "Standup"))
        .await
        .unwrap();

    let err = client
        .create_schedule(alice.id, slot(day, (9, 0), (9, 30), "Clash"))
        .await
        .unwrap_err();
    assert_eq!(err, SchedulesError::Conflict { date: day });

    let missing = Uuid::new_v4();
    assert_eq!(
        client.get_schedule(alice.id, missing).await.unwrap_err(),
        SchedulesError::NotFound { id: missing }
    );
    assert_eq!(client.list_schedules(alice.id, day).await.unwrap().len(), 1);
}
