use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use modkit::{created_json, no_content, Problem, ProblemResponse};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::rest::auth::{CurrentUser, MaybeUser};
use crate::api::rest::context::RequestCtx;
use crate::api::rest::dto::{
    CategoryDto, CreateCategoryReq, CreateScheduleReq, DateQuery, DeletedDto, GraphQuery,
    HighlightDatesDto, HighlightQuery, MeDto, ScheduleDto, TimeGraphDto, TimeOptionsDto,
    UpdateScheduleReq,
};
use crate::contract::model::{DateRange, NewCategory, NewSchedule, SchedulePatch};
use crate::domain::error::DomainError;
use crate::domain::highlight::month_range;
use crate::domain::service::Service;
use crate::domain::timegraph::{hour_options, minute_options};
use crate::domain::validation::parse_date;

type ApiResult<T> = Result<T, ProblemResponse>;

fn required_date(ctx: &RequestCtx, name: &str, raw: Option<&str>) -> ApiResult<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Err(ctx.problem(&DomainError::missing_parameter(name))),
        Some(raw) => parse_date(name, raw).map_err(|e| ctx.problem(&e)),
    }
}

fn failed(ctx: &RequestCtx, op: &str, e: DomainError) -> ProblemResponse {
    // Database failures are logged by the problem mapper.
    if !matches!(e, DomainError::Database { .. }) {
        warn!(path = %ctx.instance, "{op} rejected: {e}");
    }
    ctx.problem(&e)
}

/// Login state of the caller
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "identity",
    responses(
        (status = 200, description = "Caller login state", body = MeDto),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_me(MaybeUser(user): MaybeUser) -> Json<MeDto> {
    Json(MeDto {
        logged_in: user.is_some(),
        user: user.map(Into::into),
    })
}

/// Hour and minute choices for time pickers
#[utoipa::path(
    get,
    path = "/api/time-options",
    tag = "schedules",
    responses((status = 200, description = "Picker options", body = TimeOptionsDto))
)]
pub async fn time_options() -> Json<TimeOptionsDto> {
    Json(TimeOptionsDto {
        hours: hour_options(),
        minutes: minute_options(),
    })
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<CategoryDto>),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_categories(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
) -> ApiResult<Json<Vec<CategoryDto>>> {
    let categories = svc
        .list_categories()
        .await
        .map_err(|e| failed(&ctx, "list_categories", e))?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CreateCategoryReq,
    responses(
        (status = 201, description = "Created category", body = CategoryDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_category(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateCategoryReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body.map_err(|rej| ctx.rejection(rej.body_text()))?;
    debug!(user_id = %user.id, "Creating category {:?}", req.name);

    let new_category = NewCategory::try_from(req).map_err(|e| failed(&ctx, "create_category", e))?;
    let category = svc
        .create_category(new_category)
        .await
        .map_err(|e| failed(&ctx, "create_category", e))?;
    Ok(created_json(CategoryDto::from(category)))
}

/// Schedules of one day
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "schedules",
    params(DateQuery),
    responses(
        (status = 200, description = "Schedules ordered by start time", body = Vec<ScheduleDto>),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_schedules(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ScheduleDto>>> {
    let Query(query) = query.map_err(|rej| ctx.rejection(rej.body_text()))?;
    let date = required_date(&ctx, "date", query.date.as_deref())?;

    let schedules = svc
        .list_schedules(user.id, date)
        .await
        .map_err(|e| failed(&ctx, "list_schedules", e))?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// Clear one day
#[utoipa::path(
    delete,
    path = "/api/schedules",
    tag = "schedules",
    params(DateQuery),
    responses(
        (status = 200, description = "Number of deleted schedules", body = DeletedDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_schedules_on_date(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<DeletedDto>> {
    let Query(query) = query.map_err(|rej| ctx.rejection(rej.body_text()))?;
    let date = required_date(&ctx, "date", query.date.as_deref())?;

    let deleted = svc
        .delete_schedules_on(user.id, date)
        .await
        .map_err(|e| failed(&ctx, "delete_schedules_on", e))?;
    Ok(Json(DeletedDto { deleted }))
}

/// Days with at least one schedule
#[utoipa::path(
    get,
    path = "/api/schedules/highlights",
    tag = "schedules",
    params(HighlightQuery),
    responses(
        (status = 200, description = "Ascending distinct dates", body = HighlightDatesDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn highlight_dates(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    query: Result<Query<HighlightQuery>, QueryRejection>,
) -> ApiResult<Json<HighlightDatesDto>> {
    let Query(query) = query.map_err(|rej| ctx.rejection(rej.body_text()))?;

    let range = match (&query.start, &query.end, &query.month) {
        (None, None, Some(month)) => month_range(month).map_err(|e| ctx.problem(&e))?,
        _ => DateRange {
            start: required_date(&ctx, "start", query.start.as_deref())?,
            end: required_date(&ctx, "end", query.end.as_deref())?,
        },
    };

    let dates = svc
        .highlight_dates(user.id, range)
        .await
        .map_err(|e| failed(&ctx, "highlight_dates", e))?;
    Ok(Json(HighlightDatesDto {
        highlight_dates: dates,
    }))
}

/// Pie-chart geometry of one day
#[utoipa::path(
    get,
    path = "/api/schedules/graph",
    tag = "schedules",
    params(GraphQuery),
    responses(
        (status = 200, description = "Segments and hour ticks", body = TimeGraphDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn time_graph(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> ApiResult<Json<TimeGraphDto>> {
    let Query(query) = query.map_err(|rej| ctx.rejection(rej.body_text()))?;
    let date = required_date(&ctx, "date", query.date.as_deref())?;

    let graph = svc
        .time_graph(user.id, date, query.radius)
        .await
        .map_err(|e| failed(&ctx, "time_graph", e))?;
    Ok(Json(graph.into()))
}

/// Get one schedule
#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = Uuid, Path, description = "Schedule id")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleDto),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_schedule(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ScheduleDto>> {
    let Path(id) = id.map_err(|rej| ctx.rejection(rej.body_text()))?;

    let schedule = svc
        .get_schedule(user.id, id)
        .await
        .map_err(|e| failed(&ctx, "get_schedule", e))?;
    Ok(Json(schedule.into()))
}

/// Create a schedule
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "schedules",
    request_body = CreateScheduleReq,
    responses(
        (status = 201, description = "Created schedule", body = ScheduleDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Overlaps an existing schedule", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_schedule(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateScheduleReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = body.map_err(|rej| ctx.rejection(rej.body_text()))?;

    let new_schedule = NewSchedule::try_from(req).map_err(|e| failed(&ctx, "create_schedule", e))?;
    let schedule = svc
        .create_schedule(user.id, new_schedule)
        .await
        .map_err(|e| failed(&ctx, "create_schedule", e))?;
    Ok(created_json(ScheduleDto::from(schedule)))
}

/// Update a schedule
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = Uuid, Path, description = "Schedule id")),
    request_body = UpdateScheduleReq,
    responses(
        (status = 200, description = "Updated schedule", body = ScheduleDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Overlaps an existing schedule", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_schedule(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateScheduleReq>, JsonRejection>,
) -> ApiResult<Json<ScheduleDto>> {
    let Path(id) = id.map_err(|rej| ctx.rejection(rej.body_text()))?;
    let Json(req) = body.map_err(|rej| ctx.rejection(rej.body_text()))?;

    let patch = SchedulePatch::try_from(req).map_err(|e| failed(&ctx, "update_schedule", e))?;
    let schedule = svc
        .update_schedule(user.id, id, patch)
        .await
        .map_err(|e| failed(&ctx, "update_schedule", e))?;
    Ok(Json(schedule.into()))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = Uuid, Path, description = "Schedule id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_schedule(
    Extension(svc): Extension<Arc<Service>>,
    ctx: RequestCtx,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id.map_err(|rej| ctx.rejection(rej.body_text()))?;

    svc.delete_schedule(user.id, id)
        .await
        .map_err(|e| failed(&ctx, "delete_schedule", e))?;
    Ok(no_content())
}
