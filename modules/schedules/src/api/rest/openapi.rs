use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI document of the schedules REST API.
#[derive(OpenApi)]
#[openapi(
    info(title = "Dayplan API", description = "Personal daily schedules"),
    paths(
        handlers::get_me,
        handlers::time_options,
        handlers::list_categories,
        handlers::create_category,
        handlers::list_schedules,
        handlers::delete_schedules_on_date,
        handlers::highlight_dates,
        handlers::time_graph,
        handlers::get_schedule,
        handlers::create_schedule,
        handlers::update_schedule,
        handlers::delete_schedule,
    ),
    components(schemas(
        dto::UserDto,
        dto::MeDto,
        dto::CategoryDto,
        dto::CreateCategoryReq,
        dto::ScheduleDto,
        dto::CreateScheduleReq,
        dto::UpdateScheduleReq,
        dto::HighlightDatesDto,
        dto::DeletedDto,
        dto::GraphSegmentDto,
        dto::HourTickDto,
        dto::TimeGraphDto,
        dto::TimeOptionsDto,
        modkit::Problem,
        modkit::ValidationError,
    )),
    tags(
        (name = "identity", description = "Caller identity"),
        (name = "categories", description = "Schedule templates"),
        (name = "schedules", description = "Per-day schedules and their pie-chart geometry"),
    )
)]
pub struct ApiDoc;
