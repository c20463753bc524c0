use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::cache::CalendarCache;
use crate::controllers::calendar_controller::CalendarController;
use crate::dto::calendar_dto::{
    CalendarRangeQuery, DateIndex, DayDetail, DayDetailQuery, MonthGridQuery, MonthGridResponse,
    WeekGridQuery, WeekGridResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_calendar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar_range))
        .route("/day", get(day_detail))
        .route("/month", get(month_grid))
        .route("/week", get(week_grid))
}

fn controller(state: &AppState) -> CalendarController {
    CalendarController::new(
        state.pool.clone(),
        CalendarCache::new(state.redis.clone()),
    )
}

async fn calendar_range(
    State(state): State<AppState>,
    Query(query): Query<CalendarRangeQuery>,
) -> Result<Json<DateIndex>, AppError> {
    let response = controller(&state).range(query).await?;
    Ok(Json(response))
}

async fn day_detail(
    State(state): State<AppState>,
    Query(query): Query<DayDetailQuery>,
) -> Result<Json<DayDetail>, AppError> {
    let response = controller(&state).day_detail(query).await?;
    Ok(Json(response))
}

async fn month_grid(
    State(state): State<AppState>,
    Query(query): Query<MonthGridQuery>,
) -> Result<Json<MonthGridResponse>, AppError> {
    let response = controller(&state).month_grid(query).await?;
    Ok(Json(response))
}

async fn week_grid(
    State(state): State<AppState>,
    Query(query): Query<WeekGridQuery>,
) -> Result<Json<WeekGridResponse>, AppError> {
    let response = controller(&state).week_grid(query).await?;
    Ok(Json(response))
}
