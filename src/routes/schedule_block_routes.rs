use axum::{
    extract::{Path, Query, State},
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::dispatch_controller::DispatchController;
use crate::dto::common::ApiResponse;
use crate::dto::schedule_block_dto::{CreateScheduleBlockRequest, ScheduleBlockResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_schedule_block_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_schedule_block))
        .route("/:id", delete(delete_schedule_block))
}

#[derive(Debug, Deserialize)]
struct CompanyQuery {
    company_id: Uuid,
}

async fn create_schedule_block(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleBlockRequest>,
) -> Result<Json<ApiResponse<ScheduleBlockResponse>>, AppError> {
    let controller = DispatchController::new(state.pool.clone());
    let response = controller.create_schedule_block(request).await?;
    Ok(Json(response))
}

async fn delete_schedule_block(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DispatchController::new(state.pool.clone());
    controller.delete_schedule_block(id, query.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Bloqueo de agenda liberado exitosamente"
    })))
}
