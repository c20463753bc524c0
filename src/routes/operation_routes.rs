use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::operation_controller::OperationController;
use crate::dto::common::ApiResponse;
use crate::dto::operation_dto::{
    CompleteOperationRequest, CreateOperationRequest, OperationFilters, OperationResponse,
    UpdateOperationRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_operation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_operation))
        .route("/", get(list_operations))
        .route("/:id", get(get_operation))
        .route("/:id", put(update_operation))
        .route("/:id/complete", post(complete_operation))
        .route("/:id/cancel", post(cancel_operation))
}

async fn create_operation(
    State(state): State<AppState>,
    Json(request): Json<CreateOperationRequest>,
) -> Result<Json<ApiResponse<OperationResponse>>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OperationResponse>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_operations(
    State(state): State<AppState>,
    Query(filters): Query<OperationFilters>,
) -> Result<Json<Vec<OperationResponse>>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn update_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOperationRequest>,
) -> Result<Json<ApiResponse<OperationResponse>>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn complete_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteOperationRequest>,
) -> Result<Json<ApiResponse<OperationResponse>>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.complete(id, request).await?;
    Ok(Json(response))
}

async fn cancel_operation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OperationResponse>>, AppError> {
    let controller = OperationController::new(state.pool.clone());
    let response = controller.cancel(id).await?;
    Ok(Json(response))
}
