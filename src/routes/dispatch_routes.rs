use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use crate::controllers::dispatch_controller::DispatchController;
use crate::dto::common::ApiResponse;
use crate::dto::dispatch_dto::{
    InsuranceDispatchRequest, InsuranceDispatchResponse, RentalResponse, ShortTermRentalRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dispatch_router() -> Router<AppState> {
    Router::new()
        .route("/insurance", post(create_insurance_dispatch))
        .route("/rental", post(create_rental))
}

async fn create_insurance_dispatch(
    State(state): State<AppState>,
    Json(request): Json<InsuranceDispatchRequest>,
) -> Result<Json<ApiResponse<InsuranceDispatchResponse>>, AppError> {
    let controller = DispatchController::new(state.pool.clone());
    let response = controller.create_insurance_dispatch(request).await?;
    Ok(Json(response))
}

async fn create_rental(
    State(state): State<AppState>,
    Json(request): Json<ShortTermRentalRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = DispatchController::new(state.pool.clone());
    let response = controller.create_rental(request).await?;
    Ok(Json(response))
}
