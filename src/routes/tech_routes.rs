use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::tech_controller::TechController;
use crate::dto::{
    common::ApiResponse,
    fleet_dto::{StatusChangeRequest, StatusChangeResponse, TechDashboardResponse},
};
use crate::middleware::auth::TechnicianSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tech_router() -> Router<AppState> {
    Router::new()
        .route("/tech/", get(dashboard))
        .route("/tech/status/:scooter_id/", post(change_status))
}

async fn dashboard(
    State(state): State<AppState>,
    tech: TechnicianSession,
) -> Result<Json<ApiResponse<TechDashboardResponse>>, AppError> {
    let controller = TechController::new(state.pool.clone());
    let dashboard = controller.dashboard(&tech).await?;
    Ok(Json(ApiResponse::success(dashboard)))
}

async fn change_status(
    State(state): State<AppState>,
    tech: TechnicianSession,
    Path(scooter_id): Path<i64>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Json<ApiResponse<StatusChangeResponse>>, AppError> {
    let controller = TechController::new(state.pool.clone());
    let response = controller.change_status(&tech, scooter_id, request).await?;
    Ok(Json(response))
}
