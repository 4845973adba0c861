use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::catalog_controller::CatalogController;
use crate::dto::{catalog_dto::StationDetailResponse, common::ApiResponse};
use crate::models::{scooter::ScooterModelWithSpecs, station::StationSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations))
        .route("/models/", get(list_models))
        .route("/station/:id/", get(station_detail))
}

async fn list_stations(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<StationSummary>>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let stations = controller.list_stations().await?;
    Ok(Json(ApiResponse::success(stations)))
}

async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ScooterModelWithSpecs>>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let models = controller.list_models().await?;
    Ok(Json(ApiResponse::success(models)))
}

async fn station_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<StationDetailResponse>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let detail = controller.station_detail(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}
