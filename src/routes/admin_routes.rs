use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::admin_controller::AdminController;
use crate::dto::{
    admin_dto::{AssignTechnicianRequest, CreatePromoRequest, CreateUserRequest, UserCreatedResponse},
    catalog_dto::{CreateModelRequest, CreateStationRequest},
    common::ApiResponse,
    fleet_dto::{CreateScooterRequest, ScooterCreatedResponse},
};
use crate::middleware::auth::SuperuserSession;
use crate::models::{promo::Promo, scooter::ScooterModelWithSpecs, station::Station, technician::Technician};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Routes nested under `/admin`
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/stations", post(create_station))
        .route("/models", post(create_model))
        .route("/scooters", post(create_scooter))
        .route("/promos", post(create_promo))
        .route("/users", post(create_user))
        .route("/technicians", post(assign_technician))
        .route("/technicians/:user_id", delete(dismiss_technician))
}

async fn create_station(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<CreateStationRequest>,
) -> Result<Json<ApiResponse<Station>>, AppError> {
    request.validate()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.create_station(request).await?))
}

async fn create_model(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<CreateModelRequest>,
) -> Result<Json<ApiResponse<ScooterModelWithSpecs>>, AppError> {
    request.validate()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.create_model(request).await?))
}

async fn create_scooter(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<CreateScooterRequest>,
) -> Result<Json<ApiResponse<ScooterCreatedResponse>>, AppError> {
    request.validate()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.create_scooter(request).await?))
}

async fn create_promo(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<CreatePromoRequest>,
) -> Result<Json<ApiResponse<Promo>>, AppError> {
    request.validate()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.create_promo(request).await?))
}

async fn create_user(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserCreatedResponse>>, AppError> {
    request.validate()?;
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.create_user(request).await?))
}

async fn assign_technician(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Json(request): Json<AssignTechnicianRequest>,
) -> Result<Json<ApiResponse<Technician>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.assign_technician(request).await?))
}

async fn dismiss_technician(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(controller.dismiss_technician(user_id).await?))
}
