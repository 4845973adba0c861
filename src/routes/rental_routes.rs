use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::rental_controller::RentalController;
use crate::dto::{
    common::ApiResponse,
    rental_dto::{FinishRentalRequest, FinishRentalResponse},
};
use crate::middleware::auth::Session;
use crate::models::rental::Rental;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/rent/start/:scooter_id", post(start_rental))
        .route("/rent/finish/:rental_id", post(finish_rental))
        .route("/my-rentals/", get(my_rentals))
}

fn controller(state: &AppState) -> RentalController {
    RentalController::new(state.pool.clone(), state.config.pricing_policy)
}

async fn start_rental(
    State(state): State<AppState>,
    session: Session,
    Path(scooter_id): Path<i64>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let response = controller(&state).start(&session, scooter_id).await?;
    Ok(Json(response))
}

async fn finish_rental(
    State(state): State<AppState>,
    session: Session,
    Path(rental_id): Path<i64>,
    Json(request): Json<FinishRentalRequest>,
) -> Result<Json<ApiResponse<FinishRentalResponse>>, AppError> {
    request.validate()?;
    let response = controller(&state).finish(&session, rental_id, request).await?;
    Ok(Json(response))
}

async fn my_rentals(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<Rental>>>, AppError> {
    let rentals = controller(&state).my_rentals(&session).await?;
    Ok(Json(ApiResponse::success(rentals)))
}
