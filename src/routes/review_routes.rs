use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use validator::Validate;

use crate::controllers::review_controller::ReviewController;
use crate::dto::{common::ApiResponse, review_dto::ReviewRequest};
use crate::middleware::auth::Session;
use crate::models::review::Review;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_review_router() -> Router<AppState> {
    Router::new().route("/review/:rental_id/", post(leave_review))
}

async fn leave_review(
    State(state): State<AppState>,
    session: Session,
    Path(rental_id): Path<i64>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ApiResponse<Review>>, AppError> {
    request.validate()?;
    let controller = ReviewController::new(state.pool.clone());
    let response = controller.leave(&session, rental_id, request).await?;
    Ok(Json(response))
}
