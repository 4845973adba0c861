use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::wallet_controller::WalletController;
use crate::dto::{
    common::ApiResponse,
    wallet_dto::{BalanceResponse, ProfileResponse, TopUpRequest},
};
use crate::middleware::auth::Session;
use crate::models::wallet::Payment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route("/profile/", get(profile))
        .route("/top-up/", post(top_up))
        .route("/receipt/:payment_id", get(receipt))
}

async fn profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let controller = WalletController::new(state.pool.clone());
    let profile = controller.profile(&session).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn top_up(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<TopUpRequest>,
) -> Result<Json<ApiResponse<BalanceResponse>>, AppError> {
    request.validate()?;
    let controller = WalletController::new(state.pool.clone());
    let response = controller.top_up(&session, request).await?;
    Ok(Json(response))
}

async fn receipt(
    State(state): State<AppState>,
    session: Session,
    Path(payment_id): Path<i64>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = WalletController::new(state.pool.clone());
    let payment = controller.receipt(&session, payment_id).await?;
    Ok(Json(ApiResponse::success(payment)))
}
