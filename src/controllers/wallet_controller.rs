use sqlx::PgPool;
use tracing::info;

use crate::dto::{
    common::ApiResponse,
    wallet_dto::{BalanceResponse, ProfileResponse, TopUpRequest},
};
use crate::middleware::auth::Session;
use crate::models::wallet::Payment;
use crate::repositories::{rental_repository::RentalRepository, wallet_repository::WalletRepository};
use crate::utils::errors::{not_found_error, AppError};

pub struct WalletController {
    wallets: WalletRepository,
    rentals: RentalRepository,
}

impl WalletController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            wallets: WalletRepository::new(pool.clone()),
            rentals: RentalRepository::new(pool),
        }
    }

    pub async fn profile(&self, session: &Session) -> Result<ProfileResponse, AppError> {
        let profile = self
            .wallets
            .find_profile(session.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet profile not found".to_string()))?;
        let rentals = self.rentals.list_for_user(session.user_id).await?;
        let payments = self.wallets.payments_for_user(session.user_id).await?;

        Ok(ProfileResponse {
            user_id: profile.user_id,
            username: session.username.clone(),
            balance: profile.balance,
            rentals,
            payments,
        })
    }

    /// Amount is validated by the caller
    pub async fn top_up(&self, session: &Session, request: TopUpRequest) -> Result<ApiResponse<BalanceResponse>, AppError> {
        let balance = self
            .wallets
            .top_up(session.user_id, request.amount)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet profile not found".to_string()))?;

        info!("💰 {} topped up {} (balance {})", session.username, request.amount, balance);

        Ok(ApiResponse::success_with_message(
            BalanceResponse { balance },
            format!("Balance topped up by {}!", request.amount),
        )
        .redirect_to("/profile/"))
    }

    pub async fn receipt(&self, session: &Session, payment_id: i64) -> Result<Payment, AppError> {
        self.wallets
            .find_payment_for_user(payment_id, session.user_id)
            .await?
            .ok_or_else(|| not_found_error("Payment", payment_id))
    }
}
