use sqlx::PgPool;
use tracing::info;

use crate::dto::{common::ApiResponse, review_dto::ReviewRequest};
use crate::middleware::auth::Session;
use crate::models::review::Review;
use crate::repositories::review_repository::ReviewRepository;
use crate::services::rental_rules::check_review;
use crate::utils::errors::{not_found_error, AppError};

pub struct ReviewController {
    repository: ReviewRepository,
}

impl ReviewController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReviewRepository::new(pool),
        }
    }

    pub async fn leave(
        &self,
        session: &Session,
        rental_id: i64,
        request: ReviewRequest,
    ) -> Result<ApiResponse<Review>, AppError> {
        let rental = self
            .repository
            .find_user_rental(rental_id, session.user_id)
            .await?
            .ok_or_else(|| not_found_error("Rental", rental_id))?;

        let already_reviewed = self.repository.exists_for_rental(rental.id).await?;
        check_review(&rental, already_reviewed)?;

        let review = self.repository.create(&rental, request.rating, request.text.trim()).await?;

        info!("⭐ {} rated rental {} with {}", session.username, rental.id, review.rating);

        Ok(ApiResponse::success_with_message(review, "Thanks for your rating!").redirect_to("/my-rentals/"))
    }
}
