use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{rental::Rental, review::Review};
use crate::services::rental_rules::ReviewRejection;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_user_rental(&self, rental_id: i64, user_id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1 AND user_id = $2")
            .bind(rental_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    pub async fn exists_for_rental(&self, rental_id: i64) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM reviews WHERE rental_id = $1)")
            .bind(rental_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Store a review. Losing a race with another review of the same rental
    /// is reported as `REVIEW_EXISTS`.
    pub async fn create(&self, rental: &Rental, rating: i32, text: &str) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (rental_id, user_id, scooter_id, rating, text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(rental.id)
        .bind(rental.user_id)
        .bind(rental.scooter_id)
        .bind(rating)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "reviews_one_per_rental") {
                AppError::from(ReviewRejection::AlreadyReviewed)
            } else {
                AppError::Database(e)
            }
        })
    }
}
