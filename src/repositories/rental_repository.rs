use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::rental::Rental;
use crate::services::rental_rules::StartRejection;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A user's rentals, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE user_id = $1 ORDER BY start_time DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }
}

pub async fn has_open_rental(conn: &mut PgConnection, user_id: Uuid) -> Result<bool, AppError> {
    let result: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM rentals WHERE user_id = $1 AND end_time IS NULL)")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

    Ok(result.0)
}

/// Open a rental. A concurrent start for the same user trips the
/// one-open-rental index and is reported as `RENTAL_ALREADY_ACTIVE`.
pub async fn open_rental(
    conn: &mut PgConnection,
    user_id: Uuid,
    scooter_id: i64,
    start_station_id: Option<i64>,
    start_time: DateTime<Utc>,
) -> Result<Rental, AppError> {
    sqlx::query_as::<_, Rental>(
        r#"
        INSERT INTO rentals (user_id, scooter_id, start_station_id, start_time)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(scooter_id)
    .bind(start_station_id)
    .bind(start_time)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "rentals_one_open_per_user") {
            AppError::from(StartRejection::RentalAlreadyActive)
        } else {
            AppError::Database(e)
        }
    })
}

/// Load one of the user's rentals and lock it for settlement
pub async fn lock_user_rental(
    conn: &mut PgConnection,
    rental_id: i64,
    user_id: Uuid,
) -> Result<Option<Rental>, AppError> {
    let rental = sqlx::query_as::<_, Rental>(
        "SELECT * FROM rentals WHERE id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(rental_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(rental)
}

/// Settlement written when a rental closes
#[derive(Debug, Clone)]
pub struct RentalClosing {
    pub end_station_id: i64,
    pub end_time: DateTime<Utc>,
    pub total_cost: Decimal,
    pub promo_id: Option<i64>,
    pub is_paid: bool,
}

pub async fn close_rental(conn: &mut PgConnection, rental_id: i64, closing: &RentalClosing) -> Result<Rental, AppError> {
    let rental = sqlx::query_as::<_, Rental>(
        r#"
        UPDATE rentals
        SET end_station_id = $2,
            end_time = $3,
            total_cost = $4,
            promo_id = $5,
            is_paid = $6
        WHERE id = $1 AND end_time IS NULL
        RETURNING *
        "#,
    )
    .bind(rental_id)
    .bind(closing.end_station_id)
    .bind(closing.end_time)
    .bind(closing.total_cost)
    .bind(closing.promo_id)
    .bind(closing.is_paid)
    .fetch_one(&mut *conn)
    .await?;

    Ok(rental)
}
