use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::wallet::{balance_after_top_up, Payment, Profile};
use crate::utils::errors::{validation_error, AppError};

pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Credit the wallet; `None` when the user has no profile.
    /// Refuses a credit that would overflow the balance column.
    pub async fn top_up(&self, user_id: Uuid, amount: Decimal) -> Result<Option<Decimal>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(balance) = lock_balance(&mut tx, user_id).await? else {
            return Ok(None);
        };
        if balance_after_top_up(balance, amount).is_none() {
            return Err(validation_error("amount", "Top-up would exceed the maximum wallet balance"));
        }
        let balance = adjust_balance(&mut tx, user_id, amount).await?;

        tx.commit().await?;

        Ok(balance)
    }

    /// A user's payments, newest first
    pub async fn payments_for_user(&self, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE user_id = $1 ORDER BY paid_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn find_payment_for_user(&self, payment_id: i64, user_id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1 AND user_id = $2")
            .bind(payment_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }
}

pub async fn insert_profile(conn: &mut PgConnection, user_id: Uuid, balance: Decimal) -> Result<Profile, AppError> {
    let profile = sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (user_id, balance) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(balance)
    .fetch_one(&mut *conn)
    .await?;

    Ok(profile)
}

/// Read the balance and lock the profile row
pub async fn lock_balance(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<Decimal>, AppError> {
    let balance: Option<(Decimal,)> =
        sqlx::query_as("SELECT balance FROM profiles WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(balance.map(|(b,)| b))
}

/// Add `delta` (negative to debit) and return the new balance.
/// No floor is applied: a debit may leave the balance negative.
pub async fn adjust_balance(conn: &mut PgConnection, user_id: Uuid, delta: Decimal) -> Result<Option<Decimal>, AppError> {
    let balance: Option<(Decimal,)> = sqlx::query_as(
        "UPDATE profiles SET balance = balance + $2 WHERE user_id = $1 RETURNING balance",
    )
    .bind(user_id)
    .bind(delta)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(balance.map(|(b,)| b))
}

pub async fn insert_payment(
    conn: &mut PgConnection,
    user_id: Uuid,
    rental_id: i64,
    amount: Decimal,
    paid_at: DateTime<Utc>,
    method: &str,
) -> Result<Payment, AppError> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (user_id, rental_id, amount, paid_at, method)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(rental_id)
    .bind(amount)
    .bind(paid_at)
    .bind(method)
    .fetch_one(&mut *conn)
    .await?;

    Ok(payment)
}
