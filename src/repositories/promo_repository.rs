use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::models::promo::Promo;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct PromoRepository {
    pool: PgPool,
}

impl PromoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        code: &str,
        discount_percent: i32,
        is_active: bool,
        expiry_date: Option<NaiveDate>,
    ) -> Result<Promo, AppError> {
        sqlx::query_as::<_, Promo>(
            r#"
            INSERT INTO promos (code, discount_percent, is_active, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(discount_percent)
        .bind(is_active)
        .bind(expiry_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "promos_code_ci") {
                AppError::Conflict(format!("Promo code '{}' already exists", code))
            } else {
                AppError::Database(e)
            }
        })
    }
}

/// Find a promo by code, ignoring case. Inactive promos are returned too.
pub async fn find_promo_by_code(conn: &mut PgConnection, code: &str) -> Result<Option<Promo>, AppError> {
    let promo = sqlx::query_as::<_, Promo>("SELECT * FROM promos WHERE LOWER(code) = LOWER($1)")
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(promo)
}
