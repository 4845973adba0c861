//! Promo code model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Promo - maps to the `promos` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Promo {
    pub id: i64,
    pub code: String,
    pub discount_percent: i32,
    pub is_active: bool,
    pub expiry_date: Option<NaiveDate>,
}

impl Promo {
    /// A promo is still valid on its expiry date.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(expiry) if expiry < today)
    }
}
