//! Rental model
//!
//! A rental is open while `end_time` is null. It is closed exactly once, at
//! which point `end_time`, `end_station_id` and `total_cost` are set together.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rental - maps to the `rentals` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: i64,
    pub user_id: Uuid,
    pub scooter_id: i64,
    pub promo_id: Option<i64>,
    pub start_station_id: Option<i64>,
    pub end_station_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_cost: Option<Decimal>,
    pub is_paid: bool,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
