//! Review model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Review - maps to the `reviews` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub rental_id: i64,
    pub user_id: Uuid,
    pub scooter_id: Option<i64>,
    pub rating: i32,
    pub text: String,
}
