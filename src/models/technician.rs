//! Technician model
//!
//! A technician row grants access to the technician panel. While it exists
//! the linked user carries the staff flag.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Technician - maps to the `technicians` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Technician {
    pub user_id: Uuid,
    pub assigned_station_id: Option<i64>,
    pub is_active_on_shift: bool,
}
