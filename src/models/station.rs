//! Station model
//!
//! Maps the `stations` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Physical dock - maps to the `stations` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub coordinates: String,
    pub capacity: i32,
    pub is_active: bool,
}

/// Station with the number of scooters ready to ride
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub station: Station,
    pub available_scooters: i64,
}
