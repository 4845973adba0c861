use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    scooter::{Battery, FleetEntry, Scooter, TechService},
    station::Station,
    technician::Technician,
};
use crate::utils::validation::{validate_non_negative_money, validate_serial_number};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScooterRequest {
    #[validate(custom = "validate_serial_number")]
    pub serial_number: String,
    pub model_id: i64,
    pub current_station_id: Option<i64>,
    /// Defaults to `available` when docked, `maintenance` otherwise
    pub status: Option<String>,
    #[validate(range(min = 0.0))]
    pub mileage_km: Option<f64>,
    #[validate(custom = "validate_non_negative_money")]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ScooterCreatedResponse {
    pub scooter: Scooter,
    pub battery: Battery,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub scooter: Scooter,
    pub battery: Option<Battery>,
    pub service: TechService,
}

#[derive(Debug, Serialize)]
pub struct TechDashboardResponse {
    pub technician: Technician,
    pub station: Option<Station>,
    pub scooters: Vec<FleetEntry>,
}
