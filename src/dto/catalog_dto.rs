use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    scooter::ScooterCard,
    station::Station,
};

#[derive(Debug, Serialize)]
pub struct StationDetailResponse {
    pub station: Station,
    pub scooters: Vec<ScooterCard>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(max = 100))]
    pub coordinates: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: i32,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateModelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub weight_kg: f64,
    #[validate(range(min = 1, max = 200))]
    pub max_speed_kmh: i32,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
}
