//! Fleet models
//!
//! Scooters, their batteries and the catalog of scooter models. Maps the
//! `scooters`, `batteries`, `scooter_models` and `tech_specs` tables.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Minimum charge needed to start a ride, percent
pub const MIN_START_CHARGE: i32 = 10;

/// Charge after a technician puts a scooter back into service
pub const FULL_CHARGE: i32 = 100;

/// Warranty length for a freshly installed battery
pub const BATTERY_WARRANTY_DAYS: i64 = 365;

/// Operational status - maps to the `scooter_status` enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "scooter_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScooterStatus {
    Available,
    Rented,
    Maintenance,
    Broken,
}

impl ScooterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScooterStatus::Available => "available",
            ScooterStatus::Rented => "rented",
            ScooterStatus::Maintenance => "maintenance",
            ScooterStatus::Broken => "broken",
        }
    }
}

impl fmt::Display for ScooterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScooterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(ScooterStatus::Available),
            "rented" => Ok(ScooterStatus::Rented),
            "maintenance" => Ok(ScooterStatus::Maintenance),
            "broken" => Ok(ScooterStatus::Broken),
            other => Err(format!("unknown scooter status '{}'", other)),
        }
    }
}

/// Scooter - maps to the `scooters` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Scooter {
    pub id: i64,
    pub serial_number: String,
    pub model_id: i64,
    pub status: ScooterStatus,
    pub current_station_id: Option<i64>,
    pub mileage_km: f64,
    pub hourly_rate: Decimal,
}

impl Scooter {
    /// Rented scooters are undocked; available ones are docked somewhere.
    pub fn placement_is_consistent(&self) -> bool {
        match self.status {
            ScooterStatus::Rented => self.current_station_id.is_none(),
            ScooterStatus::Available => self.current_station_id.is_some(),
            ScooterStatus::Maintenance | ScooterStatus::Broken => true,
        }
    }
}

/// Battery installed in a scooter - maps to the `batteries` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Battery {
    pub scooter_id: i64,
    /// Charge, percent
    pub charge_level: i32,
    pub status: String,
    pub end_warranty_date: NaiveDate,
}

impl Battery {
    /// A new, fully charged battery
    pub fn fresh(scooter_id: i64, status: &str, today: NaiveDate) -> Self {
        Self {
            scooter_id,
            charge_level: FULL_CHARGE,
            status: status.to_string(),
            end_warranty_date: today + Duration::days(BATTERY_WARRANTY_DAYS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechSpecs {
    pub id: i64,
    pub weight_kg: f64,
    pub max_speed_kmh: i32,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScooterModel {
    pub id: i64,
    pub name: String,
    pub specs_id: i64,
}

/// Catalog entry: a model joined with its specs
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScooterModelWithSpecs {
    pub id: i64,
    pub name: String,
    pub weight_kg: f64,
    pub max_speed_kmh: i32,
    pub country: String,
}

/// Scooter as shown to riders on a station page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScooterCard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub scooter: Scooter,
    pub model_name: String,
    pub charge_level: Option<i32>,
    /// Average review rating, one decimal; `None` for scooters nobody reviewed yet
    pub avg_rating: Option<Decimal>,
}

/// One line of the fleet summary export
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScooterSummary {
    pub id: i64,
    pub model: String,
    pub status: ScooterStatus,
}

/// Scooter as shown on the technician dashboard
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FleetEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub scooter: Scooter,
    pub charge_level: Option<i32>,
}

/// Maintenance log entry - maps to the `tech_services` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechService {
    pub id: i64,
    pub scooter_id: i64,
    pub service_type: String,
    pub executor: String,
    pub performed_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scooter(status: ScooterStatus, station: Option<i64>) -> Scooter {
        Scooter {
            id: 1,
            serial_number: "SC-001".to_string(),
            model_id: 1,
            status,
            current_station_id: station,
            mileage_km: 0.0,
            hourly_rate: Decimal::from(5),
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("available".parse::<ScooterStatus>(), Ok(ScooterStatus::Available));
        assert_eq!(" Maintenance ".parse::<ScooterStatus>(), Ok(ScooterStatus::Maintenance));
        assert_eq!("BROKEN".parse::<ScooterStatus>(), Ok(ScooterStatus::Broken));
        assert!("flying".parse::<ScooterStatus>().is_err());
        assert_eq!(ScooterStatus::Rented.to_string(), "rented");
    }

    #[test]
    fn test_placement_consistency() {
        assert!(scooter(ScooterStatus::Rented, None).placement_is_consistent());
        assert!(!scooter(ScooterStatus::Rented, Some(3)).placement_is_consistent());
        assert!(scooter(ScooterStatus::Available, Some(3)).placement_is_consistent());
        assert!(!scooter(ScooterStatus::Available, None).placement_is_consistent());
        assert!(scooter(ScooterStatus::Broken, None).placement_is_consistent());
    }

    #[test]
    fn test_fresh_battery() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let battery = Battery::fresh(7, "New", today);
        assert_eq!(battery.charge_level, FULL_CHARGE);
        assert_eq!(battery.end_warranty_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_card_serializes_flat() {
        let card = ScooterCard {
            scooter: scooter(ScooterStatus::Available, Some(2)),
            model_name: "Ninebot MAX G30".to_string(),
            charge_level: Some(80),
            avg_rating: None,
        };
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["serial_number"], "SC-001");
        assert_eq!(value["status"], "available");
        assert_eq!(value["charge_level"], 80);
        assert!(value["avg_rating"].is_null());
    }
}
