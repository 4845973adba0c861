//! Data export
//!
//! A fixed registry of exportable entities. Each entity knows its table, its
//! column order and how to load its rows; the export routes only ever see
//! `ExportEntity` values, never raw table names.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::models::{
    promo::Promo,
    rental::Rental,
    review::Review,
    scooter::{Battery, Scooter, ScooterModel, ScooterSummary, TechService, TechSpecs},
    station::Station,
    technician::Technician,
    wallet::{Payment, Profile},
};
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEntity {
    Stations,
    TechSpecs,
    ScooterModels,
    Scooters,
    Batteries,
    TechServices,
    Promos,
    Rentals,
    Payments,
    Reviews,
    Profiles,
    Technicians,
    /// Every scooter with its model name and status
    ScooterSummary,
}

impl ExportEntity {
    pub const ALL: [ExportEntity; 13] = [
        ExportEntity::Stations,
        ExportEntity::TechSpecs,
        ExportEntity::ScooterModels,
        ExportEntity::Scooters,
        ExportEntity::Batteries,
        ExportEntity::TechServices,
        ExportEntity::Promos,
        ExportEntity::Rentals,
        ExportEntity::Payments,
        ExportEntity::Reviews,
        ExportEntity::Profiles,
        ExportEntity::Technicians,
        ExportEntity::ScooterSummary,
    ];

    /// Name used in URLs and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportEntity::Stations => "stations",
            ExportEntity::TechSpecs => "tech-specs",
            ExportEntity::ScooterModels => "scooter-models",
            ExportEntity::Scooters => "scooters",
            ExportEntity::Batteries => "batteries",
            ExportEntity::TechServices => "tech-services",
            ExportEntity::Promos => "promos",
            ExportEntity::Rentals => "rentals",
            ExportEntity::Payments => "payments",
            ExportEntity::Reviews => "reviews",
            ExportEntity::Profiles => "profiles",
            ExportEntity::Technicians => "technicians",
            ExportEntity::ScooterSummary => "scooter-summary",
        }
    }

    /// Column order for CSV output; matches the model's field names
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ExportEntity::Stations => &["id", "name", "address", "coordinates", "capacity", "is_active"],
            ExportEntity::TechSpecs => &["id", "weight_kg", "max_speed_kmh", "country"],
            ExportEntity::ScooterModels => &["id", "name", "specs_id"],
            ExportEntity::Scooters => &[
                "id",
                "serial_number",
                "model_id",
                "status",
                "current_station_id",
                "mileage_km",
                "hourly_rate",
            ],
            ExportEntity::Batteries => &["scooter_id", "charge_level", "status", "end_warranty_date"],
            ExportEntity::TechServices => &["id", "scooter_id", "service_type", "executor", "performed_on"],
            ExportEntity::Promos => &["id", "code", "discount_percent", "is_active", "expiry_date"],
            ExportEntity::Rentals => &[
                "id",
                "user_id",
                "scooter_id",
                "promo_id",
                "start_station_id",
                "end_station_id",
                "start_time",
                "end_time",
                "total_cost",
                "is_paid",
            ],
            ExportEntity::Payments => &["id", "user_id", "rental_id", "amount", "paid_at", "method"],
            ExportEntity::Reviews => &["id", "rental_id", "user_id", "scooter_id", "rating", "text"],
            ExportEntity::Profiles => &["user_id", "balance"],
            ExportEntity::Technicians => &["user_id", "assigned_station_id", "is_active_on_shift"],
            ExportEntity::ScooterSummary => &["id", "model", "status"],
        }
    }

    fn select_sql(&self) -> &'static str {
        match self {
            ExportEntity::Stations => "SELECT * FROM stations ORDER BY id",
            ExportEntity::TechSpecs => "SELECT * FROM tech_specs ORDER BY id",
            ExportEntity::ScooterModels => "SELECT * FROM scooter_models ORDER BY id",
            ExportEntity::Scooters => "SELECT * FROM scooters ORDER BY id",
            ExportEntity::Batteries => "SELECT * FROM batteries ORDER BY scooter_id",
            ExportEntity::TechServices => "SELECT * FROM tech_services ORDER BY id",
            ExportEntity::Promos => "SELECT * FROM promos ORDER BY id",
            ExportEntity::Rentals => "SELECT * FROM rentals ORDER BY id",
            ExportEntity::Payments => "SELECT * FROM payments ORDER BY id",
            ExportEntity::Reviews => "SELECT * FROM reviews ORDER BY id",
            ExportEntity::Profiles => "SELECT * FROM profiles ORDER BY user_id",
            ExportEntity::Technicians => "SELECT * FROM technicians ORDER BY user_id",
            ExportEntity::ScooterSummary => {
                "SELECT s.id, m.name AS model, s.status FROM scooters s \
                 JOIN scooter_models m ON m.id = s.model_id ORDER BY s.id"
            }
        }
    }

    /// Load every record of this entity as JSON objects
    pub async fn fetch(&self, pool: &PgPool) -> Result<Vec<Value>, AppError> {
        let sql = self.select_sql();
        match self {
            ExportEntity::Stations => fetch_as::<Station>(pool, sql).await,
            ExportEntity::TechSpecs => fetch_as::<TechSpecs>(pool, sql).await,
            ExportEntity::ScooterModels => fetch_as::<ScooterModel>(pool, sql).await,
            ExportEntity::Scooters => fetch_as::<Scooter>(pool, sql).await,
            ExportEntity::Batteries => fetch_as::<Battery>(pool, sql).await,
            ExportEntity::TechServices => fetch_as::<TechService>(pool, sql).await,
            ExportEntity::Promos => fetch_as::<Promo>(pool, sql).await,
            ExportEntity::Rentals => fetch_as::<Rental>(pool, sql).await,
            ExportEntity::Payments => fetch_as::<Payment>(pool, sql).await,
            ExportEntity::Reviews => fetch_as::<Review>(pool, sql).await,
            ExportEntity::Profiles => fetch_as::<Profile>(pool, sql).await,
            ExportEntity::Technicians => fetch_as::<Technician>(pool, sql).await,
            ExportEntity::ScooterSummary => fetch_as::<ScooterSummary>(pool, sql).await,
        }
    }
}

impl FromStr for ExportEntity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ExportEntity::ALL
            .into_iter()
            .find(|entity| entity.as_str() == wanted)
            .ok_or_else(|| AppError::NotFound(format!("model not found: {}", s)))
    }
}

async fn fetch_as<T>(pool: &PgPool, sql: &str) -> Result<Vec<Value>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin,
{
    let rows = sqlx::query_as::<_, T>(sql).fetch_all(pool).await?;
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(|e| AppError::Internal(format!("Error serializing row: {}", e))))
        .collect()
}

fn csv_cell(value: Option<&Value>) -> String {
    let raw = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    if raw.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw
    }
}

/// Render records as CSV: a header row, then one row per record (RFC 4180 quoting)
pub fn render_csv(columns: &[&str], records: &[Value]) -> String {
    let mut out = String::new();
    out.push_str(&columns.iter().map(|c| csv_cell(Some(&Value::String(c.to_string())))).collect::<Vec<_>>().join(","));
    out.push_str("\r\n");

    for record in records {
        let line = columns
            .iter()
            .map(|column| csv_cell(record.get(*column)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push_str("\r\n");
    }

    out
}

/// Render records as a pretty-printed JSON array
pub fn render_json(records: &[Value]) -> Result<String, AppError> {
    serde_json::to_string_pretty(records).map_err(|e| AppError::Internal(format!("Error rendering JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::models::scooter::ScooterStatus;

    #[test]
    fn test_parse_entity_names() {
        assert_eq!("scooters".parse::<ExportEntity>().unwrap(), ExportEntity::Scooters);
        assert_eq!("Scooter_Models".parse::<ExportEntity>().unwrap(), ExportEntity::ScooterModels);
        for entity in ExportEntity::ALL {
            assert_eq!(entity.as_str().parse::<ExportEntity>().unwrap(), entity);
        }
    }

    #[test]
    fn test_unknown_entity_is_not_found() {
        let err = "users".parse::<ExportEntity>().unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!("pg_catalog.pg_user".parse::<ExportEntity>().is_err());
    }

    #[test]
    fn test_columns_match_serialized_fields() {
        let scooter = Scooter {
            id: 1,
            serial_number: "SC-001".to_string(),
            model_id: 2,
            status: ScooterStatus::Available,
            current_station_id: Some(3),
            mileage_km: 1.5,
            hourly_rate: Decimal::from(5),
        };
        let value = serde_json::to_value(&scooter).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ExportEntity::Scooters.columns().len());
        for column in ExportEntity::Scooters.columns() {
            assert!(object.contains_key(*column), "missing {}", column);
        }

        let promo = Promo {
            id: 1,
            code: "SPRING".to_string(),
            discount_percent: 10,
            is_active: true,
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1),
        };
        let value = serde_json::to_value(&promo).unwrap();
        for column in ExportEntity::Promos.columns() {
            assert!(value.get(*column).is_some(), "missing {}", column);
        }
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let records = vec![
            json!({"id": 1, "name": "Central, North", "address": "1 \"Main\" St", "coordinates": null, "capacity": 15, "is_active": true}),
            json!({"id": 2, "name": "Park", "address": "Line\nbreak", "capacity": 0, "is_active": false}),
        ];
        let csv = render_csv(ExportEntity::Stations.columns(), &records);
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], "id,name,address,coordinates,capacity,is_active");
        assert_eq!(lines[1], "1,\"Central, North\",\"1 \"\"Main\"\" St\",,15,true");
        assert_eq!(lines[2], "2,Park,\"Line\nbreak\",,0,false");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_scooter_summary_columns() {
        let summary = ScooterSummary {
            id: 7,
            model: "Ninebot Max".to_string(),
            status: ScooterStatus::Maintenance,
        };
        let records = vec![serde_json::to_value(&summary).unwrap()];
        let csv = render_csv(ExportEntity::ScooterSummary.columns(), &records);

        assert_eq!(csv, "id,model,status\r\n7,Ninebot Max,maintenance\r\n");
        assert_eq!("scooter_summary".parse::<ExportEntity>().unwrap(), ExportEntity::ScooterSummary);
    }

    #[test]
    fn test_render_csv_header_only_when_empty() {
        let csv = render_csv(ExportEntity::Profiles.columns(), &[]);
        assert_eq!(csv, "user_id,balance\r\n");
    }

    #[test]
    fn test_render_json_pretty() {
        let body = render_json(&[json!({"id": 1})]).unwrap();
        assert!(body.starts_with("[\n"));
        assert!(body.contains("\"id\": 1"));
    }
}
