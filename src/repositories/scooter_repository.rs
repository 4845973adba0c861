use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::scooter::{
    Battery, FleetEntry, Scooter, ScooterCard, ScooterModel, ScooterModelWithSpecs, ScooterStatus, TechService,
    TechSpecs,
};
use crate::utils::errors::{is_unique_violation, AppError};

pub struct ScooterRepository {
    pool: PgPool,
}

impl ScooterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scooters ready to ride at a station, with model name, charge and rating
    pub async fn available_at_station(&self, station_id: i64) -> Result<Vec<ScooterCard>, AppError> {
        let scooters = sqlx::query_as::<_, ScooterCard>(
            r#"
            SELECT sc.*,
                   m.name AS model_name,
                   b.charge_level,
                   (SELECT ROUND(AVG(r.rating)::numeric, 1)
                    FROM reviews r
                    WHERE r.scooter_id = sc.id) AS avg_rating
            FROM scooters sc
            JOIN scooter_models m ON m.id = sc.model_id
            LEFT JOIN batteries b ON b.scooter_id = sc.id
            WHERE sc.current_station_id = $1 AND sc.status = 'available'
            ORDER BY sc.id
            "#,
        )
        .bind(station_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scooters)
    }

    /// Fleet for the technician dashboard; every scooter when `station_id` is `None`
    pub async fn fleet(&self, station_id: Option<i64>) -> Result<Vec<FleetEntry>, AppError> {
        let scooters = sqlx::query_as::<_, FleetEntry>(
            r#"
            SELECT sc.*, b.charge_level
            FROM scooters sc
            LEFT JOIN batteries b ON b.scooter_id = sc.id
            WHERE $1::BIGINT IS NULL OR sc.current_station_id = $1
            ORDER BY sc.id
            "#,
        )
        .bind(station_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scooters)
    }

    pub async fn list_models(&self) -> Result<Vec<ScooterModelWithSpecs>, AppError> {
        let models = sqlx::query_as::<_, ScooterModelWithSpecs>(
            r#"
            SELECT m.id, m.name, s.weight_kg, s.max_speed_kmh, s.country
            FROM scooter_models m
            JOIN tech_specs s ON s.id = m.specs_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(models)
    }

    /// Create a model and its specs together
    pub async fn create_model(
        &self,
        name: &str,
        weight_kg: f64,
        max_speed_kmh: i32,
        country: &str,
    ) -> Result<ScooterModelWithSpecs, AppError> {
        let mut tx = self.pool.begin().await?;

        let specs = sqlx::query_as::<_, TechSpecs>(
            "INSERT INTO tech_specs (weight_kg, max_speed_kmh, country) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(weight_kg)
        .bind(max_speed_kmh)
        .bind(country)
        .fetch_one(&mut *tx)
        .await?;

        let model = sqlx::query_as::<_, ScooterModel>(
            "INSERT INTO scooter_models (name, specs_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(specs.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ScooterModelWithSpecs {
            id: model.id,
            name: model.name,
            weight_kg: specs.weight_kg,
            max_speed_kmh: specs.max_speed_kmh,
            country: specs.country,
        })
    }
}

pub async fn model_exists(conn: &mut PgConnection, model_id: i64) -> Result<bool, AppError> {
    let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM scooter_models WHERE id = $1)")
        .bind(model_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(result.0)
}

pub async fn insert_scooter(
    conn: &mut PgConnection,
    serial_number: &str,
    model_id: i64,
    status: ScooterStatus,
    station_id: Option<i64>,
    mileage_km: f64,
    hourly_rate: Decimal,
) -> Result<Scooter, AppError> {
    sqlx::query_as::<_, Scooter>(
        r#"
        INSERT INTO scooters (serial_number, model_id, status, current_station_id, mileage_km, hourly_rate)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(serial_number)
    .bind(model_id)
    .bind(status)
    .bind(station_id)
    .bind(mileage_km)
    .bind(hourly_rate)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "scooters_serial_number_key") {
            AppError::Conflict(format!("Serial number '{}' is already registered", serial_number))
        } else {
            AppError::Database(e)
        }
    })
}

/// Load a scooter and lock its row until the transaction ends
pub async fn lock_scooter(conn: &mut PgConnection, id: i64) -> Result<Option<Scooter>, AppError> {
    let scooter = sqlx::query_as::<_, Scooter>("SELECT * FROM scooters WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(scooter)
}

pub async fn find_battery(conn: &mut PgConnection, scooter_id: i64) -> Result<Option<Battery>, AppError> {
    let battery = sqlx::query_as::<_, Battery>("SELECT * FROM batteries WHERE scooter_id = $1")
        .bind(scooter_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(battery)
}

/// Move a scooter to a new status and station in one statement
pub async fn place_scooter(
    conn: &mut PgConnection,
    id: i64,
    status: ScooterStatus,
    station_id: Option<i64>,
) -> Result<Scooter, AppError> {
    let scooter = sqlx::query_as::<_, Scooter>(
        "UPDATE scooters SET status = $2, current_station_id = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .bind(station_id)
    .fetch_one(&mut *conn)
    .await?;

    debug_assert!(scooter.placement_is_consistent(), "scooter {} misplaced", scooter.id);

    Ok(scooter)
}

pub async fn insert_battery(conn: &mut PgConnection, battery: &Battery) -> Result<Battery, AppError> {
    let battery = sqlx::query_as::<_, Battery>(
        r#"
        INSERT INTO batteries (scooter_id, charge_level, status, end_warranty_date)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(battery.scooter_id)
    .bind(battery.charge_level)
    .bind(&battery.status)
    .bind(battery.end_warranty_date)
    .fetch_one(&mut *conn)
    .await?;

    Ok(battery)
}

/// Recharge the scooter's battery to `fresh.charge_level`, installing `fresh`
/// when the scooter has none. An existing battery keeps its status and warranty.
pub async fn recharge_battery(conn: &mut PgConnection, fresh: &Battery) -> Result<Battery, AppError> {
    let battery = sqlx::query_as::<_, Battery>(
        r#"
        INSERT INTO batteries (scooter_id, charge_level, status, end_warranty_date)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (scooter_id) DO UPDATE SET charge_level = EXCLUDED.charge_level
        RETURNING *
        "#,
    )
    .bind(fresh.scooter_id)
    .bind(fresh.charge_level)
    .bind(&fresh.status)
    .bind(fresh.end_warranty_date)
    .fetch_one(&mut *conn)
    .await?;

    Ok(battery)
}

pub async fn log_service(
    conn: &mut PgConnection,
    scooter_id: i64,
    service_type: &str,
    executor: &str,
) -> Result<TechService, AppError> {
    let entry = sqlx::query_as::<_, TechService>(
        r#"
        INSERT INTO tech_services (scooter_id, service_type, executor)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(scooter_id)
    .bind(service_type)
    .bind(executor)
    .fetch_one(&mut *conn)
    .await?;

    Ok(entry)
}
