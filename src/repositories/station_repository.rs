use sqlx::{PgConnection, PgPool};

use crate::models::station::{Station, StationSummary};
use crate::utils::errors::AppError;

pub struct StationRepository {
    pool: PgPool,
}

impl StationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All stations with the number of scooters ready to ride at each
    pub async fn list_with_availability(&self) -> Result<Vec<StationSummary>, AppError> {
        let stations = sqlx::query_as::<_, StationSummary>(
            r#"
            SELECT s.*,
                   COUNT(sc.id) FILTER (WHERE sc.status = 'available') AS available_scooters
            FROM stations s
            LEFT JOIN scooters sc ON sc.current_station_id = s.id
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Station>, AppError> {
        let station = sqlx::query_as::<_, Station>("SELECT * FROM stations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(station)
    }

    pub async fn create(
        &self,
        name: &str,
        address: &str,
        coordinates: &str,
        capacity: i32,
        is_active: bool,
    ) -> Result<Station, AppError> {
        let station = sqlx::query_as::<_, Station>(
            r#"
            INSERT INTO stations (name, address, coordinates, capacity, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(coordinates)
        .bind(capacity)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(station)
    }
}

/// Look a station up on an open transaction
pub async fn find_station(conn: &mut PgConnection, id: i64) -> Result<Option<Station>, AppError> {
    let station = sqlx::query_as::<_, Station>("SELECT * FROM stations WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(station)
}
