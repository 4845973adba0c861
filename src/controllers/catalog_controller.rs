use sqlx::PgPool;

use crate::dto::catalog_dto::StationDetailResponse;
use crate::models::{scooter::ScooterModelWithSpecs, station::StationSummary};
use crate::repositories::{scooter_repository::ScooterRepository, station_repository::StationRepository};
use crate::utils::errors::{not_found_error, AppError};

pub struct CatalogController {
    stations: StationRepository,
    scooters: ScooterRepository,
}

impl CatalogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stations: StationRepository::new(pool.clone()),
            scooters: ScooterRepository::new(pool),
        }
    }

    pub async fn list_stations(&self) -> Result<Vec<StationSummary>, AppError> {
        self.stations.list_with_availability().await
    }

    /// A station and the scooters ready to ride there
    pub async fn station_detail(&self, station_id: i64) -> Result<StationDetailResponse, AppError> {
        let station = self
            .stations
            .find_by_id(station_id)
            .await?
            .ok_or_else(|| not_found_error("Station", station_id))?;
        let scooters = self.scooters.available_at_station(station.id).await?;

        Ok(StationDetailResponse { station, scooters })
    }

    pub async fn list_models(&self) -> Result<Vec<ScooterModelWithSpecs>, AppError> {
        self.scooters.list_models().await
    }
}
