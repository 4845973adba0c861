//! Technician panel

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::dto::{
    common::ApiResponse,
    fleet_dto::{StatusChangeRequest, StatusChangeResponse, TechDashboardResponse},
};
use crate::middleware::auth::TechnicianSession;
use crate::models::scooter::{Battery, ScooterStatus};
use crate::repositories::{
    scooter_repository::{find_battery, lock_scooter, log_service, place_scooter, recharge_battery, ScooterRepository},
    station_repository::StationRepository,
};
use crate::services::fleet_rules::plan_status_change;
use crate::utils::errors::{not_found_error, AppError};

/// Status of a battery installed during a status change
pub const SERVICED_BATTERY_STATUS: &str = "New (after service)";

pub struct TechController {
    pool: PgPool,
    scooters: ScooterRepository,
    stations: StationRepository,
}

impl TechController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            scooters: ScooterRepository::new(pool.clone()),
            stations: StationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Scooters at the technician's station, or the whole fleet when unassigned
    pub async fn dashboard(&self, tech: &TechnicianSession) -> Result<TechDashboardResponse, AppError> {
        let station = match tech.technician.assigned_station_id {
            Some(station_id) => self.stations.find_by_id(station_id).await?,
            None => None,
        };
        let scooters = self.scooters.fleet(station.as_ref().map(|s| s.id)).await?;

        Ok(TechDashboardResponse {
            technician: tech.technician.clone(),
            station,
            scooters,
        })
    }

    pub async fn change_status(
        &self,
        tech: &TechnicianSession,
        scooter_id: i64,
        request: StatusChangeRequest,
    ) -> Result<ApiResponse<StatusChangeResponse>, AppError> {
        let requested: ScooterStatus = request.status.parse().map_err(AppError::BadRequest)?;

        let mut tx = self.pool.begin().await?;

        let scooter = lock_scooter(&mut tx, scooter_id)
            .await?
            .ok_or_else(|| not_found_error("Scooter", scooter_id))?;
        let plan = plan_status_change(&scooter, requested, tech.technician.assigned_station_id)?;

        let updated = place_scooter(&mut tx, scooter.id, plan.status, plan.station_id).await?;
        let battery = if plan.recharge {
            let fresh = Battery::fresh(scooter.id, SERVICED_BATTERY_STATUS, Utc::now().date_naive());
            Some(recharge_battery(&mut tx, &fresh).await?)
        } else {
            find_battery(&mut tx, scooter.id).await?
        };
        let service = log_service(
            &mut tx,
            scooter.id,
            &format!("status:{}", plan.status),
            &tech.session.username,
        )
        .await?;

        tx.commit().await?;

        info!(
            "🔧 {} set scooter {} from {} to {}",
            tech.session.username, updated.serial_number, scooter.status, updated.status
        );

        let message = if plan.recharge {
            format!("Scooter {} is charged and ready to ride!", updated.serial_number)
        } else {
            format!("Scooter {} is now {}.", updated.serial_number, updated.status)
        };

        Ok(ApiResponse::success_with_message(
            StatusChangeResponse {
                scooter: updated,
                battery,
                service,
            },
            message,
        )
        .redirect_to("/tech/"))
    }
}
