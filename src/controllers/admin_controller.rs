//! Administration
//!
//! Record creation for superusers. Paired records go through the
//! provisioning hooks.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::{
    admin_dto::{AssignTechnicianRequest, CreatePromoRequest, CreateUserRequest, UserCreatedResponse},
    catalog_dto::{CreateModelRequest, CreateStationRequest},
    common::ApiResponse,
    fleet_dto::{CreateScooterRequest, ScooterCreatedResponse},
};
use crate::models::{
    promo::Promo,
    scooter::{ScooterModelWithSpecs, ScooterStatus},
    station::Station,
    technician::Technician,
};
use crate::repositories::{
    promo_repository::PromoRepository, scooter_repository::ScooterRepository, station_repository::StationRepository,
};
use crate::services::provisioning::{
    assign_technician, dismiss_technician, provision_scooter, provision_user, NewScooter, NewUser,
};
use crate::utils::errors::{validation_error, AppError};

/// Default promo discount, percent
pub const DEFAULT_DISCOUNT_PERCENT: i32 = 10;

/// Default hourly rate for new scooters
pub const DEFAULT_HOURLY_RATE: i64 = 5;

pub struct AdminController {
    pool: PgPool,
    stations: StationRepository,
    scooters: ScooterRepository,
    promos: PromoRepository,
}

impl AdminController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stations: StationRepository::new(pool.clone()),
            scooters: ScooterRepository::new(pool.clone()),
            promos: PromoRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create_station(&self, request: CreateStationRequest) -> Result<ApiResponse<Station>, AppError> {
        let station = self
            .stations
            .create(
                request.name.trim(),
                request.address.trim(),
                request.coordinates.as_deref().unwrap_or("").trim(),
                request.capacity,
                request.is_active.unwrap_or(true),
            )
            .await?;

        info!("📍 Station {} created", station.name);
        Ok(ApiResponse::success_with_message(station, "Station created"))
    }

    pub async fn create_model(
        &self,
        request: CreateModelRequest,
    ) -> Result<ApiResponse<ScooterModelWithSpecs>, AppError> {
        let model = self
            .scooters
            .create_model(
                request.name.trim(),
                request.weight_kg,
                request.max_speed_kmh,
                request.country.as_deref().map(str::trim).unwrap_or("China"),
            )
            .await?;

        info!("🛴 Scooter model {} created", model.name);
        Ok(ApiResponse::success_with_message(model, "Scooter model created"))
    }

    pub async fn create_scooter(
        &self,
        request: CreateScooterRequest,
    ) -> Result<ApiResponse<ScooterCreatedResponse>, AppError> {
        let status = initial_status(request.status.as_deref(), request.current_station_id)?;

        let new_scooter = NewScooter {
            serial_number: request.serial_number.trim().to_string(),
            model_id: request.model_id,
            status,
            current_station_id: request.current_station_id,
            mileage_km: request.mileage_km.unwrap_or(0.0),
            hourly_rate: request.hourly_rate.unwrap_or_else(|| Decimal::from(DEFAULT_HOURLY_RATE)),
        };
        let (scooter, battery) = provision_scooter(&self.pool, &new_scooter).await?;

        Ok(ApiResponse::success_with_message(
            ScooterCreatedResponse { scooter, battery },
            "Scooter created with a new battery",
        ))
    }

    pub async fn create_promo(&self, request: CreatePromoRequest) -> Result<ApiResponse<Promo>, AppError> {
        let promo = self
            .promos
            .create(
                &request.code,
                request.discount_percent.unwrap_or(DEFAULT_DISCOUNT_PERCENT),
                request.is_active.unwrap_or(true),
                request.expiry_date,
            )
            .await?;

        info!("🏷️ Promo {} created (-{}%)", promo.code, promo.discount_percent);
        Ok(ApiResponse::success_with_message(promo, "Promo code created"))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<ApiResponse<UserCreatedResponse>, AppError> {
        let new_user = NewUser {
            id: request.id.unwrap_or_else(Uuid::new_v4),
            username: request.username.trim().to_string(),
            email: request.email,
            full_name: request.full_name.unwrap_or_default(),
            is_superuser: request.is_superuser.unwrap_or(false),
        };
        let (user, profile) = provision_user(&self.pool, &new_user).await?;

        Ok(ApiResponse::success_with_message(
            UserCreatedResponse { user, profile },
            "User created",
        ))
    }

    pub async fn assign_technician(
        &self,
        request: AssignTechnicianRequest,
    ) -> Result<ApiResponse<Technician>, AppError> {
        let technician = assign_technician(
            &self.pool,
            request.user_id,
            request.assigned_station_id,
            request.is_active_on_shift.unwrap_or(true),
        )
        .await?;

        Ok(ApiResponse::success_with_message(technician, "Technician assigned"))
    }

    pub async fn dismiss_technician(&self, user_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        dismiss_technician(&self.pool, user_id).await?;
        Ok(ApiResponse::success_with_message((), "Technician removed"))
    }
}

/// Status a new scooter starts in. Docked scooters default to `available`,
/// undocked ones to `maintenance`; `rented` is never accepted.
fn initial_status(requested: Option<&str>, station_id: Option<i64>) -> Result<ScooterStatus, AppError> {
    let status = match requested {
        Some(raw) => raw
            .parse::<ScooterStatus>()
            .map_err(|_| validation_error("status", "unknown scooter status"))?,
        None if station_id.is_some() => ScooterStatus::Available,
        None => ScooterStatus::Maintenance,
    };

    match status {
        ScooterStatus::Rented => Err(validation_error("status", "a new scooter cannot start rented")),
        ScooterStatus::Available if station_id.is_none() => Err(validation_error(
            "current_station_id",
            "an available scooter must be docked at a station",
        )),
        status => Ok(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_defaults() {
        assert_eq!(initial_status(None, Some(1)).unwrap(), ScooterStatus::Available);
        assert_eq!(initial_status(None, None).unwrap(), ScooterStatus::Maintenance);
        assert_eq!(initial_status(Some("broken"), None).unwrap(), ScooterStatus::Broken);
    }

    #[test]
    fn test_initial_status_rejections() {
        assert!(matches!(initial_status(Some("rented"), None), Err(AppError::Validation(_))));
        assert!(matches!(initial_status(Some("available"), None), Err(AppError::Validation(_))));
        assert!(matches!(initial_status(Some("teleporting"), Some(1)), Err(AppError::Validation(_))));
    }
}
