//! Technician status changes
//!
//! Decides what a status change does to a scooter before anything is written:
//! where the scooter ends up docked and whether its battery is recharged.

use thiserror::Error;

use crate::models::scooter::{Scooter, ScooterStatus};
use crate::utils::errors::AppError;

#[derive(Debug, Error, PartialEq)]
pub enum StatusChangeRejection {
    #[error("Only the rental flow can mark a scooter as rented.")]
    RentedIsReserved,

    #[error("Scooter {serial} is out on a ride and cannot be changed.")]
    ScooterInRide { serial: String },

    #[error("Scooter {serial} has no station and you have no assigned station to dock it at.")]
    NoDockingStation { serial: String },
}

impl StatusChangeRejection {
    pub fn code(&self) -> &'static str {
        match self {
            StatusChangeRejection::RentedIsReserved => "STATUS_RESERVED",
            StatusChangeRejection::ScooterInRide { .. } => "SCOOTER_IN_RIDE",
            StatusChangeRejection::NoDockingStation { .. } => "NO_DOCKING_STATION",
        }
    }
}

impl From<StatusChangeRejection> for AppError {
    fn from(rejection: StatusChangeRejection) -> Self {
        AppError::Rejected {
            code: rejection.code(),
            message: rejection.to_string(),
        }
    }
}

/// Writes a status change will perform
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChangePlan {
    pub status: ScooterStatus,
    pub station_id: Option<i64>,
    /// Reset the battery to full charge, installing one if missing
    pub recharge: bool,
}

/// Plan a technician status change.
///
/// Putting a scooter back into service recharges it. A scooter without a
/// station is docked at the technician's assigned station.
pub fn plan_status_change(
    scooter: &Scooter,
    requested: ScooterStatus,
    technician_station: Option<i64>,
) -> Result<StatusChangePlan, StatusChangeRejection> {
    if requested == ScooterStatus::Rented {
        return Err(StatusChangeRejection::RentedIsReserved);
    }
    if scooter.status == ScooterStatus::Rented {
        return Err(StatusChangeRejection::ScooterInRide {
            serial: scooter.serial_number.clone(),
        });
    }

    match requested {
        ScooterStatus::Available => {
            let station_id = scooter
                .current_station_id
                .or(technician_station)
                .ok_or_else(|| StatusChangeRejection::NoDockingStation {
                    serial: scooter.serial_number.clone(),
                })?;
            Ok(StatusChangePlan {
                status: requested,
                station_id: Some(station_id),
                recharge: true,
            })
        }
        _ => Ok(StatusChangePlan {
            status: requested,
            station_id: scooter.current_station_id,
            recharge: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn scooter(status: ScooterStatus, station: Option<i64>) -> Scooter {
        Scooter {
            id: 4,
            serial_number: "SC-004".to_string(),
            model_id: 1,
            status,
            current_station_id: station,
            mileage_km: 0.0,
            hourly_rate: Decimal::from(5),
        }
    }

    #[test]
    fn test_back_to_available_recharges() {
        let plan = plan_status_change(&scooter(ScooterStatus::Maintenance, Some(2)), ScooterStatus::Available, None)
            .unwrap();
        assert_eq!(
            plan,
            StatusChangePlan {
                status: ScooterStatus::Available,
                station_id: Some(2),
                recharge: true,
            }
        );
    }

    #[test]
    fn test_undocked_scooter_goes_to_technician_station() {
        let plan = plan_status_change(&scooter(ScooterStatus::Broken, None), ScooterStatus::Available, Some(7))
            .unwrap();
        assert_eq!(plan.station_id, Some(7));
        assert!(plan.recharge);

        let err = plan_status_change(&scooter(ScooterStatus::Broken, None), ScooterStatus::Available, None)
            .unwrap_err();
        assert_eq!(err.code(), "NO_DOCKING_STATION");
    }

    #[test]
    fn test_maintenance_keeps_station_and_charge() {
        let plan = plan_status_change(&scooter(ScooterStatus::Available, Some(3)), ScooterStatus::Maintenance, Some(9))
            .unwrap();
        assert_eq!(plan.station_id, Some(3));
        assert!(!plan.recharge);
    }

    #[test]
    fn test_rented_is_off_limits() {
        assert_eq!(
            plan_status_change(&scooter(ScooterStatus::Available, Some(3)), ScooterStatus::Rented, None),
            Err(StatusChangeRejection::RentedIsReserved)
        );
        let err = plan_status_change(&scooter(ScooterStatus::Rented, None), ScooterStatus::Broken, Some(1))
            .unwrap_err();
        assert_eq!(err.code(), "SCOOTER_IN_RIDE");
    }
}
