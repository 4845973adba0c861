//! Rental rules
//!
//! Precondition checks for starting a ride and for reviewing one. They work
//! on already-loaded records so the controllers can run them inside a
//! transaction and abort before writing anything.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    rental::Rental,
    scooter::{Battery, Scooter, ScooterStatus, MIN_START_CHARGE},
    wallet::MIN_START_BALANCE,
};
use crate::utils::errors::AppError;

/// Why a ride could not start
#[derive(Debug, Error, PartialEq)]
pub enum StartRejection {
    #[error("This scooter is already taken or under maintenance.")]
    ScooterUnavailable,

    #[error("This scooter is not ready to ride (no battery installed).")]
    BatteryMissing,

    #[error("Battery charge is too low to start a ride ({charge}%).")]
    BatteryLow { charge: i32 },

    #[error("Insufficient funds. Your balance is {balance}; at least {required} is needed.")]
    InsufficientBalance { balance: Decimal, required: Decimal },

    #[error("You already have an active ride. Finish it first.")]
    RentalAlreadyActive,
}

impl StartRejection {
    pub fn code(&self) -> &'static str {
        match self {
            StartRejection::ScooterUnavailable => "SCOOTER_UNAVAILABLE",
            StartRejection::BatteryMissing => "BATTERY_MISSING",
            StartRejection::BatteryLow { .. } => "BATTERY_LOW",
            StartRejection::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            StartRejection::RentalAlreadyActive => "RENTAL_ALREADY_ACTIVE",
        }
    }
}

impl From<StartRejection> for AppError {
    fn from(rejection: StartRejection) -> Self {
        AppError::Rejected {
            code: rejection.code(),
            message: rejection.to_string(),
        }
    }
}

/// Everything the start checks look at
#[derive(Debug)]
pub struct StartContext<'a> {
    pub scooter: &'a Scooter,
    pub battery: Option<&'a Battery>,
    pub balance: Decimal,
    pub has_open_rental: bool,
}

/// Run the start preconditions in order; the first failure wins.
pub fn check_start(ctx: &StartContext<'_>) -> Result<(), StartRejection> {
    if ctx.scooter.status != ScooterStatus::Available {
        return Err(StartRejection::ScooterUnavailable);
    }

    let battery = ctx.battery.ok_or(StartRejection::BatteryMissing)?;
    if battery.charge_level < MIN_START_CHARGE {
        return Err(StartRejection::BatteryLow {
            charge: battery.charge_level,
        });
    }

    let required = Decimal::from(MIN_START_BALANCE);
    if ctx.balance < required {
        return Err(StartRejection::InsufficientBalance {
            balance: ctx.balance,
            required,
        });
    }

    if ctx.has_open_rental {
        return Err(StartRejection::RentalAlreadyActive);
    }

    Ok(())
}

/// Why a ride could not be finished
#[derive(Debug, Error, PartialEq)]
pub enum FinishRejection {
    #[error("This ride is already finished.")]
    AlreadyFinished,
}

impl From<FinishRejection> for AppError {
    fn from(rejection: FinishRejection) -> Self {
        let code = match rejection {
            FinishRejection::AlreadyFinished => "RENTAL_ALREADY_FINISHED",
        };
        AppError::Rejected {
            code,
            message: rejection.to_string(),
        }
    }
}

pub fn check_finish(rental: &Rental) -> Result<(), FinishRejection> {
    if !rental.is_open() {
        return Err(FinishRejection::AlreadyFinished);
    }
    Ok(())
}

/// Why a review was refused
#[derive(Debug, Error, PartialEq)]
pub enum ReviewRejection {
    #[error("You can review a ride once it is finished.")]
    RentalNotFinished,

    #[error("A review for this ride already exists.")]
    AlreadyReviewed,
}

impl ReviewRejection {
    pub fn code(&self) -> &'static str {
        match self {
            ReviewRejection::RentalNotFinished => "RENTAL_NOT_FINISHED",
            ReviewRejection::AlreadyReviewed => "REVIEW_EXISTS",
        }
    }
}

impl From<ReviewRejection> for AppError {
    fn from(rejection: ReviewRejection) -> Self {
        AppError::Rejected {
            code: rejection.code(),
            message: rejection.to_string(),
        }
    }
}

pub fn check_review(rental: &Rental, already_reviewed: bool) -> Result<(), ReviewRejection> {
    if already_reviewed {
        return Err(ReviewRejection::AlreadyReviewed);
    }
    if rental.is_open() {
        return Err(ReviewRejection::RentalNotFinished);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn scooter(status: ScooterStatus) -> Scooter {
        Scooter {
            id: 1,
            serial_number: "SC-001".to_string(),
            model_id: 1,
            status,
            current_station_id: Some(1),
            mileage_km: 12.5,
            hourly_rate: Decimal::from(5),
        }
    }

    fn battery(charge: i32) -> Battery {
        Battery {
            scooter_id: 1,
            charge_level: charge,
            status: "New".to_string(),
            end_warranty_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        }
    }

    fn rental(finished: bool) -> Rental {
        let start = Utc::now();
        Rental {
            id: 1,
            user_id: Uuid::new_v4(),
            scooter_id: 1,
            promo_id: None,
            start_station_id: Some(1),
            end_station_id: finished.then_some(2),
            start_time: start,
            end_time: finished.then_some(start),
            total_cost: finished.then(|| Decimal::from(5)),
            is_paid: finished,
        }
    }

    #[test]
    fn test_start_allowed() {
        let s = scooter(ScooterStatus::Available);
        let b = battery(80);
        let ctx = StartContext {
            scooter: &s,
            battery: Some(&b),
            balance: Decimal::from(500),
            has_open_rental: false,
        };
        assert_eq!(check_start(&ctx), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        // Everything is wrong; availability is reported.
        let s = scooter(ScooterStatus::Maintenance);
        let ctx = StartContext {
            scooter: &s,
            battery: None,
            balance: Decimal::ZERO,
            has_open_rental: true,
        };
        assert_eq!(check_start(&ctx), Err(StartRejection::ScooterUnavailable));

        let s = scooter(ScooterStatus::Available);
        let ctx = StartContext {
            scooter: &s,
            battery: None,
            balance: Decimal::ZERO,
            has_open_rental: true,
        };
        assert_eq!(check_start(&ctx), Err(StartRejection::BatteryMissing));
    }

    #[test]
    fn test_battery_threshold() {
        let s = scooter(ScooterStatus::Available);
        let low = battery(9);
        let ctx = StartContext {
            scooter: &s,
            battery: Some(&low),
            balance: Decimal::from(500),
            has_open_rental: false,
        };
        assert_eq!(check_start(&ctx), Err(StartRejection::BatteryLow { charge: 9 }));

        let just_enough = battery(10);
        let ctx = StartContext {
            battery: Some(&just_enough),
            ..ctx
        };
        assert_eq!(check_start(&ctx), Ok(()));
    }

    #[test]
    fn test_balance_threshold() {
        let s = scooter(ScooterStatus::Available);
        let b = battery(100);
        let ctx = StartContext {
            scooter: &s,
            battery: Some(&b),
            balance: Decimal::new(9999, 2),
            has_open_rental: true,
        };
        let err = check_start(&ctx).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_BALANCE");

        let ctx = StartContext {
            balance: Decimal::from(100),
            ..ctx
        };
        assert_eq!(check_start(&ctx), Err(StartRejection::RentalAlreadyActive));
    }

    #[test]
    fn test_rented_scooter_cannot_start() {
        let s = scooter(ScooterStatus::Rented);
        let b = battery(100);
        let ctx = StartContext {
            scooter: &s,
            battery: Some(&b),
            balance: Decimal::from(500),
            has_open_rental: false,
        };
        let err: AppError = check_start(&ctx).unwrap_err().into();
        assert_eq!(err.code(), "SCOOTER_UNAVAILABLE");
    }

    #[test]
    fn test_finish_only_open_rentals() {
        assert!(check_finish(&rental(false)).is_ok());
        assert_eq!(check_finish(&rental(true)), Err(FinishRejection::AlreadyFinished));
    }

    #[test]
    fn test_second_review_rejected() {
        assert!(check_review(&rental(true), false).is_ok());
        assert_eq!(
            check_review(&rental(true), true),
            Err(ReviewRejection::AlreadyReviewed)
        );
        assert_eq!(
            check_review(&rental(false), false),
            Err(ReviewRejection::RentalNotFinished)
        );
    }
}
