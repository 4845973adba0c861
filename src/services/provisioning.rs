//! Provisioning hooks
//!
//! Records that must always come in pairs are created here, in one
//! transaction: a user with its wallet profile, a scooter with its battery,
//! a technician with the user's staff flag.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    scooter::{Battery, Scooter, ScooterStatus},
    technician::Technician,
    user::User,
    wallet::{Profile, DEFAULT_BALANCE},
};
use crate::repositories::{
    scooter_repository::{insert_battery, insert_scooter, model_exists},
    station_repository::find_station,
    technician_repository::{delete_technician, upsert_technician},
    user_repository::{insert_user, set_staff_flag},
    wallet_repository::insert_profile,
};
use crate::utils::errors::{not_found_error, AppError};

/// Battery status given to batteries installed at provisioning time
pub const NEW_BATTERY_STATUS: &str = "New";

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub full_name: String,
    pub is_superuser: bool,
}

/// Create a user and its wallet profile with the welcome balance
pub async fn provision_user(pool: &PgPool, new_user: &NewUser) -> Result<(User, Profile), AppError> {
    let mut tx = pool.begin().await?;

    let user = insert_user(
        &mut tx,
        new_user.id,
        &new_user.username,
        new_user.email.as_deref(),
        &new_user.full_name,
        new_user.is_superuser,
    )
    .await?;
    let profile = insert_profile(&mut tx, user.id, Decimal::from(DEFAULT_BALANCE)).await?;

    tx.commit().await?;

    info!("👤 User {} provisioned with balance {}", user.username, profile.balance);
    Ok((user, profile))
}

#[derive(Debug, Clone)]
pub struct NewScooter {
    pub serial_number: String,
    pub model_id: i64,
    pub status: ScooterStatus,
    pub current_station_id: Option<i64>,
    pub mileage_km: f64,
    pub hourly_rate: Decimal,
}

/// Create a scooter and install a fresh battery in it
pub async fn provision_scooter(pool: &PgPool, new_scooter: &NewScooter) -> Result<(Scooter, Battery), AppError> {
    let mut tx = pool.begin().await?;

    if !model_exists(&mut tx, new_scooter.model_id).await? {
        return Err(not_found_error("Scooter model", new_scooter.model_id));
    }
    if let Some(station_id) = new_scooter.current_station_id {
        find_station(&mut tx, station_id)
            .await?
            .ok_or_else(|| not_found_error("Station", station_id))?;
    }

    let scooter = insert_scooter(
        &mut tx,
        &new_scooter.serial_number,
        new_scooter.model_id,
        new_scooter.status,
        new_scooter.current_station_id,
        new_scooter.mileage_km,
        new_scooter.hourly_rate,
    )
    .await?;
    let battery = insert_battery(
        &mut tx,
        &Battery::fresh(scooter.id, NEW_BATTERY_STATUS, Utc::now().date_naive()),
    )
    .await?;

    tx.commit().await?;

    info!("🛴 Scooter {} provisioned", scooter.serial_number);
    Ok((scooter, battery))
}

/// Create or update a technician row and mark the user as staff
pub async fn assign_technician(
    pool: &PgPool,
    user_id: Uuid,
    assigned_station_id: Option<i64>,
    is_active_on_shift: bool,
) -> Result<Technician, AppError> {
    let mut tx = pool.begin().await?;

    if let Some(station_id) = assigned_station_id {
        find_station(&mut tx, station_id)
            .await?
            .ok_or_else(|| not_found_error("Station", station_id))?;
    }
    let user = set_staff_flag(&mut tx, user_id, true)
        .await?
        .ok_or_else(|| not_found_error("User", user_id))?;
    let technician = upsert_technician(&mut tx, user_id, assigned_station_id, is_active_on_shift).await?;

    tx.commit().await?;

    info!("🔧 {} is now a technician (station {:?})", user.username, assigned_station_id);
    Ok(technician)
}

/// Remove a technician row and clear the user's staff flag
pub async fn dismiss_technician(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if !delete_technician(&mut tx, user_id).await? {
        return Err(not_found_error("Technician", user_id));
    }
    set_staff_flag(&mut tx, user_id, false).await?;

    tx.commit().await?;

    info!("🔧 Technician {} dismissed", user_id);
    Ok(())
}
