//! Rental lifecycle
//!
//! Start and finish each run in one transaction. Start locks the scooter row
//! before checking it; finish locks the rental row and settles it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};

use crate::config::environment::PricingPolicy;
use crate::dto::{
    common::{ApiResponse, FlashLevel, FlashMessage},
    rental_dto::{FinishRentalRequest, FinishRentalResponse},
};
use crate::middleware::auth::Session;
use crate::models::{
    rental::Rental,
    scooter::{Scooter, ScooterStatus},
    wallet::METHOD_BALANCE,
};
use crate::repositories::{
    promo_repository::find_promo_by_code,
    rental_repository::{close_rental, has_open_rental, lock_user_rental, open_rental, RentalClosing, RentalRepository},
    scooter_repository::{find_battery, lock_scooter, place_scooter},
    station_repository::find_station,
    wallet_repository::{adjust_balance, insert_payment, lock_balance},
};
use crate::services::{
    pricing::{
        billable_minutes, evaluate_promo, normalize_promo_code, quote_hourly, quote_per_minute, PromoOutcome,
        PRICE_PER_MINUTE,
    },
    rental_rules::{check_finish, check_start, StartContext},
};
use crate::utils::errors::{not_found_error, AppError};

fn missing_wallet() -> AppError {
    AppError::NotFound("Wallet profile not found".to_string())
}

/// What a settlement charged and recorded
struct Settlement {
    minutes: i64,
    base: Decimal,
    discount: Decimal,
    total: Decimal,
    promo_id: Option<i64>,
    paid: bool,
    balance: Decimal,
    messages: Vec<FlashMessage>,
}

fn flash(level: FlashLevel, text: impl Into<String>) -> FlashMessage {
    FlashMessage {
        level,
        text: text.into(),
    }
}

pub struct RentalController {
    pool: PgPool,
    policy: PricingPolicy,
    repository: RentalRepository,
}

impl RentalController {
    pub fn new(pool: PgPool, policy: PricingPolicy) -> Self {
        Self {
            repository: RentalRepository::new(pool.clone()),
            pool,
            policy,
        }
    }

    pub async fn start(&self, session: &Session, scooter_id: i64) -> Result<ApiResponse<Rental>, AppError> {
        let mut tx = self.pool.begin().await?;

        let scooter = lock_scooter(&mut tx, scooter_id)
            .await?
            .ok_or_else(|| not_found_error("Scooter", scooter_id))?;
        let battery = find_battery(&mut tx, scooter.id).await?;
        let balance = lock_balance(&mut tx, session.user_id).await?.ok_or_else(missing_wallet)?;
        let has_open = has_open_rental(&mut tx, session.user_id).await?;

        let context = StartContext {
            scooter: &scooter,
            battery: battery.as_ref(),
            balance,
            has_open_rental: has_open,
        };
        if let Err(rejection) = check_start(&context) {
            info!("🚫 {} cannot start scooter {}: {}", session.username, scooter.serial_number, rejection.code());
            return Err(rejection.into());
        }

        let rental = open_rental(
            &mut tx,
            session.user_id,
            scooter.id,
            scooter.current_station_id,
            Utc::now(),
        )
        .await?;
        place_scooter(&mut tx, scooter.id, ScooterStatus::Rented, None).await?;

        tx.commit().await?;

        info!("🛴 Rental {} started by {} on scooter {}", rental.id, session.username, scooter.serial_number);

        Ok(ApiResponse::success_with_message(rental, "Ride started. Have a good trip!").redirect_to("/my-rentals/"))
    }

    pub async fn finish(
        &self,
        session: &Session,
        rental_id: i64,
        request: FinishRentalRequest,
    ) -> Result<ApiResponse<FinishRentalResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let rental = lock_user_rental(&mut tx, rental_id, session.user_id)
            .await?
            .ok_or_else(|| not_found_error("Rental", rental_id))?;
        check_finish(&rental)?;

        let station = find_station(&mut tx, request.end_station)
            .await?
            .ok_or_else(|| not_found_error("Station", request.end_station))?;
        let scooter = lock_scooter(&mut tx, rental.scooter_id)
            .await?
            .ok_or_else(|| not_found_error("Scooter", rental.scooter_id))?;

        let end_time = Utc::now();
        let settlement = match self.policy {
            PricingPolicy::PerMinute => {
                settle_per_minute(&mut tx, session, &rental, end_time, request.promo_code.as_deref()).await?
            }
            PricingPolicy::Hourly => {
                settle_hourly(&mut tx, session, &rental, &scooter, end_time, request.promo_code.as_deref()).await?
            }
        };

        let closing = RentalClosing {
            end_station_id: station.id,
            end_time,
            total_cost: settlement.total,
            promo_id: settlement.promo_id,
            is_paid: settlement.paid,
        };
        let closed = close_rental(&mut tx, rental.id, &closing).await?;

        let payment = if settlement.paid {
            Some(insert_payment(&mut tx, session.user_id, closed.id, settlement.total, end_time, METHOD_BALANCE).await?)
        } else {
            None
        };

        place_scooter(&mut tx, scooter.id, ScooterStatus::Available, Some(station.id)).await?;

        tx.commit().await?;

        info!(
            "🏁 Rental {} finished by {} at {}: {} min, charged {}",
            closed.id, session.username, station.name, settlement.minutes, settlement.total
        );

        let summary = if payment.is_some() {
            format!("Ride finished. Charged: {}. Scooter left at: {}", settlement.total, station.name)
        } else {
            format!("Ride finished. Cost: {}. Scooter left at: {}", settlement.total, station.name)
        };

        let response = FinishRentalResponse {
            rental: closed,
            payment,
            minutes: settlement.minutes,
            base_cost: settlement.base,
            discount: settlement.discount,
            total_cost: settlement.total,
            balance: settlement.balance,
        };
        let redirect = format!("/review/{}/", response.rental.id);

        Ok(ApiResponse::success(response)
            .with_messages(settlement.messages)
            .with_message(FlashLevel::Success, summary)
            .redirect_to(redirect))
    }

    pub async fn my_rentals(&self, session: &Session) -> Result<Vec<Rental>, AppError> {
        self.repository.list_for_user(session.user_id).await
    }
}

/// Per-minute settlement: promo applies, the wallet is always debited.
async fn settle_per_minute(
    conn: &mut PgConnection,
    session: &Session,
    rental: &Rental,
    end_time: DateTime<Utc>,
    promo_code: Option<&str>,
) -> Result<Settlement, AppError> {
    let mut messages = Vec::new();
    let base = Decimal::from(billable_minutes(rental.start_time, end_time) * PRICE_PER_MINUTE);

    let outcome = match normalize_promo_code(promo_code) {
        None => PromoOutcome::NotRequested,
        Some(code) => {
            let promo = find_promo_by_code(&mut *conn, code).await?;
            evaluate_promo(promo.as_ref(), base, end_time.date_naive())
        }
    };
    match &outcome {
        PromoOutcome::Applied { percent, .. } => {
            messages.push(flash(FlashLevel::Success, format!("Promo code applied: -{}%", percent)));
        }
        PromoOutcome::Expired => messages.push(flash(FlashLevel::Error, "This promo code has expired.")),
        PromoOutcome::Invalid => messages.push(flash(FlashLevel::Error, "Invalid promo code.")),
        PromoOutcome::NotRequested => {}
    }

    let quote = quote_per_minute(rental.start_time, end_time, outcome);

    let balance = adjust_balance(&mut *conn, session.user_id, -quote.total)
        .await?
        .ok_or_else(missing_wallet)?;
    if balance.is_sign_negative() && !balance.is_zero() {
        warn!("⚠️ Wallet of {} went negative after rental {}: {}", session.username, rental.id, balance);
        messages.push(flash(
            FlashLevel::Warning,
            format!("Your balance is now negative ({}). Please top up.", balance),
        ));
    }

    Ok(Settlement {
        minutes: quote.minutes,
        base: quote.base,
        discount: quote.discount(),
        total: quote.total,
        promo_id: quote.promo.promo_id(),
        paid: true,
        balance,
        messages,
    })
}

fn hourly_promo_notice(promo_code: Option<&str>) -> Option<FlashMessage> {
    normalize_promo_code(promo_code).map(|_| flash(FlashLevel::Info, "Promo codes do not apply to hourly rides."))
}

/// Hourly settlement: no promo; paid only when the wallet covers the cost.
async fn settle_hourly(
    conn: &mut PgConnection,
    session: &Session,
    rental: &Rental,
    scooter: &Scooter,
    end_time: DateTime<Utc>,
    promo_code: Option<&str>,
) -> Result<Settlement, AppError> {
    let mut messages: Vec<FlashMessage> = hourly_promo_notice(promo_code).into_iter().collect();
    let quote = quote_hourly(rental.start_time, end_time, scooter.hourly_rate);

    let balance = lock_balance(&mut *conn, session.user_id).await?.ok_or_else(missing_wallet)?;
    let (paid, balance) = if balance >= quote.total {
        let balance = adjust_balance(&mut *conn, session.user_id, -quote.total)
            .await?
            .ok_or_else(missing_wallet)?;
        (true, balance)
    } else {
        warn!(
            "⚠️ Rental {} left unpaid: cost {}, balance of {} is {}",
            rental.id, quote.total, session.username, balance
        );
        messages.push(flash(
            FlashLevel::Warning,
            format!("Insufficient funds: the ride costs {} and your balance is {}.", quote.total, balance),
        ));
        (false, balance)
    };

    Ok(Settlement {
        minutes: quote.minutes,
        base: quote.total,
        discount: Decimal::ZERO,
        total: quote.total,
        promo_id: None,
        paid,
        balance,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_ride_reports_ignored_promo_code() {
        let notice = hourly_promo_notice(Some(" SPRING24 ")).unwrap();
        assert_eq!(notice.level, FlashLevel::Info);
        assert_eq!(notice.text, "Promo codes do not apply to hourly rides.");
    }

    #[test]
    fn test_hourly_ride_without_promo_code_is_silent() {
        assert!(hourly_promo_notice(None).is_none());
        assert!(hourly_promo_notice(Some("   ")).is_none());
    }
}
