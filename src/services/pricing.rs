//! Ride pricing
//!
//! Two tariffs exist. The per-minute tariff charges 5 per started minute and
//! accepts promo codes. The hourly tariff charges the scooter's hourly rate per
//! started hour and never applies promos. A deployment picks one through
//! `PricingPolicy`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::promo::Promo;

/// Price of one started minute
pub const PRICE_PER_MINUTE: i64 = 5;

/// Round to currency precision, always carrying two decimals
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Started minutes between `start` and `end`, never less than one
pub fn billable_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds().max(1);
    (millis + 59_999) / 60_000
}

/// What happened to the promo code submitted with a finish request
#[derive(Debug, Clone, PartialEq)]
pub enum PromoOutcome {
    /// No code was submitted
    NotRequested,
    /// Code accepted; `discount` is the amount taken off the base price
    Applied {
        promo_id: i64,
        percent: i32,
        discount: Decimal,
    },
    /// Code exists but its expiry date has passed
    Expired,
    /// No active promo matches the code
    Invalid,
}

impl PromoOutcome {
    pub fn discount(&self) -> Decimal {
        match self {
            PromoOutcome::Applied { discount, .. } => *discount,
            _ => Decimal::ZERO,
        }
    }

    pub fn promo_id(&self) -> Option<i64> {
        match self {
            PromoOutcome::Applied { promo_id, .. } => Some(*promo_id),
            _ => None,
        }
    }
}

/// Trim a submitted promo code; blank means no code
pub fn normalize_promo_code(code: Option<&str>) -> Option<&str> {
    code.map(str::trim).filter(|c| !c.is_empty())
}

/// Evaluate the promo found for a submitted code against a base price.
/// `promo` is the active promo matching the code, if any.
pub fn evaluate_promo(promo: Option<&Promo>, base: Decimal, today: NaiveDate) -> PromoOutcome {
    match promo {
        None => PromoOutcome::Invalid,
        Some(promo) if !promo.is_active => PromoOutcome::Invalid,
        Some(promo) if promo.is_expired_on(today) => PromoOutcome::Expired,
        Some(promo) => {
            let percent = promo.discount_percent.clamp(0, 100);
            PromoOutcome::Applied {
                promo_id: promo.id,
                percent,
                discount: base * Decimal::from(percent) / Decimal::from(100),
            }
        }
    }
}

/// Per-minute price of a finished ride
#[derive(Debug, Clone, PartialEq)]
pub struct MinuteQuote {
    pub minutes: i64,
    pub base: Decimal,
    pub promo: PromoOutcome,
    pub total: Decimal,
}

impl MinuteQuote {
    pub fn discount(&self) -> Decimal {
        self.promo.discount()
    }
}

/// Price a ride on the per-minute tariff.
/// The total is never negative and is rounded to cents.
pub fn quote_per_minute(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    promo: PromoOutcome,
) -> MinuteQuote {
    let minutes = billable_minutes(start, end);
    let base = Decimal::from(minutes * PRICE_PER_MINUTE);
    let total = round_money((base - promo.discount()).max(Decimal::ZERO));

    MinuteQuote {
        minutes,
        base,
        promo,
        total,
    }
}

/// Hourly price of a finished ride
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyQuote {
    pub minutes: i64,
    pub hours: i64,
    pub total: Decimal,
}

/// Price a ride on the hourly tariff: whole minutes ridden, rounded up to
/// started hours, times `hourly_rate`. A ride shorter than a minute is free.
pub fn quote_hourly(start: DateTime<Utc>, end: DateTime<Utc>, hourly_rate: Decimal) -> HourlyQuote {
    let minutes = (end - start).num_minutes().max(0);
    let hours = (minutes + 59) / 60;

    HourlyQuote {
        minutes,
        hours,
        total: round_money(Decimal::from(hours) * hourly_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn promo(percent: i32, expiry: Option<NaiveDate>) -> Promo {
        Promo {
            id: 9,
            code: "SPRING".to_string(),
            discount_percent: percent,
            is_active: true,
            expiry_date: expiry,
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_billable_minutes_rounds_up() {
        assert_eq!(billable_minutes(t0(), t0() + Duration::seconds(125)), 3);
        assert_eq!(billable_minutes(t0(), t0() + Duration::seconds(120)), 2);
        assert_eq!(billable_minutes(t0(), t0() + Duration::milliseconds(120_500)), 3);
    }

    #[test]
    fn test_billable_minutes_minimum_one() {
        assert_eq!(billable_minutes(t0(), t0()), 1);
        assert_eq!(billable_minutes(t0(), t0() + Duration::seconds(1)), 1);
        assert_eq!(billable_minutes(t0(), t0() - Duration::seconds(30)), 1);
    }

    #[test]
    fn test_quote_without_promo() {
        let quote = quote_per_minute(t0(), t0() + Duration::seconds(125), PromoOutcome::NotRequested);
        assert_eq!(quote.minutes, 3);
        assert_eq!(quote.base, Decimal::from(15));
        assert_eq!(quote.total, Decimal::from(15));
        assert_eq!(quote.discount(), Decimal::ZERO);
    }

    #[test]
    fn test_ten_percent_promo_on_fifteen() {
        let base = Decimal::from(15);
        let outcome = evaluate_promo(Some(&promo(10, None)), base, today());
        let quote = quote_per_minute(t0(), t0() + Duration::seconds(125), outcome);
        assert_eq!(quote.total, dec("13.50"));
        assert_eq!(quote.total.to_string(), "13.50");
        assert_eq!(quote.promo.promo_id(), Some(9));
    }

    #[test]
    fn test_expired_promo_leaves_total_unchanged() {
        let yesterday = today().pred_opt().unwrap();
        let outcome = evaluate_promo(Some(&promo(50, Some(yesterday))), Decimal::from(15), today());
        assert_eq!(outcome, PromoOutcome::Expired);

        let quote = quote_per_minute(t0(), t0() + Duration::seconds(125), outcome);
        assert_eq!(quote.total, Decimal::from(15));
    }

    #[test]
    fn test_promo_valid_on_expiry_date() {
        let outcome = evaluate_promo(Some(&promo(20, Some(today()))), Decimal::from(10), today());
        assert_eq!(outcome.discount(), Decimal::from(2));
    }

    #[test]
    fn test_unknown_or_inactive_promo_is_invalid() {
        assert_eq!(evaluate_promo(None, Decimal::from(10), today()), PromoOutcome::Invalid);

        let mut inactive = promo(10, None);
        inactive.is_active = false;
        assert_eq!(
            evaluate_promo(Some(&inactive), Decimal::from(10), today()),
            PromoOutcome::Invalid
        );
    }

    #[test]
    fn test_full_discount_never_goes_negative() {
        let outcome = evaluate_promo(Some(&promo(100, None)), Decimal::from(5), today());
        let quote = quote_per_minute(t0(), t0() + Duration::seconds(30), outcome);
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn test_odd_discount_rounds_to_cents() {
        // 7 minutes -> 35, 33% off -> 11.55 discount -> 23.45
        let outcome = evaluate_promo(Some(&promo(33, None)), Decimal::from(35), today());
        let quote = quote_per_minute(t0(), t0() + Duration::seconds(400), outcome);
        assert_eq!(quote.total, dec("23.45"));

        assert_eq!(round_money(dec("1.005")), dec("1.01"));
        assert_eq!(round_money(dec("2.344")), dec("2.34"));
    }

    #[test]
    fn test_normalize_promo_code() {
        assert_eq!(normalize_promo_code(None), None);
        assert_eq!(normalize_promo_code(Some("   ")), None);
        assert_eq!(normalize_promo_code(Some(" spring ")), Some("spring"));
    }

    #[test]
    fn test_hourly_quote() {
        let rate = dec("7.00");
        let q = quote_hourly(t0(), t0() + Duration::minutes(61), rate);
        assert_eq!((q.minutes, q.hours, q.total), (61, 2, dec("14.00")));

        let q = quote_hourly(t0(), t0() + Duration::minutes(60), rate);
        assert_eq!(q.hours, 1);

        let q = quote_hourly(t0(), t0() + Duration::seconds(45), rate);
        assert_eq!((q.hours, q.total), (0, Decimal::ZERO));
    }
}
