//! Wallet models
//!
//! A profile holds the user's balance; a payment is the receipt of one
//! settled rental.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Welcome balance credited when a user is provisioned
pub const DEFAULT_BALANCE: i64 = 500;

/// Balance needed to start a ride
pub const MIN_START_BALANCE: i64 = 100;

/// Payment method recorded for wallet debits
pub const METHOD_BALANCE: &str = "balance";

/// Largest balance `profiles.balance` (NUMERIC(10, 2)) can hold
pub fn max_balance() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// Balance after crediting `amount`, or `None` when it would not fit the column
pub fn balance_after_top_up(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    balance.checked_add(amount).filter(|total| *total <= max_balance())
}

/// Profile - maps to the `profiles` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub balance: Decimal,
}

/// Payment - maps to the `payments` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: Uuid,
    pub rental_id: i64,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub method: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_top_up_within_column_limit() {
        assert_eq!(
            balance_after_top_up(Decimal::from(500), Decimal::from(100_000)),
            Some(Decimal::from(100_500))
        );
        assert_eq!(
            balance_after_top_up(Decimal::from_str("99999899.99").unwrap(), Decimal::from(100)),
            Some(max_balance())
        );
    }

    #[test]
    fn test_top_up_past_column_limit() {
        assert_eq!(balance_after_top_up(Decimal::from_str("99999950.00").unwrap(), Decimal::from(100)), None);
        assert_eq!(balance_after_top_up(max_balance(), Decimal::from_str("0.01").unwrap()), None);
    }
}
