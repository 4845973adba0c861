//! Validation helpers
//!
//! Custom validators plugged into `#[validate(custom = "...")]` attributes.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    static ref PROMO_CODE_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{3,20}$").unwrap();
    static ref SERIAL_NUMBER_RE: Regex = Regex::new(r"^[A-Za-z0-9-]{2,50}$").unwrap();
}

/// Largest single wallet deposit accepted
pub const MAX_TOP_UP: i64 = 100_000;

/// Validate that a string is not blank
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validate a deposit amount: strictly positive and within `MAX_TOP_UP`
pub fn validate_top_up_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &amount.to_string());
        return Err(error);
    }
    if *amount > Decimal::from(MAX_TOP_UP) {
        let mut error = ValidationError::new("range");
        error.add_param("max".into(), &MAX_TOP_UP);
        return Err(error);
    }
    // Cents at most
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new("precision"));
    }
    Ok(())
}

/// Validate a non-negative money value such as an hourly rate
pub fn validate_non_negative_money(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Validate promo code format
pub fn validate_promo_code(code: &str) -> Result<(), ValidationError> {
    if !PROMO_CODE_RE.is_match(code) {
        let mut error = ValidationError::new("promo_code");
        error.add_param("value".into(), &code.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validate scooter serial number format
pub fn validate_serial_number(serial: &str) -> Result<(), ValidationError> {
    if !SERIAL_NUMBER_RE.is_match(serial) {
        return Err(ValidationError::new("serial_number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("great ride").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_top_up_amount() {
        assert!(validate_top_up_amount(&Decimal::from(250)).is_ok());
        assert!(validate_top_up_amount(&Decimal::from_str("99.99").unwrap()).is_ok());
        assert!(validate_top_up_amount(&Decimal::from_str("10.500").unwrap()).is_ok());
        assert!(validate_top_up_amount(&Decimal::ZERO).is_err());
        assert!(validate_top_up_amount(&Decimal::from(-5)).is_err());
        assert!(validate_top_up_amount(&Decimal::from(100_001)).is_err());
        assert!(validate_top_up_amount(&Decimal::from_str("1.005").unwrap()).is_err());
    }

    #[test]
    fn test_validate_promo_code() {
        assert!(validate_promo_code("SUMMER10").is_ok());
        assert!(validate_promo_code("first-ride").is_ok());
        assert!(validate_promo_code("AB").is_err());
        assert!(validate_promo_code("NO SPACES").is_err());
    }

    #[test]
    fn test_validate_serial_number() {
        assert!(validate_serial_number("SC-001").is_ok());
        assert!(validate_serial_number("").is_err());
        assert!(validate_serial_number("bad serial").is_err());
    }

    #[test]
    fn test_validate_non_negative_money() {
        assert!(validate_non_negative_money(&Decimal::from(5)).is_ok());
        assert!(validate_non_negative_money(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_money(&Decimal::from(-1)).is_err());
    }
}
