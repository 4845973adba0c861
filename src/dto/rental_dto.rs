use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{rental::Rental, wallet::Payment};

#[derive(Debug, Deserialize, Validate)]
pub struct FinishRentalRequest {
    pub end_station: i64,
    #[validate(length(max = 50))]
    pub promo_code: Option<String>,
}

/// Breakdown of a closed rental
#[derive(Debug, Serialize)]
pub struct FinishRentalResponse {
    pub rental: Rental,
    pub payment: Option<Payment>,
    pub minutes: i64,
    pub base_cost: Decimal,
    pub discount: Decimal,
    pub total_cost: Decimal,
    pub balance: Decimal,
}
