use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{rental::Rental, wallet::Payment};
use crate::utils::validation::validate_top_up_amount;

#[derive(Debug, Deserialize, Validate)]
pub struct TopUpRequest {
    #[validate(custom = "validate_top_up_amount")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub username: String,
    pub balance: Decimal,
    pub rentals: Vec<Rental>,
    pub payments: Vec<Payment>,
}
