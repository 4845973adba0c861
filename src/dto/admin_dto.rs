use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{user::User, wallet::Profile};
use crate::utils::validation::validate_promo_code;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromoRequest {
    #[validate(custom = "validate_promo_code")]
    pub code: String,
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i32>,
    pub is_active: Option<bool>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Subject the identity provider uses for this user; generated when absent
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    pub user: User,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct AssignTechnicianRequest {
    pub user_id: Uuid,
    pub assigned_station_id: Option<i64>,
    pub is_active_on_shift: Option<bool>,
}
