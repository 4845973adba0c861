//! Request and response bodies

pub mod admin_dto;
pub mod catalog_dto;
pub mod common;
pub mod fleet_dto;
pub mod rental_dto;
pub mod review_dto;
pub mod wallet_dto;
