//! Repositories
//!
//! Read paths live on the `*Repository` structs that own a pool. Writes that
//! must share a transaction are free functions over `&mut PgConnection`.

pub mod promo_repository;
pub mod rental_repository;
pub mod review_repository;
pub mod scooter_repository;
pub mod station_repository;
pub mod technician_repository;
pub mod user_repository;
pub mod wallet_repository;
