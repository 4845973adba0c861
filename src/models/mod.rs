//! Data models
//!
//! Structs that map one-to-one onto the PostgreSQL schema in `migrations/`.

pub mod promo;
pub mod rental;
pub mod review;
pub mod scooter;
pub mod station;
pub mod technician;
pub mod user;
pub mod wallet;
