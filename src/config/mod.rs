//! Project configuration
//!
//! Database settings, environment variables and the pricing policy.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
