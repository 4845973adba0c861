//! Domain services
//!
//! Pricing and precondition rules are pure functions over loaded records;
//! provisioning and export talk to the database.

pub mod export;
pub mod fleet_rules;
pub mod pricing;
pub mod provisioning;
pub mod rental_rules;
