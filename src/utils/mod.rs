//! Shared utilities
//!
//! Error handling, validation and JWT helpers.

pub mod errors;
pub mod jwt;
pub mod validation;
