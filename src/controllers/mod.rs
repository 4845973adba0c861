//! Controllers
//!
//! One controller per area. Each owns the repositories it needs and returns
//! DTOs; routing and extraction stay in `routes`.

pub mod admin_controller;
pub mod catalog_controller;
pub mod export_controller;
pub mod rental_controller;
pub mod review_controller;
pub mod tech_controller;
pub mod wallet_controller;
