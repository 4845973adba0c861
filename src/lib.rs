//! Scooter rental service
//!
//! Stations and scooter catalog, rental lifecycle with wallet settlement,
//! reviews, a technician panel and superuser exports over a PostgreSQL store.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
