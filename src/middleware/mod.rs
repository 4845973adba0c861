//! Request middleware and extractors

pub mod auth;
pub mod cors;

pub use auth::{Session, SuperuserSession, TechnicianSession};
pub use cors::cors_layer;
