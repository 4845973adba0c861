//! Session extractors
//!
//! Handlers declare the session they need as an argument: `Session` for any
//! signed-in user, `SuperuserSession` for administrators and
//! `TechnicianSession` for staff with a technician record.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::{
    models::technician::Technician,
    repositories::technician_repository::TechnicianRepository,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// The user behind a request
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub is_superuser: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

        Ok(Session {
            user_id,
            username: claims.username,
            is_superuser: claims.is_superuser,
        })
    }
}

/// A session whose user is a superuser
#[derive(Debug, Clone)]
pub struct SuperuserSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for SuperuserSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if !session.is_superuser {
            return Err(AppError::Forbidden("Superuser permissions required".to_string()));
        }
        Ok(SuperuserSession(session))
    }
}

/// A session whose user has a technician record
#[derive(Debug, Clone)]
pub struct TechnicianSession {
    pub session: Session,
    pub technician: Technician,
}

#[async_trait]
impl FromRequestParts<AppState> for TechnicianSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        let technician = TechnicianRepository::new(state.pool.clone())
            .find_by_user(session.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Technician access only".to_string()))?;

        Ok(TechnicianSession { session, technician })
    }
}
