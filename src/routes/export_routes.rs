use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::controllers::export_controller::{ExportController, ExportFormat};
use crate::middleware::auth::SuperuserSession;
use crate::services::export::ExportEntity;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_export_router() -> Router<AppState> {
    Router::new()
        .route("/export/csv/", get(export_scooters_csv))
        .route("/export/json/", get(export_scooters_json))
        .route("/export/csv/:entity", get(export_csv))
        .route("/export/json/:entity", get(export_json))
}

async fn export_csv(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Path(entity): Path<String>,
) -> Result<Response, AppError> {
    export(state, &entity, ExportFormat::Csv).await
}

async fn export_json(
    State(state): State<AppState>,
    _admin: SuperuserSession,
    Path(entity): Path<String>,
) -> Result<Response, AppError> {
    export(state, &entity, ExportFormat::Json).await
}

async fn export_scooters_csv(State(state): State<AppState>, _admin: SuperuserSession) -> Result<Response, AppError> {
    export_entity(state, ExportEntity::ScooterSummary, ExportFormat::Csv).await
}

async fn export_scooters_json(State(state): State<AppState>, _admin: SuperuserSession) -> Result<Response, AppError> {
    export_entity(state, ExportEntity::ScooterSummary, ExportFormat::Json).await
}

async fn export(state: AppState, entity: &str, format: ExportFormat) -> Result<Response, AppError> {
    match entity.parse() {
        Ok(entity) => export_entity(state, entity, format).await,
        Err(_) => Ok((StatusCode::NOT_FOUND, "model not found").into_response()),
    }
}

async fn export_entity(state: AppState, entity: ExportEntity, format: ExportFormat) -> Result<Response, AppError> {
    let file = ExportController::new(state.pool.clone()).export(entity, format).await?;
    let disposition = format!("attachment; filename=\"{}\"", file.filename);

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}
