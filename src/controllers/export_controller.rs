use sqlx::PgPool;
use tracing::info;

use crate::services::export::{render_csv, render_json, ExportEntity};
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// A rendered export ready to be sent as an attachment
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

pub struct ExportController {
    pool: PgPool,
}

impl ExportController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn export(&self, entity: ExportEntity, format: ExportFormat) -> Result<ExportFile, AppError> {
        let records = entity.fetch(&self.pool).await?;
        let body = match format {
            ExportFormat::Csv => render_csv(entity.columns(), &records),
            ExportFormat::Json => render_json(&records)?,
        };

        info!("📤 Exported {} {} records as {}", records.len(), entity.as_str(), format.extension());

        Ok(ExportFile {
            filename: format!("{}.{}", entity.as_str(), format.extension()),
            content_type: format.content_type(),
            body,
        })
    }
}
