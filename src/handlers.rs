use crate::config::Config;
use crate::db_storage::ReportStorage;
use crate::errors::AppError;
use crate::models::{StoredReport, UploadResponse};
use crate::normalizer::parse_credit_report;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use moka::future::Cache;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Multipart field carrying the report document.
pub const UPLOAD_FIELD: &str = "file";

const XML_MEDIA_TYPES: [&str; 2] = ["text/xml", "application/xml"];

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Stored reports by id. Reports never change once stored.
    pub report_cache: Cache<Uuid, StoredReport>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/upload/xml
///
/// Accepts a multipart upload with the bureau XML in the `file` field, parses
/// it into the canonical report and stores it.
///
/// # Returns
///
/// * `Result<Json<UploadResponse>, AppError>` - The id of the stored report, or
///   400 (no file), 413 (too large), 415 (not XML), 422 (unparseable).
pub async fn upload_credit_report(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let document = read_xml_upload(&mut multipart, state.config.max_upload_bytes).await?;
    tracing::info!("POST /upload/xml - {} bytes received", document.len());

    let report = tokio::task::spawn_blocking(move || parse_credit_report(document))
        .await
        .map_err(|e| AppError::InternalError(format!("Report parsing task failed: {}", e)))??;

    let storage = ReportStorage::new(state.db.clone());
    let stored = storage.store_report(&report).await?;
    state.report_cache.insert(stored.id, stored.clone()).await;

    Ok(Json(UploadResponse {
        message: "Report processed and saved".to_string(),
        id: stored.id,
    }))
}

/// GET /api/v1/report
///
/// Lists all stored reports, newest first.
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredReport>>, AppError> {
    let storage = ReportStorage::new(state.db.clone());
    let reports = storage.list_reports().await?;
    tracing::info!("GET /report - {} reports", reports.len());
    Ok(Json(reports))
}

/// GET /api/v1/report/:id
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredReport>, AppError> {
    if let Some(cached) = state.report_cache.get(&id).await {
        tracing::debug!("Report {} served from cache", id);
        return Ok(Json(cached));
    }

    let storage = ReportStorage::new(state.db.clone());
    let report = storage
        .get_report(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    state.report_cache.insert(id, report.clone()).await;
    Ok(Json(report))
}

/// Reads the `file` field, enforcing the XML media type and size limit.
async fn read_xml_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Vec<u8>, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if !is_xml_media_type(field.content_type()) {
            tracing::warn!(
                "Rejected upload with content type {:?}",
                field.content_type()
            );
            return Err(AppError::UnsupportedMediaType(
                "Only XML files are allowed".to_string(),
            ));
        }

        let mut document = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if document.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "File exceeds the {} byte limit",
                    max_bytes
                )));
            }
            document.extend_from_slice(&chunk);
        }
        return Ok(document);
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Whether a part's content type is an XML media type. Parameters such as
/// `charset` are ignored and the comparison is case-insensitive.
pub fn is_xml_media_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    XML_MEDIA_TYPES.contains(&essence.as_str())
}
