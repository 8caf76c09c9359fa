//! Design intake and retrieval routes.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::services::design::{self, DesignError, DesignRow, DesignStatus, DesignSummaryRow};
use crate::state::AppState;
use crate::svg::{self, DesignIssue, DesignItem};

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummaryResponse {
    pub id: Uuid,
    pub filename: String,
    pub status: DesignStatus,
    pub items_count: i32,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn to_summary_response(row: DesignSummaryRow) -> DesignSummaryResponse {
    DesignSummaryResponse {
        id: row.id,
        filename: row.filename,
        status: row.status,
        items_count: row.items_count,
        coverage_ratio: row.coverage_ratio,
        issues: row.issues,
        created_at: row.created_at,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    pub id: Uuid,
    pub filename: String,
    pub file_path: String,
    pub status: DesignStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub svg_width: f64,
    pub svg_height: f64,
    pub items: Vec<DesignItem>,
    pub items_count: i32,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
}

fn to_design_response(row: DesignRow) -> DesignResponse {
    DesignResponse {
        id: row.id,
        filename: row.filename,
        file_path: row.file_path,
        status: row.status,
        created_at: row.created_at,
        svg_width: row.svg_width,
        svg_height: row.svg_height,
        items: row.items,
        items_count: row.items_count,
        coverage_ratio: row.coverage_ratio,
        issues: row.issues,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDesignSummary {
    pub id: Uuid,
    pub filename: String,
    pub status: DesignStatus,
    pub items_count: usize,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub design: UploadDesignSummary,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /upload` — ingest one SVG document (multipart field `file`).
///
/// The raw bytes are stored and a PENDING row created before extraction
/// runs, so a document that fails to parse still leaves an ERROR record.
pub async fn upload_design(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, StatusCode> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("design.svg").to_owned();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }
    let Some((filename, bytes)) = upload else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let stored_name = stored_filename();
    let file_path = state.upload_path(&stored_name);
    tokio::fs::write(&file_path, &bytes).await.map_err(|err| {
        tracing::error!(error = %err, path = %file_path.display(), "failed to store upload");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let id = design::create_pending(&state.pool, &filename, &stored_name)
        .await
        .map_err(design_error_to_status)?;

    let text = String::from_utf8_lossy(&bytes);
    match svg::extract(&text) {
        Ok(extraction) => {
            design::mark_processed(&state.pool, id, &extraction)
                .await
                .map_err(design_error_to_status)?;
            tracing::info!(%id, filename = %filename, items = extraction.items_count, "design processed");

            Ok(Json(UploadResponse {
                success: true,
                design: UploadDesignSummary {
                    id,
                    filename,
                    status: DesignStatus::Processed,
                    items_count: extraction.items_count,
                    coverage_ratio: extraction.coverage_ratio,
                    issues: extraction.issues,
                },
            }))
        }
        Err(err) => {
            tracing::warn!(%id, filename = %filename, error = %err, "design failed extraction");
            design::mark_error(&state.pool, id)
                .await
                .map_err(design_error_to_status)?;
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /api/designs` — list design summaries, newest first.
pub async fn list_designs(
    State(state): State<AppState>,
) -> Result<Json<Vec<DesignSummaryResponse>>, StatusCode> {
    let rows = design::list_designs(&state.pool)
        .await
        .map_err(design_error_to_status)?;
    Ok(Json(rows.into_iter().map(to_summary_response).collect()))
}

/// `GET /api/designs/{id}` — fetch one design with its item payload.
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DesignResponse>, StatusCode> {
    let row = design::get_design(&state.pool, id)
        .await
        .map_err(design_error_to_status)?;
    Ok(Json(to_design_response(row)))
}

/// `DELETE /api/designs/{id}` — remove the record and its stored file.
pub async fn delete_design(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let stored_name = design::delete_design(&state.pool, id)
        .await
        .map_err(design_error_to_status)?;

    // Unlink failures are logged, not surfaced: the record is already gone.
    let path = state.upload_path(&stored_name);
    if let Err(err) = tokio::fs::remove_file(&path).await {
        tracing::warn!(error = %err, path = %path.display(), "failed to delete stored file");
    }

    Ok(Json(
        serde_json::json!({ "message": "Design deleted successfully" }),
    ))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

/// `GET /health` — liveness plus a database connectivity probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(HealthResponse {
        status: "ok",
        server: "running",
        database,
        timestamp,
    })
}

// =============================================================================
// HELPERS
// =============================================================================

/// Opaque stored filename for an upload; the client filename is untrusted
/// and only kept as display metadata.
fn stored_filename() -> String {
    format!("{}.svg", Uuid::new_v4())
}

pub(crate) fn design_error_to_status(err: DesignError) -> StatusCode {
    match err {
        DesignError::NotFound(_) => StatusCode::NOT_FOUND,
        DesignError::Database(_) | DesignError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "designs_test.rs"]
mod tests;
