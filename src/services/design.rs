//! Design record store — CRUD and lifecycle over Postgres.
//!
//! DESIGN
//! ======
//! A design row is created PENDING before extraction runs, then promoted
//! to PROCESSED with the extraction fields attached, or demoted to ERROR
//! when the document cannot be parsed. Analysis fields keep their zero
//! defaults in the ERROR state, so every upload leaves an inspectable row.

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::svg::{DesignIssue, DesignItem, Extraction};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("design not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored design payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Lifecycle status of a design record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignStatus {
    Pending,
    Processed,
    Error,
}

impl DesignStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processed => "PROCESSED",
            Self::Error => "ERROR",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "PROCESSED" => Some(Self::Processed),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Full design row, item payload included.
#[derive(Debug, Clone)]
pub struct DesignRow {
    pub id: Uuid,
    pub filename: String,
    pub file_path: String,
    pub status: DesignStatus,
    pub created_at: OffsetDateTime,
    pub svg_width: f64,
    pub svg_height: f64,
    pub items: Vec<DesignItem>,
    pub items_count: i32,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
}

/// Summary row for list views (no item payload).
#[derive(Debug, Clone)]
pub struct DesignSummaryRow {
    pub id: Uuid,
    pub filename: String,
    pub status: DesignStatus,
    pub created_at: OffsetDateTime,
    pub items_count: i32,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Insert a new PENDING design row and return its id.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_pending(
    pool: &PgPool,
    filename: &str,
    file_path: &str,
) -> Result<Uuid, DesignError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO designs (id, filename, file_path, status) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(filename)
        .bind(file_path)
        .bind(DesignStatus::Pending.as_str())
        .execute(pool)
        .await?;
    Ok(id)
}

/// Promote a design to PROCESSED, attaching the extraction results.
///
/// # Errors
///
/// Returns `NotFound` if the row vanished, or a database error.
pub async fn mark_processed(
    pool: &PgPool,
    id: Uuid,
    extraction: &Extraction,
) -> Result<(), DesignError> {
    let items = serde_json::to_value(&extraction.items)?;
    let issues = serde_json::to_value(&extraction.issues)?;

    let result = sqlx::query(
        "UPDATE designs
         SET status = $2, svg_width = $3, svg_height = $4, items = $5,
             items_count = $6, coverage_ratio = $7, issues = $8
         WHERE id = $1",
    )
    .bind(id)
    .bind(DesignStatus::Processed.as_str())
    .bind(extraction.dimensions.width)
    .bind(extraction.dimensions.height)
    .bind(items)
    .bind(i32::try_from(extraction.items_count).unwrap_or(i32::MAX))
    .bind(extraction.coverage_ratio)
    .bind(issues)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DesignError::NotFound(id));
    }
    Ok(())
}

/// Demote a design to ERROR after a failed extraction.
///
/// # Errors
///
/// Returns `NotFound` if the row vanished, or a database error.
pub async fn mark_error(pool: &PgPool, id: Uuid) -> Result<(), DesignError> {
    let result = sqlx::query("UPDATE designs SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(DesignStatus::Error.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DesignError::NotFound(id));
    }
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

/// List design summaries, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails, or `Corrupt` if a stored
/// issues payload no longer deserializes.
pub async fn list_designs(pool: &PgPool) -> Result<Vec<DesignSummaryRow>, DesignError> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, OffsetDateTime, i32, f64, serde_json::Value)>(
        "SELECT id, filename, status, created_at, items_count, coverage_ratio, issues
         FROM designs ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(
            |(id, filename, status, created_at, items_count, coverage_ratio, issues)| {
                Ok(DesignSummaryRow {
                    id,
                    filename,
                    status: parse_status(&status),
                    created_at,
                    items_count,
                    coverage_ratio,
                    issues: serde_json::from_value(issues)?,
                })
            },
        )
        .collect()
}

/// Fetch one full design row.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, a database error, or `Corrupt`
/// if a stored payload no longer deserializes.
pub async fn get_design(pool: &PgPool, id: Uuid) -> Result<DesignRow, DesignError> {
    #[allow(clippy::type_complexity)]
    let row = sqlx::query_as::<
        _,
        (
            Uuid,
            String,
            String,
            String,
            OffsetDateTime,
            f64,
            f64,
            serde_json::Value,
            i32,
            f64,
            serde_json::Value,
        ),
    >(
        "SELECT id, filename, file_path, status, created_at, svg_width, svg_height,
                items, items_count, coverage_ratio, issues
         FROM designs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DesignError::NotFound(id))?;

    let (
        id,
        filename,
        file_path,
        status,
        created_at,
        svg_width,
        svg_height,
        items,
        items_count,
        coverage_ratio,
        issues,
    ) = row;

    Ok(DesignRow {
        id,
        filename,
        file_path,
        status: parse_status(&status),
        created_at,
        svg_width,
        svg_height,
        items: serde_json::from_value(items)?,
        items_count,
        coverage_ratio,
        issues: serde_json::from_value(issues)?,
    })
}

/// Delete a design row, returning its stored file path for cleanup.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn delete_design(pool: &PgPool, id: Uuid) -> Result<String, DesignError> {
    let row = sqlx::query_as::<_, (String,)>("DELETE FROM designs WHERE id = $1 RETURNING file_path")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DesignError::NotFound(id))?;
    Ok(row.0)
}

/// Statuses are written exclusively by this module, so an unknown value
/// means the row was tampered with; read it as ERROR rather than failing.
fn parse_status(raw: &str) -> DesignStatus {
    DesignStatus::from_str(raw).unwrap_or(DesignStatus::Error)
}

#[cfg(test)]
#[path = "design_test.rs"]
mod tests;
