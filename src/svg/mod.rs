//! SVG design extraction pipeline.
//!
//! Parses an SVG document and extracts the axis-aligned rectangular regions
//! it describes — explicit `<rect>` elements plus `<path>` elements whose
//! drawn coordinates reduce to a non-degenerate bounding box — then derives
//! quality metrics over the extracted set: per-item bounds violations, an
//! emptiness flag, and an area coverage ratio.
//!
//! ERROR HANDLING
//! ==============
//! Only a document that fails to parse as XML at all is an error. Every
//! other anomaly degrades: unparseable numeric attributes coerce to `0`,
//! missing dimensions fall back to the viewBox and then to 100×100,
//! zero-area path boxes are dropped, and over-deep branches stop early
//! while the extraction as a whole still completes.

pub mod dims;
pub mod metrics;
pub mod path;
pub mod walk;

pub use dims::Dimensions;

use serde::{Deserialize, Serialize};

// =============================================================================
// TYPES
// =============================================================================

/// Issue tags describing extraction quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignIssue {
    Empty,
    OutOfBounds,
}

/// One detected rectangular region with position, size and fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignItem {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    /// Set when the item's extent leaves the document bounds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub issue: Option<DesignIssue>,
}

/// Result of extracting one document. Built once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub dimensions: Dimensions,
    /// Items in document order: rect children of a node before its
    /// path-derived boxes, before anything found in descendants.
    pub items: Vec<DesignItem>,
    pub items_count: usize,
    pub coverage_ratio: f64,
    pub issues: Vec<DesignIssue>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Extract rectangular regions and derived metrics from raw SVG text.
///
/// Pure and deterministic: identical input yields an identical
/// [`Extraction`].
///
/// # Errors
///
/// Returns [`ExtractError::Xml`] when the input is not well-formed XML.
pub fn extract(document_text: &str) -> Result<Extraction, ExtractError> {
    let doc = roxmltree::Document::parse(document_text)?;
    let root = doc.root_element();

    let dimensions = dims::resolve(&root);
    let items = walk::collect_items(root, &dimensions);
    let summary = metrics::summarize(&items, &dimensions);

    tracing::debug!(
        items = items.len(),
        coverage = summary.coverage_ratio,
        "extraction complete"
    );

    Ok(Extraction {
        dimensions,
        items_count: items.len(),
        coverage_ratio: summary.coverage_ratio,
        issues: summary.issues,
        items,
    })
}

/// Parse the longest valid float prefix of `s`: optional leading sign,
/// digits, at most one dot. `None` when no prefix parses. This mirrors
/// `parseFloat` so that permissive operand text like `10-20` reads as `10`
/// and `1.5.3` as `1.5`.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'+' | b'-' if i == 0 => {}
            b'.' if !seen_dot => seen_dot = true,
            b'0'..=b'9' => seen_digit = true,
            _ => break,
        }
        end = i + 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
