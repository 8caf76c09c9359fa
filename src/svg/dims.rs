//! Document dimension resolution.

use serde::{Deserialize, Serialize};

/// Size used when neither the attributes nor the viewBox yield one.
pub const DEFAULT_DIMENSION: f64 = 100.0;

/// Resolved logical width/height of a document. Resolved once before
/// traversal and shared read-only by every bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Resolve document dimensions from the root element's attributes.
///
/// `width`/`height` are read first (unit suffixes like `px` are stripped
/// before the numeric parse). A `viewBox` attribute fills whichever axis is
/// still missing, using its third and fourth components. When both axes
/// remain unresolved the 100×100 default applies, keeping the coverage
/// denominator non-degenerate. Malformed input never fails.
#[must_use]
pub fn resolve(root: &roxmltree::Node<'_, '_>) -> Dimensions {
    let mut width = root.attribute("width").map_or(0.0, numeric_part);
    let mut height = root.attribute("height").map_or(0.0, numeric_part);

    if let Some(view_box) = root.attribute("viewBox") {
        let parts: Vec<f64> = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(super::parse_float_prefix)
            .collect();
        if parts.len() == 4 {
            if width == 0.0 || width.is_nan() {
                width = parts[2];
            }
            if height == 0.0 || height.is_nan() {
                height = parts[3];
            }
        }
    }

    if (width == 0.0 || width.is_nan()) && (height == 0.0 || height.is_nan()) {
        width = DEFAULT_DIMENSION;
        height = DEFAULT_DIMENSION;
    }

    Dimensions { width, height }
}

/// Strip everything but digits and dots, then parse what remains.
/// NaN when nothing numeric is left, so the caller's fallbacks apply.
fn numeric_part(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    super::parse_float_prefix(&cleaned).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_from(svg: &str) -> Dimensions {
        let doc = roxmltree::Document::parse(svg).unwrap();
        resolve(&doc.root_element())
    }

    #[test]
    fn reads_plain_width_height() {
        let dims = resolve_from(r#"<svg width="640" height="480"></svg>"#);
        assert!((dims.width - 640.0).abs() < f64::EPSILON);
        assert!((dims.height - 480.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strips_unit_suffixes() {
        let dims = resolve_from(r#"<svg width="300px" height="150px"></svg>"#);
        assert!((dims.width - 300.0).abs() < f64::EPSILON);
        assert!((dims.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn falls_back_to_view_box() {
        let dims = resolve_from(r#"<svg viewBox="0 0 200 150"></svg>"#);
        assert!((dims.width - 200.0).abs() < f64::EPSILON);
        assert!((dims.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn view_box_accepts_comma_separators() {
        let dims = resolve_from(r#"<svg viewBox="0,0,320,240"></svg>"#);
        assert!((dims.width - 320.0).abs() < f64::EPSILON);
        assert!((dims.height - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn view_box_fills_only_missing_axis() {
        let dims = resolve_from(r#"<svg width="500" viewBox="0 0 200 150"></svg>"#);
        assert!((dims.width - 500.0).abs() < f64::EPSILON);
        assert!((dims.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_when_nothing_resolves() {
        let dims = resolve_from("<svg></svg>");
        assert!((dims.width - DEFAULT_DIMENSION).abs() < f64::EPSILON);
        assert!((dims.height - DEFAULT_DIMENSION).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_attributes_fall_through_to_default() {
        let dims = resolve_from(r#"<svg width="0" height="0"></svg>"#);
        assert!((dims.width - DEFAULT_DIMENSION).abs() < f64::EPSILON);
        assert!((dims.height - DEFAULT_DIMENSION).abs() < f64::EPSILON);
    }

    #[test]
    fn short_view_box_is_ignored() {
        let dims = resolve_from(r#"<svg viewBox="0 0 200"></svg>"#);
        assert!((dims.width - DEFAULT_DIMENSION).abs() < f64::EPSILON);
        assert!((dims.height - DEFAULT_DIMENSION).abs() < f64::EPSILON);
    }

    #[test]
    fn unresolved_single_axis_stays_unresolved() {
        // Only one axis malformed: no default kicks in, the bad axis
        // carries NaN downstream.
        let dims = resolve_from(r#"<svg width="abc" height="50"></svg>"#);
        assert!(dims.width.is_nan());
        assert!((dims.height - 50.0).abs() < f64::EPSILON);
    }
}
