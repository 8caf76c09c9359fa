//! Post-traversal issue and metric derivation.

use super::dims::Dimensions;
use super::{DesignIssue, DesignItem};

/// Issues and coverage derived from a finished item list.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub issues: Vec<DesignIssue>,
    pub coverage_ratio: f64,
}

/// Derive the document-level issue set and coverage ratio.
///
/// Known limitation, kept as an observable contract: the coverage ratio is
/// the raw sum of item areas over the document area. Overlapping items are
/// double-counted and out-of-bounds items contribute their full nominal
/// area, so the ratio can exceed 1.0. It is not a geometric coverage
/// fraction.
#[must_use]
pub fn summarize(items: &[DesignItem], dims: &Dimensions) -> Summary {
    let mut issues = Vec::new();

    if items.is_empty() {
        issues.push(DesignIssue::Empty);
    }
    if items
        .iter()
        .any(|item| item.issue == Some(DesignIssue::OutOfBounds))
    {
        issues.push(DesignIssue::OutOfBounds);
    }

    let total_area: f64 = items.iter().map(|item| item.width * item.height).sum();
    let doc_area = dims.width * dims.height;
    let coverage_ratio = if doc_area > 0.0 {
        total_area / doc_area
    } else {
        0.0
    };

    Summary {
        issues,
        coverage_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(width: f64, height: f64, issue: Option<DesignIssue>) -> DesignItem {
        DesignItem {
            x: 0.0,
            y: 0.0,
            width,
            height,
            fill: "#000000".to_owned(),
            issue,
        }
    }

    #[test]
    fn empty_list_reports_empty_and_zero_coverage() {
        let dims = Dimensions {
            width: 100.0,
            height: 100.0,
        };
        let summary = summarize(&[], &dims);
        assert_eq!(summary.issues, vec![DesignIssue::Empty]);
        assert!((summary.coverage_ratio).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_bounds_aggregates_from_item_flags() {
        let dims = Dimensions {
            width: 100.0,
            height: 100.0,
        };
        let items = vec![
            item(10.0, 10.0, None),
            item(10.0, 10.0, Some(DesignIssue::OutOfBounds)),
        ];
        let summary = summarize(&items, &dims);
        assert_eq!(summary.issues, vec![DesignIssue::OutOfBounds]);
    }

    #[test]
    fn coverage_sums_raw_areas() {
        let dims = Dimensions {
            width: 200.0,
            height: 100.0,
        };
        let items = vec![item(100.0, 50.0, None), item(60.0, 50.0, None)];
        let summary = summarize(&items, &dims);
        assert!((summary.coverage_ratio - 0.4).abs() < 1e-12);
    }

    #[test]
    fn coverage_can_exceed_one() {
        let dims = Dimensions {
            width: 10.0,
            height: 10.0,
        };
        let items = vec![item(10.0, 10.0, None), item(10.0, 10.0, None)];
        let summary = summarize(&items, &dims);
        assert!((summary.coverage_ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_document_area_yields_zero_ratio() {
        let dims = Dimensions {
            width: 0.0,
            height: 100.0,
        };
        let items = vec![item(10.0, 10.0, None)];
        let summary = summarize(&items, &dims);
        assert!((summary.coverage_ratio).abs() < f64::EPSILON);
    }
}
