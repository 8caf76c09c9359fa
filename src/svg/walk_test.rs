//! Tests for the structural walker.

use std::collections::HashSet;

use super::*;

const DIMS: Dimensions = Dimensions {
    width: 100.0,
    height: 100.0,
};

fn collect(svg: &str) -> Vec<DesignItem> {
    let doc = roxmltree::Document::parse(svg).unwrap();
    collect_items(doc.root_element(), &DIMS)
}

#[test]
fn extracts_rect_children() {
    let items = collect(r##"<svg><rect x="10" y="20" width="30" height="40" fill="#abc"/></svg>"##);
    assert_eq!(items.len(), 1);
    assert!((items[0].x - 10.0).abs() < f64::EPSILON);
    assert!((items[0].y - 20.0).abs() < f64::EPSILON);
    assert!((items[0].width - 30.0).abs() < f64::EPSILON);
    assert!((items[0].height - 40.0).abs() < f64::EPSILON);
    assert_eq!(items[0].fill, "#abc");
    assert!(items[0].issue.is_none());
}

#[test]
fn rect_attributes_default_to_zero_and_black() {
    let items = collect("<svg><rect/></svg>");
    assert_eq!(items.len(), 1);
    assert!((items[0].x).abs() < f64::EPSILON);
    assert!((items[0].width).abs() < f64::EPSILON);
    assert_eq!(items[0].fill, "#000000");
}

#[test]
fn rect_with_unparseable_size_coerces_to_zero() {
    let items = collect(r#"<svg><rect x="oops" width="wide" height="9"/></svg>"#);
    assert_eq!(items.len(), 1);
    assert!((items[0].x).abs() < f64::EPSILON);
    assert!((items[0].width).abs() < f64::EPSILON);
    assert!((items[0].height - 9.0).abs() < f64::EPSILON);
}

#[test]
fn path_derives_box_with_fill_chain() {
    let items =
        collect(r##"<svg><path d="M10 10 L50 10 L50 40 L10 40 Z" stroke="#f00"/></svg>"##);
    assert_eq!(items.len(), 1);
    assert!((items[0].x - 10.0).abs() < f64::EPSILON);
    assert!((items[0].width - 40.0).abs() < f64::EPSILON);
    assert!((items[0].height - 30.0).abs() < f64::EPSILON);
    assert_eq!(items[0].fill, "#f00");
}

#[test]
fn path_fill_wins_over_stroke() {
    let items =
        collect(r##"<svg><path d="M0 0 L10 10 L0 10 Z" fill="#0f0" stroke="#f00"/></svg>"##);
    assert_eq!(items[0].fill, "#0f0");
}

#[test]
fn path_without_paint_defaults_to_transparent() {
    let items = collect(r#"<svg><path d="M0 0 L10 10 L0 10 Z"/></svg>"#);
    assert_eq!(items[0].fill, "transparent");
}

#[test]
fn degenerate_paths_are_dropped() {
    let items = collect(r#"<svg><path d="M5 5"/><path d="M0 0 L10 0"/><path d="M0 0 V10"/></svg>"#);
    assert!(items.is_empty());
}

#[test]
fn pathless_path_element_is_dropped() {
    let items = collect("<svg><path/></svg>");
    assert!(items.is_empty());
}

#[test]
fn out_of_bounds_flags_each_violated_edge() {
    let items = collect(
        r#"<svg>
            <rect x="-1" y="0" width="10" height="10"/>
            <rect x="0" y="-1" width="10" height="10"/>
            <rect x="95" y="0" width="10" height="10"/>
            <rect x="0" y="95" width="10" height="10"/>
            <rect x="0" y="0" width="100" height="100"/>
        </svg>"#,
    );
    assert_eq!(items.len(), 5);
    for item in &items[..4] {
        assert_eq!(item.issue, Some(DesignIssue::OutOfBounds));
    }
    // Exactly filling the canvas is in bounds.
    assert!(items[4].issue.is_none());
}

#[test]
fn emission_order_is_rects_paths_groups_nested() {
    let items = collect(
        r#"<svg>
            <path d="M0 0 L1 1 L0 1 Z" fill="second"/>
            <g><rect width="3" height="3" fill="third"/><svg><rect width="4" height="4" fill="fourth"/></svg></g>
            <rect width="1" height="1" fill="first"/>
        </svg>"#,
    );
    let fills: Vec<&str> = items.iter().map(|item| item.fill.as_str()).collect();
    assert_eq!(fills, ["first", "second", "third", "fourth"]);
}

#[test]
fn groups_recurse_depth_first() {
    let items = collect(
        r#"<svg>
            <g><g><rect width="1" height="1" fill="a"/></g></g>
            <g><rect width="1" height="1" fill="b"/></g>
        </svg>"#,
    );
    let fills: Vec<&str> = items.iter().map(|item| item.fill.as_str()).collect();
    assert_eq!(fills, ["a", "b"]);
}

#[test]
fn nested_svg_under_root_is_not_traversed() {
    let items = collect(r#"<svg><svg><rect width="5" height="5"/></svg></svg>"#);
    assert!(items.is_empty());
}

#[test]
fn nested_svg_below_a_group_is_traversed() {
    let items = collect(r#"<svg><g><svg><rect width="5" height="5"/></svg></g></svg>"#);
    assert_eq!(items.len(), 1);
}

#[test]
fn namespaced_documents_match_on_local_names() {
    let items = collect(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="5" height="5"/></svg>"#,
    );
    assert_eq!(items.len(), 1);
}

#[test]
fn depth_ceiling_stops_runaway_branches() {
    let mut text = String::from(r#"<svg width="500" height="500">"#);
    for _ in 0..120 {
        text.push_str("<g>");
    }
    text.push_str(r#"<rect width="10" height="10"/>"#);
    for _ in 0..120 {
        text.push_str("</g>");
    }
    text.push_str("</svg>");

    // Terminates, and the over-deep rect is simply not reached.
    let items = collect(&text);
    assert!(items.is_empty());
}

#[test]
fn rect_at_the_ceiling_is_still_extracted() {
    let mut text = String::from(r#"<svg width="500" height="500">"#);
    for _ in 0..100 {
        text.push_str("<g>");
    }
    text.push_str(r#"<rect width="10" height="10"/>"#);
    for _ in 0..100 {
        text.push_str("</g>");
    }
    text.push_str("</svg>");

    let items = collect(&text);
    assert_eq!(items.len(), 1);
}

#[test]
fn identity_guard_skips_revisited_nodes() {
    let doc = roxmltree::Document::parse(r#"<svg><rect width="10" height="10"/></svg>"#).unwrap();
    let mut walker = Walker {
        dims: &DIMS,
        visited: HashSet::new(),
        items: Vec::new(),
    };
    walker.walk(doc.root_element(), 0);
    // A second visit of the same node instance must be a no-op.
    walker.walk(doc.root_element(), 0);
    assert_eq!(walker.items.len(), 1);
}
