//! Structural traversal of the parsed document tree.
//!
//! DESIGN
//! ======
//! Depth-first dispatch over rect, path, group and nested-document
//! children. The walker owns the accumulating item list plus a visited set
//! of arena node ids, so traversal work is bounded by the node count even
//! if the parser ever hands back aliased nodes, and a depth ceiling stops
//! runaway branches without failing the extraction.

use std::collections::HashSet;

use roxmltree::{Node, NodeId};

use super::dims::Dimensions;
use super::path;
use super::{DesignIssue, DesignItem};

const MAX_RECURSION_DEPTH: usize = 100;

const DEFAULT_RECT_FILL: &str = "#000000";
const DEFAULT_PATH_FILL: &str = "transparent";

/// Collect every rectangular item under `root`, in document order: rect
/// children of a node first, then its path-derived boxes, then group
/// descendants, then nested documents.
#[must_use]
pub fn collect_items(root: Node<'_, '_>, dims: &Dimensions) -> Vec<DesignItem> {
    let mut walker = Walker {
        dims,
        visited: HashSet::new(),
        items: Vec::new(),
    };
    walker.walk(root, 0);
    walker.items
}

struct Walker<'a> {
    dims: &'a Dimensions,
    /// Arena ids of nodes already dispatched.
    visited: HashSet<NodeId>,
    items: Vec<DesignItem>,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node<'_, '_>, depth: usize) {
        if depth > MAX_RECURSION_DEPTH {
            tracing::warn!(depth, "max recursion depth reached, stopping branch");
            return;
        }
        if !self.visited.insert(node.id()) {
            return;
        }

        for rect in children_named(node, "rect") {
            self.push_rect(rect);
        }
        for path_node in children_named(node, "path") {
            self.push_path(path_node);
        }
        for group in children_named(node, "g") {
            self.walk(group, depth + 1);
        }
        // Nested documents count only below the root element.
        if depth > 0 {
            for nested in children_named(node, "svg") {
                self.walk(nested, depth + 1);
            }
        }
    }

    fn push_rect(&mut self, node: Node<'_, '_>) {
        let x = float_attr(node, "x");
        let y = float_attr(node, "y");
        let width = float_attr(node, "width");
        let height = float_attr(node, "height");
        let fill = node
            .attribute("fill")
            .unwrap_or(DEFAULT_RECT_FILL)
            .to_owned();
        self.push_item(x, y, width, height, fill);
    }

    fn push_path(&mut self, node: Node<'_, '_>) {
        let data = node.attribute("d").unwrap_or("");
        let fill = node
            .attribute("fill")
            .or_else(|| node.attribute("stroke"))
            .unwrap_or(DEFAULT_PATH_FILL)
            .to_owned();

        let Some(bbox) = path::bounding_box(data) else {
            return;
        };
        // A single point or an axis-aligned segment is not a region.
        if bbox.width <= 0.0 || bbox.height <= 0.0 {
            return;
        }
        self.push_item(bbox.x, bbox.y, bbox.width, bbox.height, fill);
    }

    fn push_item(&mut self, x: f64, y: f64, width: f64, height: f64, fill: String) {
        let out_of_bounds = x < 0.0
            || y < 0.0
            || x + width > self.dims.width
            || y + height > self.dims.height;

        self.items.push(DesignItem {
            x,
            y,
            width,
            height,
            fill,
            issue: out_of_bounds.then_some(DesignIssue::OutOfBounds),
        });
    }
}

fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// Numeric attribute with the default-and-coerce policy: absent or
/// unparseable reads as `0`.
fn float_attr(node: Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(super::parse_float_prefix)
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
