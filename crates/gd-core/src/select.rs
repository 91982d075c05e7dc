//! Selection resolver: decides which container receives new content and
//! where, relative to that container, the content should land.
//!
//! Resolution never fails — unsupported selections walk a fallback chain
//! that ends at the page root and the viewport center, so placement always
//! has somewhere to go.

use crate::model::{Point, SceneGraph, ViewportState};
use petgraph::graph::NodeIndex;

/// Fixed footprint of a freshly placed icon, in canvas units.
/// Offsets are computed against this so repeated inserts line up.
pub const ICON_FOOTPRINT: f32 = 32.0;

/// Resolve the container new content should be injected into.
///
/// - no selection → page root;
/// - selected node can hold children and is not itself a managed icon → itself;
/// - anything else (managed icon, leaf) → walk up toward the page root.
///
/// The walk skips managed ancestors too, so the result is never a managed
/// icon and icons cannot nest inside one another.
pub fn resolve_injection_target(graph: &SceneGraph, selected: Option<NodeIndex>) -> NodeIndex {
    let Some(mut idx) = selected else {
        return graph.root;
    };

    loop {
        let node = graph.node(idx);
        if !node.is_managed_icon() && (node.kind.supports_children() || idx == graph.root) {
            return idx;
        }
        match graph.parent(idx) {
            Some(parent) => idx = parent,
            None => return graph.root,
        }
    }
}

/// Where, relative to the injection container, the new icon is centered.
///
/// - selected managed icon → immediately to its right, same baseline;
/// - selected container → its own center, container-relative;
/// - selected leaf with geometry → centered on the leaf's bounding box;
/// - nothing usable → center of the current viewport.
pub fn resolve_offset(
    graph: &SceneGraph,
    selected: Option<NodeIndex>,
    viewport: &ViewportState,
) -> Point {
    let half = ICON_FOOTPRINT / 2.0;

    let Some(idx) = selected else {
        return viewport.center();
    };

    let node = graph.node(idx);
    if node.is_managed_icon() {
        return Point::new(node.x + ICON_FOOTPRINT, node.y);
    }

    if node.kind.supports_children() {
        let b = graph.bounds_of(idx);
        return Point::new(b.width / 2.0 - half, b.height / 2.0 - half);
    }

    if node.kind.has_geometry() {
        let b = graph.bounds_of(idx);
        return Point::new(node.x + b.width / 2.0 - half, node.y + b.height / 2.0 - half);
    }

    viewport.center()
}
