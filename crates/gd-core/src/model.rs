//! Core scene-graph data model for the host canvas document.
//!
//! The document is a DAG (Directed Acyclic Graph) where nodes represent
//! canvas elements (pages, frames, groups, components, vector shapes) and
//! edges represent parent→child containment. The host's node-type hierarchy
//! is modeled as a closed `NodeKind` enum with capability predicates
//! ("can hold children", "has geometry") — placement logic dispatches on
//! capabilities, never on type names.

use crate::id::NodeId;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plugin-data key tagging a node as a managed icon instance.
pub const MANAGED_ICON_KEY: &str = "gd.icon";

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point, in whatever space the context says (canvas units or screen px).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ─── Viewport ────────────────────────────────────────────────────────────

/// Read-only snapshot of the host viewport: the visible canvas-space
/// rectangle and the zoom factor mapping canvas units to screen pixels.
///
/// Invariant: `zoom > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub bounds: Rect,
    pub zoom: f32,
}

impl ViewportState {
    /// Center of the visible canvas area, in canvas units.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            bounds: Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
            },
            zoom: 1.0,
        }
    }
}

// ─── Node kinds ──────────────────────────────────────────────────────────

/// The node kinds in the host scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of the document — the current page.
    Page,

    /// Visible container with declared size and optional clipping.
    Frame { width: f32, height: f32, clip: bool },

    /// Container that auto-sizes to the union of its children.
    Group,

    /// Reusable component definition — a container with declared size.
    Component { width: f32, height: f32 },

    /// Vector shape (imported path outline). Leaf.
    Vector { width: f32, height: f32 },

    /// Text label. Leaf.
    Text { content: String },
}

impl NodeKind {
    /// Whether nodes of this kind can hold children.
    ///
    /// The page is deliberately excluded: it is the root container and is
    /// reached through the injection fallback chain, never selected as a
    /// direct target.
    pub fn supports_children(&self) -> bool {
        matches!(
            self,
            Self::Group | Self::Frame { .. } | Self::Component { .. }
        )
    }

    /// Whether this kind carries a bounding box of its own.
    pub fn has_geometry(&self) -> bool {
        !matches!(self, Self::Page)
    }

    /// The declared (intrinsic) size, before any union with children.
    fn intrinsic_size(&self) -> (f32, f32) {
        match self {
            Self::Frame { width, height, .. } => (*width, *height),
            Self::Component { width, height } => (*width, *height),
            Self::Vector { width, height } => (*width, *height),
            // Rough estimate: 8px per char, 20px line. Real text metrics live in the host.
            Self::Text { content } => (content.len() as f32 * 8.0, 20.0),
            Self::Group => (0.0, 0.0), // Auto-sized: union of children
            Self::Page => (0.0, 0.0),
        }
    }
}

// ─── Scene node ──────────────────────────────────────────────────────────

/// A single node in the scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    /// Stable node id. Imported nodes get auto ids (`icon_N`, `group_N`).
    pub id: NodeId,

    /// User-visible layer name.
    pub name: String,

    /// What kind of element this is.
    pub kind: NodeKind,

    /// Position in canvas space (top-left corner).
    pub x: f32,
    pub y: f32,

    /// Lock the aspect ratio when the host resizes this node.
    pub constrain_proportions: bool,

    /// Persistent opaque tags, keyed by plugin-chosen strings.
    /// Survives document reloads; invisible to the user.
    plugin_data: HashMap<String, String>,
}

impl SceneNode {
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            x: 0.0,
            y: 0.0,
            constrain_proportions: false,
            plugin_data: HashMap::new(),
        }
    }

    /// Attach a persistent opaque tag.
    pub fn set_plugin_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.plugin_data.insert(key.into(), value.into());
    }

    /// Read back a persistent tag.
    pub fn plugin_data(&self, key: &str) -> Option<&str> {
        self.plugin_data.get(key).map(String::as_str)
    }

    /// Whether this node is an icon instance this plugin placed and owns.
    pub fn is_managed_icon(&self) -> bool {
        self.plugin_data(MANAGED_ICON_KEY) == Some("true")
    }

    /// Tag this node as a managed icon instance.
    pub fn mark_managed_icon(&mut self) {
        self.set_plugin_data(MANAGED_ICON_KEY, "true");
    }
}

// ─── Scene graph ─────────────────────────────────────────────────────────

/// The host document — a DAG of `SceneNode` values rooted at a page.
///
/// Edges go from parent → child.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// The underlying directed graph.
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The root page index.
    pub root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    pub id_index: HashMap<NodeId, NodeIndex>,
}

impl SceneGraph {
    /// Create a new document with an empty root page.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = NodeId::with_prefix("page");
        let root = graph.add_node(SceneNode::new(root_id, "Page 1", NodeKind::Page));

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
        }
    }

    /// Add a node as a child of `parent`. Returns the new node's index.
    pub fn add_node(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Remove a single node, keeping the `id_index` synchronized.
    /// Children (if any) are orphaned — callers re-parent them first.
    pub fn remove_node(&mut self, idx: NodeIndex) -> Option<SceneNode> {
        let removed = self.graph.remove_node(idx);
        if let Some(removed_node) = &removed {
            self.id_index.remove(&removed_node.id);
        }
        removed
    }

    /// Remove a node and every descendant under it.
    pub fn remove_subtree(&mut self, idx: NodeIndex) {
        let mut work = vec![idx];
        while let Some(current) = work.pop() {
            work.extend(self.children(current));
            self.remove_node(current);
        }
    }

    /// Look up a node by id.
    pub fn get_by_id(&self, id: NodeId) -> Option<&SceneNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Look up a node mutably by id.
    pub fn get_by_id_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    /// Get the index for a NodeId.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Borrow the node at `idx`.
    pub fn node(&self, idx: NodeIndex) -> &SceneNode {
        &self.graph[idx]
    }

    /// Mutably borrow the node at `idx`.
    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut SceneNode {
        &mut self.graph[idx]
    }

    /// Get the parent index of a node.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Get children of a node.
    ///
    /// Sorts by `NodeIndex` so the result is deterministic regardless of
    /// how `petgraph` iterates its adjacency list on different targets.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Reparent a node to a new parent.
    pub fn reparent_node(&mut self, child: NodeIndex, new_parent: NodeIndex) {
        if let Some(old_parent) = self.parent(child)
            && let Some(edge) = self.graph.find_edge(old_parent, child)
        {
            self.graph.remove_edge(edge);
        }
        self.graph.add_edge(new_parent, child, ());
    }

    /// Gather `nodes` under a fresh group inside `parent`.
    ///
    /// Mirrors the host's group operation: the group is created empty and
    /// each node is re-parented into it in the given order.
    pub fn group_nodes(&mut self, nodes: &[NodeIndex], parent: NodeIndex, name: &str) -> NodeIndex {
        let group = self.add_node(
            parent,
            SceneNode::new(NodeId::with_prefix("group"), name, NodeKind::Group),
        );
        for &node in nodes {
            self.reparent_node(node, group);
        }
        group
    }

    /// Bounding box of a node in canvas space.
    ///
    /// Containers without declared size (groups, pages) take the union of
    /// their children; an empty container is a zero-size rect at its
    /// position.
    pub fn bounds_of(&self, idx: NodeIndex) -> Rect {
        let node = &self.graph[idx];
        let (w, h) = node.kind.intrinsic_size();
        if !matches!(node.kind, NodeKind::Group | NodeKind::Page) {
            return Rect {
                x: node.x,
                y: node.y,
                width: w,
                height: h,
            };
        }

        let children = self.children(idx);
        if children.is_empty() {
            return Rect {
                x: node.x,
                y: node.y,
                width: 0.0,
                height: 0.0,
            };
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for child in children {
            let b = self.bounds_of(child);
            min_x = min_x.min(b.x);
            min_y = min_y.min(b.y);
            max_x = max_x.max(b.x + b.width);
            max_y = max_y.max(b.y + b.height);
        }

        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vector(name: &str, w: f32, h: f32) -> SceneNode {
        SceneNode::new(
            NodeId::with_prefix("vector"),
            name,
            NodeKind::Vector {
                width: w,
                height: h,
            },
        )
    }

    #[test]
    fn scene_graph_basics() {
        let mut sg = SceneGraph::new();
        let idx = sg.add_node(sg.root, vector("stroke", 24.0, 24.0));

        assert_eq!(sg.children(sg.root), vec![idx]);
        assert_eq!(sg.parent(idx), Some(sg.root));
        assert_eq!(sg.node(idx).name, "stroke");
    }

    #[test]
    fn capability_predicates() {
        assert!(NodeKind::Group.supports_children());
        assert!(
            NodeKind::Frame {
                width: 10.0,
                height: 10.0,
                clip: false
            }
            .supports_children()
        );
        assert!(
            NodeKind::Component {
                width: 10.0,
                height: 10.0
            }
            .supports_children()
        );
        assert!(
            !NodeKind::Vector {
                width: 1.0,
                height: 1.0
            }
            .supports_children()
        );
        assert!(!NodeKind::Page.supports_children());

        assert!(!NodeKind::Page.has_geometry());
        assert!(NodeKind::Group.has_geometry());
    }

    #[test]
    fn plugin_data_tags_persist() {
        let mut node = vector("gear", 24.0, 24.0);
        assert!(!node.is_managed_icon());

        node.mark_managed_icon();
        assert!(node.is_managed_icon());
        assert_eq!(node.plugin_data(MANAGED_ICON_KEY), Some("true"));
        assert_eq!(node.plugin_data("unrelated"), None);
    }

    #[test]
    fn group_nodes_reparents_in_order() {
        let mut sg = SceneGraph::new();
        let a = sg.add_node(sg.root, vector("a", 4.0, 4.0));
        let b = sg.add_node(sg.root, vector("b", 4.0, 4.0));

        let group = sg.group_nodes(&[a, b], sg.root, "pair");

        assert_eq!(sg.children(sg.root), vec![group]);
        assert_eq!(sg.children(group), vec![a, b]);
        assert_eq!(sg.parent(a), Some(group));
    }

    #[test]
    fn group_bounds_union_children() {
        let mut sg = SceneGraph::new();
        let group = sg.add_node(
            sg.root,
            SceneNode::new(NodeId::with_prefix("group"), "g", NodeKind::Group),
        );
        let mut a = vector("a", 10.0, 10.0);
        a.x = 5.0;
        a.y = 5.0;
        let mut b = vector("b", 10.0, 10.0);
        b.x = 20.0;
        b.y = 30.0;
        sg.add_node(group, a);
        sg.add_node(group, b);

        let bounds = sg.bounds_of(group);
        assert_eq!(bounds.x, 5.0);
        assert_eq!(bounds.y, 5.0);
        assert_eq!(bounds.width, 25.0);
        assert_eq!(bounds.height, 35.0);
    }

    #[test]
    fn empty_group_has_zero_size_bounds() {
        let mut sg = SceneGraph::new();
        let mut node = SceneNode::new(NodeId::with_prefix("group"), "empty", NodeKind::Group);
        node.x = 7.0;
        node.y = 9.0;
        let group = sg.add_node(sg.root, node);

        let bounds = sg.bounds_of(group);
        assert_eq!((bounds.x, bounds.y), (7.0, 9.0));
        assert_eq!((bounds.width, bounds.height), (0.0, 0.0));
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let mut sg = SceneGraph::new();
        let group = sg.add_node(
            sg.root,
            SceneNode::new(NodeId::with_prefix("group"), "g", NodeKind::Group),
        );
        let leaf = sg.add_node(group, vector("leaf", 2.0, 2.0));
        let leaf_id = sg.node(leaf).id;

        sg.remove_subtree(group);

        assert!(sg.children(sg.root).is_empty());
        assert_eq!(sg.index_of(leaf_id), None);
    }

    #[test]
    fn viewport_center() {
        let viewport = ViewportState {
            bounds: Rect {
                x: 100.0,
                y: 50.0,
                width: 200.0,
                height: 100.0,
            },
            zoom: 2.0,
        };
        assert_eq!(viewport.center(), Point::new(200.0, 100.0));
    }
}
