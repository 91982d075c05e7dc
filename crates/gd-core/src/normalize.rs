//! Import normalizer: collapses a freshly imported vector subtree into a
//! single flat managed group.
//!
//! Imported graphics arrive as arbitrarily deep trees of nested groups
//! (vector sources nest `<g>` elements freely). Placement wants exactly
//! one level of grouping: a managed group whose children are all leaves
//! or unmanaged containers. The flatten is structural — children keep
//! their canvas positions, only parentage changes.

use crate::model::{NodeKind, Point, SceneGraph};
use petgraph::graph::NodeIndex;

/// Collapse `imported` (a throwaway wrapper produced by the host's vector
/// import) into a single managed icon group under `target`.
///
/// The wrapper's children are re-homed into a fresh group, the wrapper is
/// discarded, nested groups are dissolved, and the group is named,
/// positioned, aspect-locked, and tagged as a managed icon.
///
/// A graphic that flattens to zero children still yields a valid (empty)
/// managed group.
pub fn normalize_import(
    graph: &mut SceneGraph,
    imported: NodeIndex,
    target: NodeIndex,
    name: &str,
    position: Point,
) -> NodeIndex {
    let children = graph.children(imported);
    let group = graph.group_nodes(&children, target, name);
    graph.remove_node(imported);

    flatten_group(graph, group);

    let node = graph.node_mut(group);
    node.x = position.x;
    node.y = position.y;
    node.constrain_proportions = true;
    node.mark_managed_icon();

    log::debug!("normalized import into managed group {}", node.id);
    group
}

/// Dissolve every nested group below `group`, re-parenting its contents
/// directly under `group`.
///
/// Worklist instead of recursion — imported trees can nest arbitrarily
/// deep. Non-group children pass through untouched, so the operation is
/// idempotent on an already-flat group.
pub fn flatten_group(graph: &mut SceneGraph, group: NodeIndex) {
    let mut work = graph.children(group);
    while let Some(idx) = work.pop() {
        let node = graph.node(idx);
        if !matches!(node.kind, NodeKind::Group) || node.is_managed_icon() {
            continue;
        }
        for grandchild in graph.children(idx) {
            graph.reparent_node(grandchild, group);
            work.push(grandchild);
        }
        graph.remove_node(idx);
    }
}
