//! Integration tests: raw UI messages → mapped, normalized placement.
//!
//! Exercises the full plugin pipeline with a stub importer standing in
//! for the host's native SVG import.

use gd_core::{NodeId, NodeIndex, NodeKind, SceneGraph, SceneNode};
use gd_plugin::{GraphicImporter, ImportError, Notifier, PlacementEngine};
use std::cell::RefCell;
use std::rc::Rc;

/// Stub importer: builds one nested group per `<g` and one vector leaf
/// per `<path` in the source text. Shape control without SVG parsing.
struct MarkupImporter;

impl GraphicImporter for MarkupImporter {
    fn import(&self, graph: &mut SceneGraph, svg: &str) -> Result<NodeIndex, ImportError> {
        if !svg.contains("<svg") {
            return Err(ImportError::new("not a vector source"));
        }

        let wrapper = graph.add_node(
            graph.root,
            SceneNode::new(NodeId::with_prefix("import"), "import", NodeKind::Group),
        );

        let mut parent = wrapper;
        for _ in 0..svg.matches("<g").count() {
            parent = graph.add_node(
                parent,
                SceneNode::new(NodeId::with_prefix("group"), "g", NodeKind::Group),
            );
        }
        for n in 0..svg.matches("<path").count() {
            graph.add_node(
                parent,
                SceneNode::new(
                    NodeId::with_prefix("vector"),
                    format!("path_{n}"),
                    NodeKind::Vector {
                        width: 24.0,
                        height: 24.0,
                    },
                ),
            );
        }
        Ok(wrapper)
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, _timeout_ms: u32) {
        self.toasts.borrow_mut().push(message.to_string());
    }
}

fn engine() -> (
    PlacementEngine<MarkupImporter, RecordingNotifier>,
    Rc<RefCell<Vec<String>>>,
) {
    let notifier = RecordingNotifier::default();
    let toasts = Rc::clone(&notifier.toasts);
    (PlacementEngine::new(MarkupImporter, notifier), toasts)
}

fn selected_node(engine: &PlacementEngine<MarkupImporter, RecordingNotifier>) -> NodeIndex {
    let id = *engine.selection.first().expect("nothing selected");
    engine.graph.index_of(id).expect("selection points nowhere")
}

#[test]
fn insert_flattens_nested_import_onto_page() {
    let (mut engine, toasts) = engine();

    engine.handle_raw(
        r#"{"type": "insert", "payload": {
            "name": "gear",
            "svg": "<svg><g><g><path/><path/></g></g></svg>"
        }}"#,
    );

    let placed = selected_node(&engine);
    let node = engine.graph.node(placed);
    assert_eq!(node.name, "gear");
    assert!(node.is_managed_icon());
    assert!(node.constrain_proportions);
    assert_eq!(engine.graph.parent(placed), Some(engine.graph.root));

    // Exactly one level of grouping with both leaves re-homed.
    let children = engine.graph.children(placed);
    assert_eq!(children.len(), 2);
    for child in children {
        assert!(matches!(
            engine.graph.node(child).kind,
            NodeKind::Vector { .. }
        ));
    }

    assert_eq!(toasts.borrow()[0], "✔ Added gear");
}

#[test]
fn drop_at_mapped_coordinates_without_overlay() {
    // Viewport {0,0,800×600, zoom 1}, window 800 wide — no overlay.
    let (mut engine, _) = engine();

    engine.handle_raw(
        r#"{"type": "drop", "payload": {
            "name": "gear",
            "svg": "<svg><path/></svg>",
            "dropPosition": {"clientX": 500.0, "clientY": 300.0},
            "offset": {"x": 10.0, "y": 10.0},
            "windowSize": {"width": 800.0, "height": 600.0}
        }}"#,
    );

    let node = engine.graph.node(selected_node(&engine));
    assert_eq!((node.x, node.y), (490.0, 290.0));
}

#[test]
fn drop_at_mapped_coordinates_with_overlay() {
    // Window 1040 → overlay present; left panel is 1040−800−240 = 0 wide,
    // so only the 40px top bar shifts the pointer.
    let (mut engine, _) = engine();

    engine.handle_raw(
        r#"{"type": "drop", "payload": {
            "name": "gear",
            "svg": "<svg><path/></svg>",
            "dropPosition": {"clientX": 500.0, "clientY": 300.0},
            "offset": {"x": 10.0, "y": 10.0},
            "windowSize": {"width": 1040.0, "height": 600.0}
        }}"#,
    );

    let node = engine.graph.node(selected_node(&engine));
    assert_eq!((node.x, node.y), (490.0, 250.0));
}

#[test]
fn insert_beside_selected_managed_icon_lines_up() {
    let (mut engine, _) = engine();

    engine.handle_raw(
        r#"{"type": "insert", "payload": {"name": "first", "svg": "<svg><path/></svg>"}}"#,
    );
    let first = selected_node(&engine);
    {
        let node = engine.graph.node_mut(first);
        node.x = 100.0;
        node.y = 100.0;
    }

    engine.handle_raw(
        r#"{"type": "insert", "payload": {"name": "second", "svg": "<svg><path/></svg>"}}"#,
    );

    let second = selected_node(&engine);
    assert_ne!(second, first);
    let node = engine.graph.node(second);
    assert_eq!((node.x, node.y), (132.0, 100.0));
    // Siblings, never nested inside the first icon.
    assert_eq!(engine.graph.parent(second), engine.graph.parent(first));
}

#[test]
fn sequential_inserts_never_nest_icons() {
    let (mut engine, _) = engine();
    let raw = r#"{"type": "insert", "payload": {"name": "dot", "svg": "<svg><path/></svg>"}}"#;

    for _ in 0..3 {
        engine.handle_raw(raw);
    }

    // All three managed icons sit directly on the page.
    let on_page = engine
        .graph
        .children(engine.graph.root)
        .into_iter()
        .filter(|&idx| engine.graph.node(idx).is_managed_icon())
        .count();
    assert_eq!(on_page, 3);
}

#[test]
fn empty_graphic_still_places_a_managed_group() {
    let (mut engine, toasts) = engine();

    engine.handle_raw(r#"{"type": "insert", "payload": {"name": "blank", "svg": "<svg/>"}}"#);

    let placed = selected_node(&engine);
    assert!(engine.graph.node(placed).is_managed_icon());
    assert!(engine.graph.children(placed).is_empty());
    assert_eq!(toasts.borrow()[0], "✔ Added blank");
}

#[test]
fn bad_vector_source_reports_and_keeps_state() {
    let (mut engine, toasts) = engine();

    engine.handle_raw(
        r#"{"type": "insert", "payload": {"name": "bad", "svg": "plain text"}}"#,
    );

    assert!(engine.graph.children(engine.graph.root).is_empty());
    assert!(engine.selection.is_empty());
    assert!(toasts.borrow()[0].starts_with('⚠'));
}

#[test]
fn unknown_message_types_never_fail() {
    let (mut engine, toasts) = engine();

    engine.handle_raw(r#"{"type": "ping", "payload": 1}"#);
    engine.handle_raw(r#"{"type": "log", "payload": {"note": "hi"}}"#);

    assert!(toasts.borrow().is_empty());
    assert!(engine.graph.children(engine.graph.root).is_empty());
}
