//! Walkthrough of a plugin session: search the catalog, insert the top
//! hit, then drop another icon at a pointer position.
//!
//! Run with `RUST_LOG=debug cargo run --example plugin_session`.

use gd_core::{NodeId, NodeIndex, NodeKind, SceneGraph, SceneNode};
use gd_plugin::{GraphicImporter, ImportError, Notifier, PlacementEngine};
use gd_search::{IconEntry, IndexSlot, SearchIndex};

/// Demo importer: one vector leaf per import. A real host parses the SVG.
struct DemoImporter;

impl GraphicImporter for DemoImporter {
    fn import(&self, graph: &mut SceneGraph, svg: &str) -> Result<NodeIndex, ImportError> {
        if svg.is_empty() {
            return Err(ImportError::new("empty source"));
        }
        let wrapper = graph.add_node(
            graph.root,
            SceneNode::new(NodeId::with_prefix("import"), "import", NodeKind::Group),
        );
        graph.add_node(
            wrapper,
            SceneNode::new(
                NodeId::with_prefix("vector"),
                "outline",
                NodeKind::Vector {
                    width: 24.0,
                    height: 24.0,
                },
            ),
        );
        Ok(wrapper)
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str, timeout_ms: u32) {
        println!("[toast {timeout_ms}ms] {message}");
    }
}

fn main() {
    env_logger::init();

    // Catalog load + index build, then publish for queries.
    let slot = IndexSlot::new();
    slot.install(SearchIndex::build(vec![
        IconEntry::new("house", "<svg><path/></svg>").with_tags(["home", "building"]),
        IconEntry::new("gear", "<svg><path/></svg>").with_tags(["settings"]),
        IconEntry::new("gear-six", "<svg><path/></svg>").with_tags(["settings"]),
    ]));

    let hits = slot.query("gear").expect("index installed above");
    println!("query \"gear\" → {:?}", hits.iter().map(|e| &e.name).collect::<Vec<_>>());

    let top = &hits[0];
    let mut engine = PlacementEngine::new(DemoImporter, StdoutNotifier);

    engine.handle_raw(&format!(
        r#"{{"type": "insert", "payload": {{"name": "{}", "svg": "<svg><path/></svg>"}}}}"#,
        top.name
    ));

    engine.handle_raw(
        r#"{"type": "drop", "payload": {
            "name": "house",
            "svg": "<svg><path/></svg>",
            "dropPosition": {"clientX": 500.0, "clientY": 300.0},
            "offset": {"x": 10.0, "y": 10.0},
            "windowSize": {"width": 800.0, "height": 600.0}
        }}"#,
    );

    for idx in engine.graph.children(engine.graph.root) {
        let node = engine.graph.node(idx);
        println!(
            "placed {:?} \"{}\" at ({}, {})",
            node.id, node.name, node.x, node.y
        );
    }
}
