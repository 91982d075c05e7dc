pub mod id;
pub mod model;
pub mod normalize;
pub mod select;

pub use id::NodeId;
pub use model::*;
pub use normalize::{flatten_group, normalize_import};
pub use select::{ICON_FOOTPRINT, resolve_injection_target, resolve_offset};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
