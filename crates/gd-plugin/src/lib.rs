pub mod engine;
pub mod host;
pub mod mapper;
pub mod message;

pub use engine::{InsertSession, PlaceError, PlacementEngine};
pub use host::{GraphicImporter, ImportError, LogNotifier, Notifier};
pub use mapper::{ChromeMetrics, map_drop_to_canvas};
pub use message::{
    DropPayload, InsertPayload, MessageError, PluginMessage, ScreenPosition, WindowSize,
};
