//! Collaborator seams to the host application.
//!
//! The core never parses SVG and never draws. Turning vector source text
//! into scene nodes and showing toast notifications belong to the host;
//! each is a trait so hosts plug in their native implementation and tests
//! substitute stubs.

use gd_core::{NodeIndex, SceneGraph};
use thiserror::Error;

/// Failure to turn vector source text into scene nodes.
#[derive(Debug, Error)]
#[error("could not import vector source: {reason}")]
pub struct ImportError {
    pub reason: String,
}

impl ImportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Imports a vector graphic into the document.
///
/// On success the importer adds a throwaway wrapper node under the page
/// root whose children are the graphic's top-level elements; the
/// normalizer re-homes the children and discards the wrapper. On error
/// the document must be left unchanged.
pub trait GraphicImporter {
    fn import(&self, graph: &mut SceneGraph, svg: &str) -> Result<NodeIndex, ImportError>;
}

/// Fire-and-forget toast sink.
pub trait Notifier {
    /// Show `message` for roughly `timeout_ms` milliseconds.
    fn notify(&mut self, message: &str, timeout_ms: u32);
}

/// Notifier that forwards to the log — the default when the host wires up
/// no toast surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str, timeout_ms: u32) {
        log::info!(target: "gd::notify", "{message} ({timeout_ms}ms)");
    }
}
