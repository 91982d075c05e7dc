//! UI → core message protocol.
//!
//! Each user action arrives as one JSON envelope `{"type": …, "payload": …}`.
//! Unrecognized types decode as `Log` — diagnostics only, never fatal.
//! Malformed payloads on the two placement types are errors the runtime
//! surfaces to the user.

use gd_core::Point;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed message envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("malformed {kind} payload: {source}")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Pointer position captured by the drag source, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPosition {
    pub client_x: f32,
    pub client_y: f32,
}

/// Pixel size of the window the drag started in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

/// Payload for an explicit "insert near selection" action.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertPayload {
    pub name: String,
    pub svg: String,
}

/// One drag gesture, constructed by the UI layer and consumed once.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    pub name: String,
    pub svg: String,

    /// Pointer position at release.
    pub drop_position: ScreenPosition,

    /// Pointer offset from the dragged preview's origin.
    pub offset: Point,

    /// Size of the window the preview was dragged out of.
    pub window_size: WindowSize,
}

/// A decoded UI message.
#[derive(Debug, Clone)]
pub enum PluginMessage {
    /// Place an icon near the current selection.
    Insert(InsertPayload),
    /// Place an icon at a mapped drop position.
    Drop(DropPayload),
    /// Diagnostic passthrough — includes every unrecognized type.
    Log(Value),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl PluginMessage {
    /// Decode one message envelope.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let envelope: Envelope = serde_json::from_str(raw).map_err(MessageError::Envelope)?;
        match envelope.kind.as_str() {
            "insert" => serde_json::from_value(envelope.payload)
                .map(Self::Insert)
                .map_err(|source| MessageError::Payload {
                    kind: "insert",
                    source,
                }),
            "drop" => serde_json::from_value(envelope.payload)
                .map(Self::Drop)
                .map_err(|source| MessageError::Payload {
                    kind: "drop",
                    source,
                }),
            // Anything else gets the same treatment as an explicit log.
            _ => Ok(Self::Log(envelope.payload)),
        }
    }
}
