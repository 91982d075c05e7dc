//! Drop-gesture coordinate mapping: screen pixels → canvas units.
//!
//! The canvas may occupy only part of the host window — an icon panel on
//! the left and a properties panel on the right shrink the usable area,
//! and a toolbar sits above it. Occlusion is detected by comparing the
//! canvas's expected pixel width against the window width reported by the
//! drag source; when a pane is present, its chrome offsets are subtracted
//! before the zoom transform.

use crate::message::DropPayload;
use gd_core::{Point, ViewportState};

/// Host-chrome measurements used to undo UI occlusion.
///
/// These are properties of one specific host build, not tunables. Confirm
/// them against the target host before shipping — an off-by-one here
/// visibly mis-places every dropped icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeMetrics {
    /// Relative width mismatch above which an occluding pane is assumed.
    pub occlusion_tolerance: f32,

    /// Width of the host's right-side properties panel, in pixels.
    pub right_panel_width: f32,

    /// Height of the host's top toolbar, in pixels.
    pub top_bar_height: f32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            occlusion_tolerance: 0.01,
            right_panel_width: 240.0,
            top_bar_height: 40.0,
        }
    }
}

impl ChromeMetrics {
    /// Whether an occluding UI pane is present: the expected canvas pixel
    /// width (`bounds.width × zoom`) and the actual window width differ
    /// by more than the tolerance.
    pub fn is_occluded(&self, viewport: &ViewportState, window_width: f32) -> bool {
        let expected = viewport.bounds.width * viewport.zoom;
        (expected - window_width).abs() / window_width > self.occlusion_tolerance
    }
}

/// Map a drop gesture to canvas coordinates.
///
/// With no occlusion this reduces exactly to
/// `bounds.xy + client / zoom − offset`.
pub fn map_drop_to_canvas(
    payload: &DropPayload,
    viewport: &ViewportState,
    chrome: &ChromeMetrics,
) -> Point {
    let mut sx = payload.drop_position.client_x;
    let mut sy = payload.drop_position.client_y;

    if chrome.is_occluded(viewport, payload.window_size.width) {
        // The left icon panel is whatever width remains after the canvas
        // and the fixed right panel.
        let left_panel = payload.window_size.width
            - viewport.bounds.width * viewport.zoom
            - chrome.right_panel_width;
        sx -= left_panel;
        sy -= chrome.top_bar_height;
    }

    Point {
        x: viewport.bounds.x + sx / viewport.zoom - payload.offset.x,
        y: viewport.bounds.y + sy / viewport.zoom - payload.offset.y,
    }
}
