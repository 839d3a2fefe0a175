//! Input model: buttons, keys, wheel deltas, and the gesture state machine.
//!
//! `Gesture` is the single source of truth for what the pointer is currently
//! doing. Exactly one mode is active at a time; each variant carries the
//! context the move handler needs to compute the next frame without
//! accumulating drift. `UiState` is the persistent selection/preview state
//! the renderer reads.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{ConnectionId, NodeId};
use crate::hit::{Corner, Side};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, named as the browser reports it (e.g. `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Live connection preview segment, both endpoints in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSegment {
    /// The connection point the gesture started from.
    pub start: Point,
    /// Current pointer position.
    pub end: Point,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected node, if any.
    pub selected_id: Option<NodeId>,
    /// Live preview segment while a connection is being drawn.
    pub preview: Option<PreviewSegment>,
}

/// The gesture state machine.
///
/// Mutual exclusivity of the modes is a type-level invariant: there is no way
/// to be panning and resizing at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// Dragging empty canvas to pan the viewport.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Moving a node across the canvas.
    DraggingNode {
        /// Id of the node being dragged.
        id: NodeId,
        /// World-space offset from the node's top-left corner to the pointer
        /// at grab time. The node tracks `pointer_world - grab_offset`, so
        /// it never jumps relative to the cursor.
        grab_offset_world: Point,
    },
    /// Resizing a node by one of its four corner handles.
    ResizingNode {
        /// Id of the node being resized.
        id: NodeId,
        /// Which corner handle is being dragged.
        corner: Corner,
        /// Screen-space pointer position at the start of the resize.
        start_screen: Point,
        /// Node x at the start of the resize.
        orig_x: f64,
        /// Node y at the start of the resize.
        orig_y: f64,
        /// Node width at the start of the resize.
        orig_w: f64,
        /// Node height at the start of the resize.
        orig_h: f64,
    },
    /// Drawing a new connection out of a side connection point.
    DrawingConnection {
        /// Id of the provisional connection record created at pointer-down.
        id: ConnectionId,
        /// The node the connection starts from.
        source: NodeId,
        /// Which side of the source node it starts from.
        side: Side,
    },
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}
