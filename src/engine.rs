//! Top-level engine: gesture handling, document mutation, and the browser
//! wrapper.
//!
//! [`EngineCore`] owns all logic that does not depend on the canvas element —
//! the document, the camera, the selection, and the gesture state machine —
//! so it can be tested without WASM/browser dependencies. [`Engine`] wraps it
//! together with the `HtmlCanvasElement` it paints into.
//!
//! Input handlers return [`Action`]s describing what happened; the host
//! persists the mutations and repaints when asked. The engine never blocks on
//! persistence and keeps its state unchanged if a save fails, so the user can
//! retry.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{BUTTON_ZOOM_STEP, MINIMAP_SCALE, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::doc::{
    BoardDoc, CanvasData, Connection, ConnectionId, ConnectionPatch, Node, NodeDraft, NodeId,
    NodePatch, Size,
};
use crate::files::{self, UploadedFile};
use crate::hit::{self, Corner, HitPart, Side};
use crate::input::{Button, Gesture, Key, PreviewSegment, UiState, WheelDelta};
use crate::project::SnapshotError;
use crate::{render, scene};

/// Horizontal/vertical stagger between successively created file nodes,
/// in world units.
const FILE_NODE_STAGGER: f64 = 30.0;

/// Number of stagger steps before placement wraps back to the origin.
const FILE_NODE_STAGGER_STEPS: usize = 8;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    NodeCreated(Node),
    NodeUpdated { id: NodeId, patch: NodePatch },
    NodeDeleted { id: NodeId },
    ConnectionCreated(Connection),
    ConnectionUpdated { id: ConnectionId, patch: ConnectionPatch },
    ConnectionDeleted { id: ConnectionId },
    SelectionChanged { id: Option<NodeId> },
    SetCursor(String),
    /// User-visible, non-fatal notice (e.g. a failed project load).
    Notice(String),
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub doc: BoardDoc,
    pub camera: Camera,
    pub ui: UiState,
    pub gesture: Gesture,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: BoardDoc::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Snapshots ---

    /// Hydrate the document and viewport from persisted canvas data.
    ///
    /// Resets selection and any in-flight gesture; the camera is sanitized
    /// back into its invariants in case the snapshot was hand-edited.
    pub fn load_snapshot(&mut self, data: CanvasData) {
        debug!(
            nodes = data.nodes.len(),
            connections = data.connections.len(),
            "loading canvas snapshot"
        );
        self.camera = data.viewport;
        self.camera.sanitize();
        self.doc.load(data.nodes, data.connections);
        self.ui = UiState::default();
        self.gesture = Gesture::Idle;
    }

    /// Load a decoded snapshot, falling back to an empty canvas on failure.
    ///
    /// A failed load is not fatal: the engine starts empty and surfaces a
    /// user-visible notice instead.
    pub fn load_snapshot_result(&mut self, result: Result<CanvasData, SnapshotError>) -> Vec<Action> {
        match result {
            Ok(data) => {
                self.load_snapshot(data);
                vec![Action::RenderNeeded]
            }
            Err(err) => {
                warn!(error = %err, "project load failed; falling back to empty canvas");
                self.load_snapshot(CanvasData::default());
                vec![
                    Action::Notice("Failed to load project. Starting with an empty canvas.".to_owned()),
                    Action::RenderNeeded,
                ]
            }
        }
    }

    /// Snapshot the current document and viewport for persistence.
    #[must_use]
    pub fn snapshot(&self) -> CanvasData {
        self.doc.to_canvas_data(self.camera)
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    ///
    /// The host owns the container element; it hands geometry in explicitly
    /// rather than the engine querying the DOM.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    /// Toolbar zoom-in: one multiplicative step about the screen origin.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_step(BUTTON_ZOOM_STEP);
        vec![Action::RenderNeeded]
    }

    /// Toolbar zoom-out: one multiplicative step about the screen origin.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_step(1.0 / BUTTON_ZOOM_STEP);
        vec![Action::RenderNeeded]
    }

    /// Pan driven by dragging the minimap's viewport indicator.
    ///
    /// A minimap pixel covers `1 / MINIMAP_SCALE` screen pixels, and moving
    /// the indicator right moves the viewport left.
    pub fn pan_minimap(&mut self, delta_x: f64, delta_y: f64) -> Vec<Action> {
        self.camera.pan(-delta_x / MINIMAP_SCALE, -delta_y / MINIMAP_SCALE);
        vec![Action::RenderNeeded]
    }

    // --- Document operations ---

    /// Create a node from a draft (toolbar "add node").
    pub fn create_node(&mut self, draft: NodeDraft) -> Vec<Action> {
        let id = self.doc.add_node(draft);
        let mut actions = Vec::new();
        if let Some(node) = self.doc.node(&id) {
            actions.push(Action::NodeCreated(node.clone()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Create a node for an uploaded file, picking kind and size from its
    /// mime type and staggering placement so repeated drops don't stack.
    pub fn create_file_node(&mut self, file: &UploadedFile) -> Vec<Action> {
        let (kind, size) = files::node_spec_for(&file.mime_type, &file.original_name);
        let step = (self.doc.len() % FILE_NODE_STAGGER_STEPS) as f64;
        let offset = step * FILE_NODE_STAGGER;
        self.create_node(NodeDraft {
            kind: Some(kind),
            position: Some(Point::new(100.0 + offset, 100.0 + offset)),
            size: Some(size),
            content: Some(String::new()),
            file_id: Some(file.id),
            style: None,
        })
    }

    /// Apply a sparse update to a node. No-op if the id is absent.
    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> Vec<Action> {
        if self.doc.update_node(id, &patch) {
            vec![Action::NodeUpdated { id: *id, patch }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Delete a node, cascading to its connections. No-op if absent.
    pub fn delete_node(&mut self, id: &NodeId) -> Vec<Action> {
        let Some((node, cascaded)) = self.doc.delete_node(id) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        for conn in cascaded {
            actions.push(Action::ConnectionDeleted { id: conn.id });
        }
        actions.push(Action::NodeDeleted { id: node.id });
        if self.ui.selected_id == Some(node.id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged { id: None });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Apply a sparse update to a connection. No-op if the id is absent.
    pub fn update_connection(&mut self, id: &ConnectionId, patch: ConnectionPatch) -> Vec<Action> {
        if self.doc.update_connection(id, &patch) {
            vec![Action::ConnectionUpdated { id: *id, patch }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Delete a connection. No-op if the id is absent.
    pub fn delete_connection(&mut self, id: &ConnectionId) -> Vec<Action> {
        if self.doc.delete_connection(id).is_some() {
            vec![Action::ConnectionDeleted { id: *id }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The currently selected node, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.doc.node(id)
    }

    // --- Input events ---

    /// Pointer-down: dispatch on what is under the cursor.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);
        let Some(hit) = hit::hit_test(world, &self.doc, &self.camera, self.ui.selected_id) else {
            return self.begin_pan(screen);
        };

        match hit.part {
            HitPart::Body => self.begin_drag(hit.node_id, world),
            HitPart::ResizeHandle(corner) => self.begin_resize(hit.node_id, corner, screen),
            HitPart::ConnectionPoint(side) => self.begin_connection(hit.node_id, side, world),
        }
    }

    /// Pointer-move: advance the active gesture.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.gesture.clone() {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { last_screen } => {
                self.camera.pan(screen.x - last_screen.x, screen.y - last_screen.y);
                self.gesture = Gesture::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            Gesture::DraggingNode { id, grab_offset_world } => {
                let world = self.camera.screen_to_world(screen);
                // Offset-based, not delta-accumulated: the node follows the
                // pointer exactly even across dropped frames.
                let position = Point::new(world.x - grab_offset_world.x, world.y - grab_offset_world.y);
                self.update_node(&id, NodePatch::position(position))
            }
            Gesture::ResizingNode { id, corner, start_screen, orig_x, orig_y, orig_w, orig_h } => {
                let delta_x = self.camera.screen_dist_to_world(screen.x - start_screen.x);
                let delta_y = self.camera.screen_dist_to_world(screen.y - start_screen.y);
                let patch = resize_patch(corner, orig_x, orig_y, orig_w, orig_h, delta_x, delta_y);
                self.update_node(&id, patch)
            }
            Gesture::DrawingConnection { .. } => {
                let world = self.camera.screen_to_world(screen);
                if let Some(preview) = &mut self.ui.preview {
                    preview.end = world;
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up: end whatever gesture is active.
    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { .. } => vec![Action::SetCursor("grab".to_owned())],
            Gesture::DraggingNode { .. } | Gesture::ResizingNode { .. } => {
                vec![Action::SetCursor("default".to_owned())]
            }
            Gesture::DrawingConnection { id, source, .. } => {
                self.ui.preview = None;
                self.finish_connection(&id, source, screen)
            }
        }
    }

    /// Wheel: zoom about the cursor.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.camera.zoom_at(screen, factor);
        vec![Action::RenderNeeded]
    }

    /// Key-down: delete the selection, or cancel the active gesture.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => match self.ui.selected_id {
                Some(id) => self.delete_node(&id),
                None => Vec::new(),
            },
            "Escape" => self.cancel(),
            _ => Vec::new(),
        }
    }

    // --- Gesture transitions ---

    fn begin_pan(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        // Clicking empty canvas deselects; the engine owns selection state,
        // so this is a direct write, not a broadcast.
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged { id: None });
        }
        self.gesture = Gesture::Panning { last_screen: screen };
        actions.push(Action::SetCursor("grabbing".to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_drag(&mut self, id: NodeId, world: Point) -> Vec<Action> {
        let Some(node) = self.doc.node(&id) else {
            return Vec::new();
        };
        let grab_offset_world =
            Point::new(world.x - node.position.x, world.y - node.position.y);
        let mut actions = Vec::new();
        if self.ui.selected_id != Some(id) {
            self.ui.selected_id = Some(id);
            actions.push(Action::SelectionChanged { id: Some(id) });
        }
        self.gesture = Gesture::DraggingNode { id, grab_offset_world };
        actions.push(Action::SetCursor("move".to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_resize(&mut self, id: NodeId, corner: Corner, screen: Point) -> Vec<Action> {
        let Some(node) = self.doc.node(&id) else {
            return Vec::new();
        };
        self.gesture = Gesture::ResizingNode {
            id,
            corner,
            start_screen: screen,
            orig_x: node.position.x,
            orig_y: node.position.y,
            orig_w: node.size.width,
            orig_h: node.size.height,
        };
        let cursor = match corner {
            Corner::Nw | Corner::Se => "nwse-resize",
            Corner::Ne | Corner::Sw => "nesw-resize",
        };
        vec![Action::SetCursor(cursor.to_owned())]
    }

    fn begin_connection(&mut self, source: NodeId, side: Side, world: Point) -> Vec<Action> {
        let Some(node) = self.doc.node(&source) else {
            return Vec::new();
        };
        let start = hit::side_midpoint(node, side);
        // Provisional record: the target stays nil until pointer-up resolves
        // a drop node. The render pass skips it as dangling meanwhile, and no
        // ConnectionCreated is emitted until it is final.
        let id = self.doc.add_connection(source, Uuid::nil());
        self.ui.preview = Some(PreviewSegment { start, end: world });
        self.gesture = Gesture::DrawingConnection { id, source, side };
        vec![Action::SetCursor("crosshair".to_owned()), Action::RenderNeeded]
    }

    fn finish_connection(&mut self, id: &ConnectionId, source: NodeId, screen: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);
        let target = hit::body_hit(world, &self.doc).filter(|t| *t != source);
        let mut actions = vec![Action::SetCursor("default".to_owned())];
        match target {
            Some(target) => {
                let patch = ConnectionPatch {
                    target_node_id: Some(target),
                    ..ConnectionPatch::default()
                };
                if self.doc.update_connection(id, &patch) {
                    if let Some(conn) = self.doc.connection(id) {
                        actions.push(Action::ConnectionCreated(conn.clone()));
                    }
                }
            }
            None => {
                // Released over nothing: the provisional connection dies.
                self.doc.delete_connection(id);
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Cancel the active gesture, or clear the selection when idle.
    fn cancel(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            Gesture::DrawingConnection { id, .. } => {
                self.ui.preview = None;
                self.doc.delete_connection(&id);
                vec![Action::SetCursor("default".to_owned()), Action::RenderNeeded]
            }
            Gesture::Idle => {
                if self.ui.selected_id.take().is_some() {
                    vec![Action::SelectionChanged { id: None }, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            _ => vec![Action::SetCursor("default".to_owned()), Action::RenderNeeded],
        }
    }
}

/// Compute the resize patch for one frame of a corner-handle drag.
///
/// `delta_x` / `delta_y` are already in world units. Size floors clamp width
/// and height, and the position shift for west/north corners is derived from
/// the clamped size, so the anchored edge stays put once the floor is hit —
/// size and position are clamped together, never independently.
fn resize_patch(
    corner: Corner,
    orig_x: f64,
    orig_y: f64,
    orig_w: f64,
    orig_h: f64,
    delta_x: f64,
    delta_y: f64,
) -> NodePatch {
    let (raw_w, raw_h) = match corner {
        Corner::Se => (orig_w + delta_x, orig_h + delta_y),
        Corner::Sw => (orig_w - delta_x, orig_h + delta_y),
        Corner::Ne => (orig_w + delta_x, orig_h - delta_y),
        Corner::Nw => (orig_w - delta_x, orig_h - delta_y),
    };
    let width = raw_w.max(MIN_NODE_WIDTH);
    let height = raw_h.max(MIN_NODE_HEIGHT);

    let x = match corner {
        Corner::Sw | Corner::Nw => orig_x + (orig_w - width),
        Corner::Se | Corner::Ne => orig_x,
    };
    let y = match corner {
        Corner::Ne | Corner::Nw => orig_y + (orig_h - height),
        Corner::Se | Corner::Sw => orig_y,
    };

    NodePatch::rect(Point::new(x, y), Size::new(width, height))
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser canvas
/// element; the only extra capability is painting.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated snapshots ---

    pub fn load_snapshot_result(&mut self, result: Result<CanvasData, SnapshotError>) -> Vec<Action> {
        self.core.load_snapshot_result(result)
    }

    #[must_use]
    pub fn snapshot(&self) -> CanvasData {
        self.core.snapshot()
    }

    // --- Delegated viewport ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn pan_minimap(&mut self, delta_x: f64, delta_y: f64) -> Vec<Action> {
        self.core.pan_minimap(delta_x, delta_y)
    }

    // --- Delegated document operations ---

    pub fn create_node(&mut self, draft: NodeDraft) -> Vec<Action> {
        self.core.create_node(draft)
    }

    pub fn create_file_node(&mut self, file: &UploadedFile) -> Vec<Action> {
        self.core.create_file_node(file)
    }

    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> Vec<Action> {
        self.core.update_node(id, patch)
    }

    pub fn delete_node(&mut self, id: &NodeId) -> Vec<Action> {
        self.core.delete_node(id)
    }

    pub fn update_connection(&mut self, id: &ConnectionId, patch: ConnectionPatch) -> Vec<Action> {
        self.core.update_connection(id, patch)
    }

    pub fn delete_connection(&mut self, id: &ConnectionId) -> Vec<Action> {
        self.core.delete_connection(id)
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen, button)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen)
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen, delta)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Render ---

    /// Project the current state into a scene and paint it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        let scene = scene::project(
            &self.core.doc,
            &self.core.camera,
            &self.core.ui,
            self.core.viewport_width,
            self.core.viewport_height,
        );
        render::draw(&ctx, &scene, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.core.node(id)
    }
}
