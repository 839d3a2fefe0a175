//! Scene projection: document + camera + UI state in, display list out.
//!
//! `project` is a pure function. It resolves world coordinates into screen
//! space, applies the default palette where per-record styles are absent, and
//! skips records that cannot be drawn (connections whose endpoints do not
//! resolve to live nodes). The painter in [`crate::render`] consumes the
//! resulting [`Scene`] without touching document state.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::{Camera, Point};
use crate::consts::{
    CONNECTION_DASH, CONNECTION_POINT_RADIUS_PX, CONNECTION_STROKE, CONNECTION_STROKE_WIDTH,
    GRID_DOT_COLOR, GRID_SPACING_WORLD, HANDLE_RADIUS_PX, MINIMAP_DOCUMENT_COLOR, MINIMAP_HEIGHT,
    MINIMAP_IMAGE_COLOR, MINIMAP_MARGIN_PX, MINIMAP_NODE_MIN_PX, MINIMAP_SCALE, MINIMAP_TEXT_COLOR,
    MINIMAP_VIEW_HEIGHT, MINIMAP_VIEW_WIDTH, MINIMAP_WIDTH, NODE_BORDER, NODE_FILL, PREVIEW_DASH,
    PREVIEW_STROKE, PREVIEW_STROKE_WIDTH, SELECTION_STROKE,
};
use crate::doc::{BoardDoc, Node, NodeId, NodeKind};
use crate::hit::{self, Corner, Side};
use crate::input::UiState;

/// Half-extent of a connection arrowhead in world units.
const ARROW_HALF_WORLD: f64 = 5.0;

/// A dot-grid layer described by phase and pitch, both in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayer {
    /// Screen offset of the first dot column/row.
    pub offset: Point,
    /// Distance between dots in screen pixels.
    pub spacing: f64,
    pub color: &'static str,
}

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A node body ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeItem {
    pub id: NodeId,
    pub rect: ScreenRect,
    pub fill: String,
    pub border: String,
    /// First line of the node's inline content, empty when there is none.
    pub label: String,
}

/// A stroked path style with an already-scaled dash pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    /// Dash segment lengths in screen pixels; empty means solid.
    pub dash: Vec<f64>,
}

/// A finished connection: quadratic curve plus arrowhead, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionItem {
    pub start: Point,
    /// Control point of the quadratic curve (the world midpoint).
    pub control: Point,
    pub end: Point,
    /// Arrowhead triangle vertices, wound toward the target.
    pub arrow: [Point; 3],
    pub stroke: Stroke,
}

/// The in-progress connection line from the source point to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewItem {
    pub start: Point,
    pub end: Point,
    pub stroke: Stroke,
}

/// Selection chrome for the selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionItem {
    pub rect: ScreenRect,
    /// Corner resize handle centers, in [`Corner::ALL`] order.
    pub handles: [Point; 4],
    pub handle_half: f64,
    /// Side connection point centers, in [`Side::ALL`] order.
    pub points: [Point; 4],
    pub point_radius: f64,
    pub color: &'static str,
}

/// A filled rectangle in the minimap panel's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapNode {
    pub rect: ScreenRect,
    pub color: &'static str,
}

/// The minimap overlay, anchored to the bottom-right corner.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapItem {
    /// Panel rectangle in screen pixels.
    pub panel: ScreenRect,
    /// Node markers, in panel-local coordinates.
    pub nodes: Vec<MinimapNode>,
    /// Viewport indicator, in panel-local coordinates, clamped to the panel.
    pub indicator: ScreenRect,
}

/// Everything one frame paints, ordered back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub grid: GridLayer,
    pub connections: Vec<ConnectionItem>,
    pub nodes: Vec<NodeItem>,
    pub selection: Option<SelectionItem>,
    pub preview: Option<PreviewItem>,
    pub minimap: MinimapItem,
}

/// Project the current state into a [`Scene`].
#[must_use]
pub fn project(
    doc: &BoardDoc,
    camera: &Camera,
    ui: &UiState,
    viewport_width: f64,
    viewport_height: f64,
) -> Scene {
    Scene {
        width: viewport_width,
        height: viewport_height,
        grid: project_grid(camera),
        connections: project_connections(doc, camera),
        nodes: doc.nodes().iter().map(|n| project_node(n, camera)).collect(),
        selection: ui
            .selected_id
            .and_then(|id| doc.node(&id))
            .map(|node| project_selection(node, camera)),
        preview: ui.preview.as_ref().map(|seg| PreviewItem {
            start: camera.world_to_screen(seg.start),
            end: camera.world_to_screen(seg.end),
            stroke: Stroke {
                color: PREVIEW_STROKE.to_owned(),
                width: PREVIEW_STROKE_WIDTH * camera.zoom,
                dash: scale_dash(&parse_dash(PREVIEW_DASH), camera.zoom),
            },
        }),
        minimap: project_minimap(doc, camera, viewport_width, viewport_height),
    }
}

fn project_grid(camera: &Camera) -> GridLayer {
    let spacing = GRID_SPACING_WORLD * camera.zoom;
    GridLayer {
        offset: Point::new(camera.x.rem_euclid(spacing), camera.y.rem_euclid(spacing)),
        spacing,
        color: GRID_DOT_COLOR,
    }
}

fn project_node(node: &Node, camera: &Camera) -> NodeItem {
    let top_left = camera.world_to_screen(node.position);
    let style = node.style.as_ref();
    NodeItem {
        id: node.id,
        rect: ScreenRect {
            x: top_left.x,
            y: top_left.y,
            width: node.size.width * camera.zoom,
            height: node.size.height * camera.zoom,
        },
        fill: style
            .and_then(|s| s.background_color.clone())
            .unwrap_or_else(|| NODE_FILL.to_owned()),
        border: style
            .and_then(|s| s.border_color.clone())
            .unwrap_or_else(|| NODE_BORDER.to_owned()),
        label: node.content.lines().next().unwrap_or_default().to_owned(),
    }
}

fn project_connections(doc: &BoardDoc, camera: &Camera) -> Vec<ConnectionItem> {
    doc.connections()
        .iter()
        .filter_map(|conn| {
            let source = doc.node(&conn.source_node_id)?;
            let target = doc.node(&conn.target_node_id)?;
            let a = hit::node_center(source);
            let b = hit::node_center(target);
            let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);

            let style = conn.style.as_ref();
            let color = style
                .and_then(|s| s.stroke_color.clone())
                .unwrap_or_else(|| CONNECTION_STROKE.to_owned());
            let width = style
                .and_then(|s| s.stroke_width)
                .unwrap_or(CONNECTION_STROKE_WIDTH);
            let dash = style
                .and_then(|s| s.stroke_dasharray.as_deref())
                .map_or_else(|| parse_dash(CONNECTION_DASH), parse_dash);

            Some(ConnectionItem {
                start: camera.world_to_screen(a),
                control: camera.world_to_screen(mid),
                end: camera.world_to_screen(b),
                arrow: [
                    camera.world_to_screen(Point::new(b.x - ARROW_HALF_WORLD, b.y - ARROW_HALF_WORLD)),
                    camera.world_to_screen(Point::new(b.x + ARROW_HALF_WORLD, b.y)),
                    camera.world_to_screen(Point::new(b.x - ARROW_HALF_WORLD, b.y + ARROW_HALF_WORLD)),
                ],
                stroke: Stroke {
                    color,
                    width: width * camera.zoom,
                    dash: scale_dash(&dash, camera.zoom),
                },
            })
        })
        .collect()
}

fn project_selection(node: &Node, camera: &Camera) -> SelectionItem {
    let top_left = camera.world_to_screen(node.position);
    let handles = Corner::ALL.map(|c| camera.world_to_screen(hit::corner_position(node, c)));
    let points = Side::ALL.map(|s| camera.world_to_screen(hit::side_midpoint(node, s)));
    SelectionItem {
        rect: ScreenRect {
            x: top_left.x,
            y: top_left.y,
            width: node.size.width * camera.zoom,
            height: node.size.height * camera.zoom,
        },
        handles,
        handle_half: HANDLE_RADIUS_PX,
        points,
        point_radius: CONNECTION_POINT_RADIUS_PX,
        color: SELECTION_STROKE,
    }
}

fn project_minimap(
    doc: &BoardDoc,
    camera: &Camera,
    viewport_width: f64,
    viewport_height: f64,
) -> MinimapItem {
    let panel = ScreenRect {
        x: viewport_width - MINIMAP_WIDTH - MINIMAP_MARGIN_PX,
        y: viewport_height - MINIMAP_HEIGHT - MINIMAP_MARGIN_PX,
        width: MINIMAP_WIDTH,
        height: MINIMAP_HEIGHT,
    };

    let nodes = doc
        .nodes()
        .iter()
        .map(|node| MinimapNode {
            rect: ScreenRect {
                x: node.position.x * MINIMAP_SCALE,
                y: node.position.y * MINIMAP_SCALE,
                width: (node.size.width * MINIMAP_SCALE).max(MINIMAP_NODE_MIN_PX),
                height: (node.size.height * MINIMAP_SCALE).max(MINIMAP_NODE_MIN_PX),
            },
            color: minimap_color(node.kind),
        })
        .collect();

    let indicator = ScreenRect {
        x: (-camera.x * MINIMAP_SCALE).clamp(0.0, MINIMAP_WIDTH - MINIMAP_VIEW_WIDTH),
        y: (-camera.y * MINIMAP_SCALE).clamp(0.0, MINIMAP_HEIGHT - MINIMAP_VIEW_HEIGHT),
        width: MINIMAP_VIEW_WIDTH,
        height: MINIMAP_VIEW_HEIGHT,
    };

    MinimapItem { panel, nodes, indicator }
}

fn minimap_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Text => MINIMAP_TEXT_COLOR,
        NodeKind::Image => MINIMAP_IMAGE_COLOR,
        NodeKind::Document => MINIMAP_DOCUMENT_COLOR,
    }
}

/// Parse a comma-separated dash pattern like `"5,5"` into segment lengths.
///
/// Malformed entries are dropped; an all-malformed pattern means solid.
#[must_use]
pub fn parse_dash(pattern: &str) -> Vec<f64> {
    pattern
        .split(',')
        .filter_map(|part| match part.trim().parse::<f64>() {
            Ok(len) if len.is_finite() && len > 0.0 => Some(len),
            _ => None,
        })
        .collect()
}

fn scale_dash(dash: &[f64], zoom: f64) -> Vec<f64> {
    dash.iter().map(|len| len * zoom).collect()
}
