#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{NodeDraft, Size};
use crate::input::PreviewSegment;
use uuid::Uuid;

fn doc_with_node(x: f64, y: f64, w: f64, h: f64) -> (BoardDoc, NodeId) {
    let mut doc = BoardDoc::new();
    let id = doc.add_node(NodeDraft {
        position: Some(Point::new(x, y)),
        size: Some(Size::new(w, h)),
        ..NodeDraft::default()
    });
    (doc, id)
}

fn plain_scene(doc: &BoardDoc) -> Scene {
    project(doc, &Camera::default(), &UiState::default(), 800.0, 600.0)
}

// =============================================================
// Grid
// =============================================================

#[test]
fn grid_spacing_scales_with_zoom() {
    let doc = BoardDoc::new();
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    assert_eq!(scene.grid.spacing, 80.0);
    assert_eq!(scene.grid.offset, Point::new(0.0, 0.0));
}

#[test]
fn grid_phase_follows_pan() {
    let doc = BoardDoc::new();
    let cam = Camera { x: 50.0, y: -10.0, zoom: 1.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    // 50 mod 40 = 10; -10 mod 40 = 30 (euclidean).
    assert_eq!(scene.grid.offset, Point::new(10.0, 30.0));
}

// =============================================================
// Nodes
// =============================================================

#[test]
fn node_rect_is_projected_through_camera() {
    let (doc, id) = doc_with_node(100.0, 100.0, 300.0, 200.0);
    let cam = Camera { x: 20.0, y: -10.0, zoom: 2.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    assert_eq!(scene.nodes.len(), 1);
    let item = &scene.nodes[0];
    assert_eq!(item.id, id);
    assert_eq!(item.rect, ScreenRect { x: 220.0, y: 190.0, width: 600.0, height: 400.0 });
}

#[test]
fn node_defaults_fill_and_border() {
    let (doc, _) = doc_with_node(0.0, 0.0, 300.0, 200.0);
    let scene = plain_scene(&doc);
    assert_eq!(scene.nodes[0].fill, NODE_FILL);
    assert_eq!(scene.nodes[0].border, NODE_BORDER);
}

#[test]
fn node_style_overrides_palette() {
    let mut doc = BoardDoc::new();
    doc.add_node(NodeDraft {
        style: Some(crate::doc::NodeStyle {
            background_color: Some("#123456".to_owned()),
            border_color: None,
        }),
        ..NodeDraft::default()
    });
    let scene = plain_scene(&doc);
    assert_eq!(scene.nodes[0].fill, "#123456");
    assert_eq!(scene.nodes[0].border, NODE_BORDER);
}

#[test]
fn node_label_is_first_content_line() {
    let mut doc = BoardDoc::new();
    doc.add_node(NodeDraft {
        content: Some("title line\nbody".to_owned()),
        ..NodeDraft::default()
    });
    let scene = plain_scene(&doc);
    assert_eq!(scene.nodes[0].label, "title line");
}

#[test]
fn nodes_keep_draw_order() {
    let mut doc = BoardDoc::new();
    let a = doc.add_node(NodeDraft::default());
    let b = doc.add_node(NodeDraft::default());
    let scene = plain_scene(&doc);
    assert_eq!(scene.nodes[0].id, a);
    assert_eq!(scene.nodes[1].id, b);
}

// =============================================================
// Connections
// =============================================================

fn doc_with_pair() -> (BoardDoc, NodeId, NodeId) {
    let mut doc = BoardDoc::new();
    let a = doc.add_node(NodeDraft {
        position: Some(Point::new(0.0, 0.0)),
        size: Some(Size::new(200.0, 100.0)),
        ..NodeDraft::default()
    });
    let b = doc.add_node(NodeDraft {
        position: Some(Point::new(400.0, 0.0)),
        size: Some(Size::new(200.0, 100.0)),
        ..NodeDraft::default()
    });
    (doc, a, b)
}

#[test]
fn connection_curve_runs_center_to_center() {
    let (mut doc, a, b) = doc_with_pair();
    doc.add_connection(a, b);
    let scene = plain_scene(&doc);
    assert_eq!(scene.connections.len(), 1);
    let conn = &scene.connections[0];
    assert_eq!(conn.start, Point::new(100.0, 50.0));
    assert_eq!(conn.end, Point::new(500.0, 50.0));
    assert_eq!(conn.control, Point::new(300.0, 50.0));
}

#[test]
fn arrowhead_points_at_target_center() {
    let (mut doc, a, b) = doc_with_pair();
    doc.add_connection(a, b);
    let scene = plain_scene(&doc);
    let arrow = scene.connections[0].arrow;
    assert_eq!(arrow[0], Point::new(495.0, 45.0));
    assert_eq!(arrow[1], Point::new(505.0, 50.0));
    assert_eq!(arrow[2], Point::new(495.0, 55.0));
}

#[test]
fn default_connection_stroke() {
    let (mut doc, a, b) = doc_with_pair();
    doc.add_connection(a, b);
    let scene = plain_scene(&doc);
    let stroke = &scene.connections[0].stroke;
    assert_eq!(stroke.color, CONNECTION_STROKE);
    assert_eq!(stroke.width, CONNECTION_STROKE_WIDTH);
    assert_eq!(stroke.dash, vec![5.0, 5.0]);
}

#[test]
fn connection_stroke_scales_with_zoom() {
    let (mut doc, a, b) = doc_with_pair();
    doc.add_connection(a, b);
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    let stroke = &scene.connections[0].stroke;
    assert_eq!(stroke.width, 4.0);
    assert_eq!(stroke.dash, vec![10.0, 10.0]);
}

#[test]
fn dangling_connection_is_skipped() {
    let (mut doc, a, _) = doc_with_pair();
    doc.add_connection(a, Uuid::nil());
    let scene = plain_scene(&doc);
    assert!(scene.connections.is_empty());
}

#[test]
fn connection_to_deleted_node_is_skipped() {
    let (mut doc, a, b) = doc_with_pair();
    doc.add_connection(a, b);
    doc.delete_node(&b);
    let scene = plain_scene(&doc);
    assert!(scene.connections.is_empty());
}

// =============================================================
// Selection and preview
// =============================================================

#[test]
fn no_selection_no_chrome() {
    let (doc, _) = doc_with_node(0.0, 0.0, 300.0, 200.0);
    let scene = plain_scene(&doc);
    assert!(scene.selection.is_none());
    assert!(scene.preview.is_none());
}

#[test]
fn selection_handles_sit_on_projected_corners() {
    let (doc, id) = doc_with_node(100.0, 100.0, 300.0, 200.0);
    let ui = UiState { selected_id: Some(id), preview: None };
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    let scene = project(&doc, &cam, &ui, 800.0, 600.0);
    let sel = scene.selection.unwrap();
    // Corner::ALL order is Nw, Ne, Sw, Se.
    assert_eq!(sel.handles[0], Point::new(200.0, 200.0));
    assert_eq!(sel.handles[3], Point::new(800.0, 600.0));
    // Handle and point sizes stay screen-constant.
    assert_eq!(sel.handle_half, HANDLE_RADIUS_PX);
    assert_eq!(sel.point_radius, CONNECTION_POINT_RADIUS_PX);
}

#[test]
fn stale_selection_projects_nothing() {
    let (doc, _) = doc_with_node(0.0, 0.0, 300.0, 200.0);
    let ui = UiState { selected_id: Some(Uuid::new_v4()), preview: None };
    let scene = project(&doc, &Camera::default(), &ui, 800.0, 600.0);
    assert!(scene.selection.is_none());
}

#[test]
fn preview_projects_to_screen_with_preview_stroke() {
    let doc = BoardDoc::new();
    let ui = UiState {
        selected_id: None,
        preview: Some(PreviewSegment {
            start: Point::new(10.0, 20.0),
            end: Point::new(30.0, 40.0),
        }),
    };
    let cam = Camera { x: 100.0, y: 0.0, zoom: 1.0 };
    let scene = project(&doc, &cam, &ui, 800.0, 600.0);
    let preview = scene.preview.unwrap();
    assert_eq!(preview.start, Point::new(110.0, 20.0));
    assert_eq!(preview.end, Point::new(130.0, 40.0));
    assert_eq!(preview.stroke.color, PREVIEW_STROKE);
    assert_eq!(preview.stroke.dash, vec![8.0, 4.0]);
}

// =============================================================
// Minimap
// =============================================================

#[test]
fn minimap_panel_anchors_bottom_right() {
    let doc = BoardDoc::new();
    let scene = plain_scene(&doc);
    let panel = scene.minimap.panel;
    assert_eq!(panel.x, 800.0 - MINIMAP_WIDTH - MINIMAP_MARGIN_PX);
    assert_eq!(panel.y, 600.0 - MINIMAP_HEIGHT - MINIMAP_MARGIN_PX);
}

#[test]
fn minimap_nodes_scale_down_with_floor() {
    let mut doc = BoardDoc::new();
    doc.add_node(NodeDraft {
        position: Some(Point::new(500.0, 200.0)),
        size: Some(Size::new(300.0, 20.0)),
        ..NodeDraft::default()
    });
    let scene = plain_scene(&doc);
    let node = &scene.minimap.nodes[0];
    assert_eq!(node.rect.x, 50.0);
    assert_eq!(node.rect.y, 20.0);
    assert_eq!(node.rect.width, 30.0);
    // 20 * 0.1 = 2, below the 3px floor.
    assert_eq!(node.rect.height, MINIMAP_NODE_MIN_PX);
}

#[test]
fn minimap_colors_follow_node_kind() {
    let mut doc = BoardDoc::new();
    doc.add_node(NodeDraft { kind: Some(NodeKind::Text), ..NodeDraft::default() });
    doc.add_node(NodeDraft { kind: Some(NodeKind::Image), ..NodeDraft::default() });
    doc.add_node(NodeDraft { kind: Some(NodeKind::Document), ..NodeDraft::default() });
    let scene = plain_scene(&doc);
    assert_eq!(scene.minimap.nodes[0].color, MINIMAP_TEXT_COLOR);
    assert_eq!(scene.minimap.nodes[1].color, MINIMAP_IMAGE_COLOR);
    assert_eq!(scene.minimap.nodes[2].color, MINIMAP_DOCUMENT_COLOR);
}

#[test]
fn minimap_indicator_tracks_negated_pan() {
    let doc = BoardDoc::new();
    let cam = Camera { x: -500.0, y: -300.0, zoom: 1.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    let ind = scene.minimap.indicator;
    assert_eq!(ind.x, 50.0);
    assert_eq!(ind.y, 30.0);
    assert_eq!(ind.width, MINIMAP_VIEW_WIDTH);
    assert_eq!(ind.height, MINIMAP_VIEW_HEIGHT);
}

#[test]
fn minimap_indicator_clamps_inside_panel() {
    let doc = BoardDoc::new();
    // Panned far positive: indicator would go negative.
    let cam = Camera { x: 10_000.0, y: 10_000.0, zoom: 1.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    assert_eq!(scene.minimap.indicator.x, 0.0);
    assert_eq!(scene.minimap.indicator.y, 0.0);

    // Panned far negative: indicator pins to the far edge.
    let cam = Camera { x: -10_000.0, y: -10_000.0, zoom: 1.0 };
    let scene = project(&doc, &cam, &UiState::default(), 800.0, 600.0);
    assert_eq!(scene.minimap.indicator.x, MINIMAP_WIDTH - MINIMAP_VIEW_WIDTH);
    assert_eq!(scene.minimap.indicator.y, MINIMAP_HEIGHT - MINIMAP_VIEW_HEIGHT);
}

// =============================================================
// Dash parsing
// =============================================================

#[test]
fn parse_dash_handles_common_patterns() {
    assert_eq!(parse_dash("5,5"), vec![5.0, 5.0]);
    assert_eq!(parse_dash("8, 4"), vec![8.0, 4.0]);
    assert_eq!(parse_dash(""), Vec::<f64>::new());
    assert_eq!(parse_dash("abc,5"), vec![5.0]);
    assert_eq!(parse_dash("-3,0"), Vec::<f64>::new());
}
