//! Hit-testing against nodes and their selection affordances.
//!
//! Geometry helpers here are shared with the scene projection so handles are
//! hit-tested exactly where they are painted.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{CONNECTION_POINT_RADIUS_PX, HANDLE_RADIUS_PX};
use crate::doc::{BoardDoc, Node, NodeId};

/// A corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// All four corners, in painting order.
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];
}

/// A side connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    N,
    E,
    S,
    W,
}

impl Side {
    /// All four sides, in painting order.
    pub const ALL: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];
}

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The node body.
    Body,
    /// A corner resize handle (selected node only).
    ResizeHandle(Corner),
    /// A side connection point (selected node only).
    ConnectionPoint(Side),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub node_id: NodeId,
    pub part: HitPart,
}

/// World-space position of a node's corner.
#[must_use]
pub fn corner_position(node: &Node, corner: Corner) -> Point {
    let Point { x, y } = node.position;
    let w = node.size.width;
    let h = node.size.height;
    match corner {
        Corner::Nw => Point::new(x, y),
        Corner::Ne => Point::new(x + w, y),
        Corner::Sw => Point::new(x, y + h),
        Corner::Se => Point::new(x + w, y + h),
    }
}

/// World-space position of a node's side midpoint.
#[must_use]
pub fn side_midpoint(node: &Node, side: Side) -> Point {
    let Point { x, y } = node.position;
    let w = node.size.width;
    let h = node.size.height;
    match side {
        Side::N => Point::new(x + w / 2.0, y),
        Side::E => Point::new(x + w, y + h / 2.0),
        Side::S => Point::new(x + w / 2.0, y + h),
        Side::W => Point::new(x, y + h / 2.0),
    }
}

/// World-space center of a node's bounding box.
#[must_use]
pub fn node_center(node: &Node) -> Point {
    Point::new(
        node.position.x + node.size.width / 2.0,
        node.position.y + node.size.height / 2.0,
    )
}

/// Whether `world_pt` falls inside the node body.
#[must_use]
pub fn node_contains(node: &Node, world_pt: Point) -> bool {
    world_pt.x >= node.position.x
        && world_pt.x <= node.position.x + node.size.width
        && world_pt.y >= node.position.y
        && world_pt.y <= node.position.y + node.size.height
}

/// Test what is under `world_pt`.
///
/// The selected node's affordances win over any body: corner handles first,
/// then side connection points, both with a screen-constant slop converted
/// to world units through the current zoom. After that, node bodies are
/// tested topmost-first (last drawn wins).
#[must_use]
pub fn hit_test(
    world_pt: Point,
    doc: &BoardDoc,
    camera: &Camera,
    selected_id: Option<NodeId>,
) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| doc.node(&id)) {
        let handle_slop = camera.screen_dist_to_world(HANDLE_RADIUS_PX);
        for corner in Corner::ALL {
            let pos = corner_position(selected, corner);
            if (world_pt.x - pos.x).abs() <= handle_slop && (world_pt.y - pos.y).abs() <= handle_slop {
                return Some(Hit {
                    node_id: selected.id,
                    part: HitPart::ResizeHandle(corner),
                });
            }
        }

        let point_slop = camera.screen_dist_to_world(CONNECTION_POINT_RADIUS_PX + 2.0);
        for side in Side::ALL {
            let pos = side_midpoint(selected, side);
            let dx = world_pt.x - pos.x;
            let dy = world_pt.y - pos.y;
            if dx * dx + dy * dy <= point_slop * point_slop {
                return Some(Hit {
                    node_id: selected.id,
                    part: HitPart::ConnectionPoint(side),
                });
            }
        }
    }

    body_hit(world_pt, doc).map(|node_id| Hit { node_id, part: HitPart::Body })
}

/// Topmost node whose body contains `world_pt`, ignoring affordances.
///
/// Used for plain body picks and for resolving connection drop targets.
#[must_use]
pub fn body_hit(world_pt: Point, doc: &BoardDoc) -> Option<NodeId> {
    doc.nodes()
        .iter()
        .rev()
        .find(|node| node_contains(node, world_pt))
        .map(|node| node.id)
}
