//! Document model: nodes, connections, and the in-memory board store.
//!
//! This module defines the wire/persisted types that describe what is on the
//! canvas (`Node`, `Connection`, `CanvasData`), sparse-update types for
//! incremental edits (`NodePatch`, `ConnectionPatch`), and the runtime store
//! that owns the live document (`BoardDoc`).
//!
//! Field names serialize in camelCase to stay compatible with the project
//! JSON persisted by the storage collaborator. Mutations are synchronous and
//! idempotent: updating or deleting a missing id is a silent no-op.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Camera, Point};
use crate::consts::{
    CONNECTION_DASH, CONNECTION_STROKE, CONNECTION_STROKE_WIDTH, DEFAULT_NODE_HEIGHT,
    DEFAULT_NODE_WIDTH, DEFAULT_NODE_X, DEFAULT_NODE_Y,
};
use crate::files::FileId;

/// Unique identifier for a node.
pub type NodeId = Uuid;

/// Unique identifier for a connection.
pub type ConnectionId = Uuid;

/// The kind of content a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Editable text note.
    Text,
    /// Image viewer backed by an uploaded file.
    Image,
    /// Document viewer (PDF or HTML) backed by an uploaded file.
    Document,
}

/// Node dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Optional per-node color overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

/// A content block placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Content kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Top-left corner in world coordinates.
    pub position: Point,
    /// Width and height in world units.
    pub size: Size,
    /// Inline content (text body; empty for file-backed nodes).
    pub content: String,
    /// Weak reference into the uploaded-file store, for image/document nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    /// Optional color overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

/// Optional stroke overrides for a connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

/// A directed link between two nodes.
///
/// `target_node_id` may transiently reference no live node while the user is
/// still drawing the connection; the render pass skips such records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub source_node_id: NodeId,
    pub target_node_id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ConnectionStyle>,
}

/// The persisted canvas aggregate: everything a project stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub viewport: Camera,
}

impl Default for CanvasData {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            viewport: Camera::default(),
        }
    }
}

/// Partial node description used when creating a node.
///
/// Absent fields fall back to the store defaults: a text node at (100, 100)
/// sized 300×200 with empty content.
#[derive(Debug, Clone, Default)]
pub struct NodeDraft {
    pub kind: Option<NodeKind>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub content: Option<String>,
    pub file_id: Option<FileId>,
    pub style: Option<NodeStyle>,
}

/// Sparse update for a node. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

impl NodePatch {
    /// A patch that only moves the node.
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    /// A patch that moves and resizes the node in one step.
    #[must_use]
    pub fn rect(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// Sparse update for a connection. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_node_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ConnectionStyle>,
}

/// In-memory store of the live board.
///
/// Nodes and connections keep insertion order; node order doubles as draw
/// order (later nodes paint on top).
#[derive(Debug, Default)]
pub struct BoardDoc {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl BoardDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole document with a persisted snapshot.
    pub fn load(&mut self, nodes: Vec<Node>, connections: Vec<Connection>) {
        self.nodes = nodes;
        self.connections = connections;
    }

    /// Create a node from a draft, filling defaults for absent fields.
    /// Returns the generated id.
    pub fn add_node(&mut self, draft: NodeDraft) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.push(Node {
            id,
            kind: draft.kind.unwrap_or(NodeKind::Text),
            position: draft
                .position
                .unwrap_or(Point { x: DEFAULT_NODE_X, y: DEFAULT_NODE_Y }),
            size: draft
                .size
                .unwrap_or(Size { width: DEFAULT_NODE_WIDTH, height: DEFAULT_NODE_HEIGHT }),
            content: draft.content.unwrap_or_default(),
            file_id: draft.file_id,
            style: draft.style,
        });
        id
    }

    /// Shallow-merge a patch into an existing node.
    /// Returns false (and changes nothing) if the id is absent.
    pub fn update_node(&mut self, id: &NodeId, patch: &NodePatch) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) else {
            return false;
        };
        if let Some(kind) = patch.kind {
            node.kind = kind;
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(size) = patch.size {
            node.size = size;
        }
        if let Some(ref content) = patch.content {
            node.content.clone_from(content);
        }
        if let Some(file_id) = patch.file_id {
            node.file_id = Some(file_id);
        }
        if let Some(ref style) = patch.style {
            node.style = Some(style.clone());
        }
        true
    }

    /// Remove a node and every connection touching it.
    ///
    /// Returns the removed node and the cascaded connections, or `None` if
    /// the id is absent.
    pub fn delete_node(&mut self, id: &NodeId) -> Option<(Node, Vec<Connection>)> {
        let index = self.nodes.iter().position(|n| n.id == *id)?;
        let node = self.nodes.remove(index);
        let mut cascaded = Vec::new();
        self.connections.retain(|conn| {
            if conn.source_node_id == *id || conn.target_node_id == *id {
                cascaded.push(conn.clone());
                false
            } else {
                true
            }
        });
        Some((node, cascaded))
    }

    /// Create a connection from `source` to `target` with the default stroke
    /// style. Returns the generated id.
    pub fn add_connection(&mut self, source: NodeId, target: NodeId) -> ConnectionId {
        let id = Uuid::new_v4();
        self.connections.push(Connection {
            id,
            source_node_id: source,
            target_node_id: target,
            style: Some(ConnectionStyle {
                stroke_color: Some(CONNECTION_STROKE.to_owned()),
                stroke_width: Some(CONNECTION_STROKE_WIDTH),
                stroke_dasharray: Some(CONNECTION_DASH.to_owned()),
            }),
        });
        id
    }

    /// Shallow-merge a patch into an existing connection.
    /// Returns false (and changes nothing) if the id is absent.
    pub fn update_connection(&mut self, id: &ConnectionId, patch: &ConnectionPatch) -> bool {
        let Some(conn) = self.connections.iter_mut().find(|c| c.id == *id) else {
            return false;
        };
        if let Some(source) = patch.source_node_id {
            conn.source_node_id = source;
        }
        if let Some(target) = patch.target_node_id {
            conn.target_node_id = target;
        }
        if let Some(ref style) = patch.style {
            conn.style = Some(style.clone());
        }
        true
    }

    /// Remove a connection by id, returning it if it was present.
    pub fn delete_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == *id)?;
        Some(self.connections.remove(index))
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    /// Look up a connection by id.
    #[must_use]
    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == *id)
    }

    /// All nodes in insertion (draw) order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of nodes currently in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot the document plus a viewport into the persisted aggregate.
    #[must_use]
    pub fn to_canvas_data(&self, viewport: Camera) -> CanvasData {
        CanvasData {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
            viewport,
        }
    }
}
