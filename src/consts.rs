//! Shared numeric constants and default colors for the board engine.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;

/// Highest allowed zoom factor.
pub const ZOOM_MAX: f64 = 3.0;

/// Multiplicative zoom step for a wheel tick away from the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Multiplicative zoom step for a wheel tick toward the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Multiplicative zoom step for the toolbar zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

// ── Node geometry ───────────────────────────────────────────────

/// Resize floor: a node can never be narrower than this, in world units.
pub const MIN_NODE_WIDTH: f64 = 200.0;

/// Resize floor: a node can never be shorter than this, in world units.
pub const MIN_NODE_HEIGHT: f64 = 150.0;

/// Default position for a node created without one.
pub const DEFAULT_NODE_X: f64 = 100.0;
/// Default position for a node created without one.
pub const DEFAULT_NODE_Y: f64 = 100.0;

/// Default width for a node created without a size.
pub const DEFAULT_NODE_WIDTH: f64 = 300.0;
/// Default height for a node created without a size.
pub const DEFAULT_NODE_HEIGHT: f64 = 200.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space half-size of a corner resize handle, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Screen-space radius of a side connection point, in pixels.
pub const CONNECTION_POINT_RADIUS_PX: f64 = 6.0;

// ── Background grid ─────────────────────────────────────────────

/// Dot grid spacing in world units.
pub const GRID_SPACING_WORLD: f64 = 40.0;

/// Dot grid color.
pub const GRID_DOT_COLOR: &str = "#2E2E5D";

// ── Minimap ─────────────────────────────────────────────────────

/// World-to-minimap scale factor.
pub const MINIMAP_SCALE: f64 = 0.1;

/// Minimap panel width in pixels.
pub const MINIMAP_WIDTH: f64 = 200.0;
/// Minimap panel height in pixels.
pub const MINIMAP_HEIGHT: f64 = 120.0;

/// Smallest rendered size for a node in the minimap, in pixels.
pub const MINIMAP_NODE_MIN_PX: f64 = 3.0;

/// Viewport indicator size in the minimap, in pixels.
pub const MINIMAP_VIEW_WIDTH: f64 = 24.0;
/// Viewport indicator size in the minimap, in pixels.
pub const MINIMAP_VIEW_HEIGHT: f64 = 16.0;

/// Margin between the minimap panel and the canvas edge, in pixels.
pub const MINIMAP_MARGIN_PX: f64 = 16.0;

// ── Palette ─────────────────────────────────────────────────────

/// Default connection stroke color.
pub const CONNECTION_STROKE: &str = "#6366F1";
/// Default connection stroke width in world units.
pub const CONNECTION_STROKE_WIDTH: f64 = 2.0;
/// Default connection dash pattern (world units, comma separated).
pub const CONNECTION_DASH: &str = "5,5";

/// Connection preview stroke color.
pub const PREVIEW_STROKE: &str = "#F59E0B";
/// Connection preview stroke width in world units.
pub const PREVIEW_STROKE_WIDTH: f64 = 3.0;
/// Connection preview dash pattern.
pub const PREVIEW_DASH: &str = "8,4";

/// Selection outline and handle accent color.
pub const SELECTION_STROKE: &str = "#6366F1";

/// Default node body fill when no per-node style is set.
pub const NODE_FILL: &str = "#1E1E2E";
/// Default node border color when no per-node style is set.
pub const NODE_BORDER: &str = "#2E2E5D";

/// Minimap color for text nodes.
pub const MINIMAP_TEXT_COLOR: &str = "#6366F1";
/// Minimap color for image nodes.
pub const MINIMAP_IMAGE_COLOR: &str = "#10B981";
/// Minimap color for document nodes.
pub const MINIMAP_DOCUMENT_COLOR: &str = "#EF4444";
