//! Rendering: paints a projected [`Scene`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It consumes the screen-space display list produced by [`crate::scene::project`]
//! and produces pixels; it never reads or mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::scene::{
    ConnectionItem, GridLayer, MinimapItem, NodeItem, PreviewItem, Scene, ScreenRect,
    SelectionItem, Stroke,
};

/// Canvas background color.
const BACKGROUND: &str = "#13132B";

/// Dot radius for the background grid, in screen pixels.
const GRID_DOT_RADIUS: f64 = 1.0;

/// Node corner rounding in screen pixels.
const NODE_CORNER_RADIUS: f64 = 8.0;

/// Minimap panel fill and border.
const MINIMAP_PANEL_FILL: &str = "rgba(30, 30, 46, 0.9)";
const MINIMAP_PANEL_BORDER: &str = "#2E2E5D";

/// Viewport indicator colors in the minimap.
const MINIMAP_INDICATOR_FILL: &str = "rgba(129, 140, 248, 0.2)";
const MINIMAP_INDICATOR_BORDER: &str = "#818CF8";

/// Node label font.
const LABEL_FONT: &str = "12px sans-serif";
const LABEL_COLOR: &str = "#E2E2F5";
const LABEL_PAD: f64 = 10.0;

/// Paint the full scene, back to front.
///
/// `dpr` is the device pixel ratio; the scene itself is in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

    draw_grid(ctx, &scene.grid, scene.width, scene.height)?;

    for conn in &scene.connections {
        draw_connection(ctx, conn)?;
    }

    for node in &scene.nodes {
        draw_node(ctx, node)?;
    }

    if let Some(sel) = &scene.selection {
        draw_selection(ctx, sel)?;
    }

    if let Some(preview) = &scene.preview {
        draw_preview(ctx, preview)?;
    }

    draw_minimap(ctx, &scene.minimap)?;

    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    grid: &GridLayer,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    // Degenerate at extreme zoom-out; skip rather than loop forever.
    if grid.spacing < 4.0 {
        return Ok(());
    }
    ctx.set_fill_style_str(grid.color);
    let mut x = grid.offset.x - grid.spacing;
    while x <= width {
        let mut y = grid.offset.y - grid.spacing;
        while y <= height {
            ctx.begin_path();
            ctx.arc(x, y, GRID_DOT_RADIUS, 0.0, 2.0 * PI)?;
            ctx.fill();
            y += grid.spacing;
        }
        x += grid.spacing;
    }
    Ok(())
}

fn draw_connection(ctx: &CanvasRenderingContext2d, conn: &ConnectionItem) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(0.6);
    apply_stroke(ctx, &conn.stroke)?;

    ctx.begin_path();
    ctx.move_to(conn.start.x, conn.start.y);
    ctx.quadratic_curve_to(conn.control.x, conn.control.y, conn.end.x, conn.end.y);
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.set_fill_style_str(&conn.stroke.color);
    ctx.begin_path();
    ctx.move_to(conn.arrow[0].x, conn.arrow[0].y);
    ctx.line_to(conn.arrow[1].x, conn.arrow[1].y);
    ctx.line_to(conn.arrow[2].x, conn.arrow[2].y);
    ctx.close_path();
    ctx.fill();

    ctx.restore();
    Ok(())
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeItem) -> Result<(), JsValue> {
    let ScreenRect { x, y, width, height } = node.rect;

    rounded_rect_path(ctx, x, y, width, height, NODE_CORNER_RADIUS)?;
    ctx.set_fill_style_str(&node.fill);
    ctx.fill();
    ctx.set_stroke_style_str(&node.border);
    ctx.set_line_width(1.0);
    ctx.stroke();

    if !node.label.is_empty() {
        ctx.save();
        ctx.set_font(LABEL_FONT);
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.fill_text(&node.label, x + LABEL_PAD, y + LABEL_PAD)?;
        ctx.restore();
    }
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, sel: &SelectionItem) -> Result<(), JsValue> {
    let ScreenRect { x, y, width, height } = sel.rect;

    ctx.save();
    ctx.set_stroke_style_str(sel.color);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(x, y, width, height);

    // Corner resize handles.
    ctx.set_fill_style_str("#fff");
    for handle in &sel.handles {
        ctx.fill_rect(
            handle.x - sel.handle_half,
            handle.y - sel.handle_half,
            sel.handle_half * 2.0,
            sel.handle_half * 2.0,
        );
        ctx.stroke_rect(
            handle.x - sel.handle_half,
            handle.y - sel.handle_half,
            sel.handle_half * 2.0,
            sel.handle_half * 2.0,
        );
    }

    // Side connection points.
    ctx.set_fill_style_str(sel.color);
    for point in &sel.points {
        ctx.begin_path();
        ctx.arc(point.x, point.y, sel.point_radius, 0.0, 2.0 * PI)?;
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}

fn draw_preview(ctx: &CanvasRenderingContext2d, preview: &PreviewItem) -> Result<(), JsValue> {
    ctx.save();
    apply_stroke(ctx, &preview.stroke)?;
    ctx.begin_path();
    ctx.move_to(preview.start.x, preview.start.y);
    ctx.line_to(preview.end.x, preview.end.y);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_minimap(ctx: &CanvasRenderingContext2d, minimap: &MinimapItem) -> Result<(), JsValue> {
    let ScreenRect { x, y, width, height } = minimap.panel;

    ctx.save();
    ctx.set_fill_style_str(MINIMAP_PANEL_FILL);
    ctx.fill_rect(x, y, width, height);
    ctx.set_stroke_style_str(MINIMAP_PANEL_BORDER);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, width, height);

    // Node markers, clipped to the panel.
    ctx.begin_path();
    ctx.rect(x, y, width, height);
    ctx.clip();
    ctx.set_global_alpha(0.6);
    for node in &minimap.nodes {
        ctx.set_fill_style_str(node.color);
        ctx.fill_rect(
            x + node.rect.x,
            y + node.rect.y,
            node.rect.width,
            node.rect.height,
        );
    }

    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(MINIMAP_INDICATOR_FILL);
    ctx.fill_rect(
        x + minimap.indicator.x,
        y + minimap.indicator.y,
        minimap.indicator.width,
        minimap.indicator.height,
    );
    ctx.set_stroke_style_str(MINIMAP_INDICATOR_BORDER);
    ctx.stroke_rect(
        x + minimap.indicator.x,
        y + minimap.indicator.y,
        minimap.indicator.width,
        minimap.indicator.height,
    );

    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    let dash = js_sys::Array::new();
    for len in &stroke.dash {
        dash.push(&JsValue::from_f64(*len));
    }
    ctx.set_line_dash(&dash)
}

fn rounded_rect_path(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
) -> Result<(), JsValue> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r)?;
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r)?;
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r)?;
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r)?;
    ctx.close_path();
    Ok(())
}
