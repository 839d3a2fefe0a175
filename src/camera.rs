#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport state for pan/zoom on the infinite canvas.
///
/// `x` / `y` are the pan offset in screen pixels; `zoom` is a scale factor
/// (1.0 = no zoom), always within `[ZOOM_MIN, ZOOM_MAX]`. The struct is
/// persisted verbatim inside a project's canvas data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.zoom,
            y: (screen.y - self.y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.x,
            y: world.y * self.zoom + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the viewport by a raw screen-pixel delta.
    ///
    /// Panning is deliberately not zoom-compensated: dragging the canvas by
    /// ten pixels moves it ten pixels regardless of zoom.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.x += delta_x;
        self.y += delta_y;
    }

    /// Zoom by `factor`, keeping the world point under `(screen)` fixed.
    ///
    /// The new zoom is clamped to `[ZOOM_MIN, ZOOM_MAX]` and the pan offset
    /// is recomputed so the content under the cursor does not jump.
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        self.x = screen.x - anchor.x * self.zoom;
        self.y = screen.y - anchor.y * self.zoom;
    }

    /// Zoom by `factor` about the screen origin (toolbar zoom buttons).
    pub fn zoom_step(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Force the camera back into its invariants after deserialization.
    ///
    /// Non-finite fields reset to their defaults; zoom is clamped.
    pub fn sanitize(&mut self) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        if self.zoom.is_finite() {
            self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        } else {
            self.zoom = 1.0;
        }
    }
}
