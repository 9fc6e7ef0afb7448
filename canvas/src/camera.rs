#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM_PERCENT, EDITOR_DISPLAY_SCALE, MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT};

/// A point in either screen or logical document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Editor camera: zoom percentage over a fixed display scale.
///
/// `origin` is the screen position (CSS pixels) of the page's top-left corner.
/// `zoom_percent` is what the zoom control shows; the page is additionally
/// drawn at `display_scale` so a 100% zoom fits the editor pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub zoom_percent: f64,
    pub display_scale: f64,
    pub origin: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom_percent: DEFAULT_ZOOM_PERCENT, display_scale: EDITOR_DISPLAY_SCALE, origin: Point::default() }
    }
}

impl Camera {
    /// Screen pixels per logical unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom_percent / 100.0 * self.display_scale
    }

    /// Set the zoom percentage, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom_percent: f64) {
        self.zoom_percent = if zoom_percent.is_finite() {
            zoom_percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT)
        } else {
            DEFAULT_ZOOM_PERCENT
        };
    }

    /// Convert a screen-space point (CSS pixels) to logical coordinates.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        let scale = self.scale();
        Point { x: (screen.x - self.origin.x) / scale, y: (screen.y - self.origin.y) / scale }
    }

    /// Convert a logical point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn logical_to_screen(&self, logical: Point) -> Point {
        let scale = self.scale();
        Point { x: logical.x * scale + self.origin.x, y: logical.y * scale + self.origin.y }
    }

    /// Convert a screen-space distance (pixels) to a logical distance.
    #[must_use]
    pub fn screen_dist_to_logical(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale()
    }
}
