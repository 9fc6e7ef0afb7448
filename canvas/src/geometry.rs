//! Drag, resize, and stroke math in logical units.
//!
//! Everything here is a pure function of its inputs. Rotation is ignored:
//! resize handles operate in the element's unrotated local space.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Axis-aligned box in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Smallest box covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// Resize handle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [ResizeAnchor; 8] = [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    pub const CORNERS: [ResizeAnchor; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];

    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor name shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// The handle's location on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            Self::N => Point::new(cx, rect.y),
            Self::Ne => Point::new(rect.right(), rect.y),
            Self::E => Point::new(rect.right(), cy),
            Self::Se => Point::new(rect.right(), rect.bottom()),
            Self::S => Point::new(cx, rect.bottom()),
            Self::Sw => Point::new(rect.x, rect.bottom()),
            Self::W => Point::new(rect.x, cy),
            Self::Nw => Point::new(rect.x, rect.y),
        }
    }
}

/// New top-left for a dragged element. Never negative; no upper bound.
#[must_use]
pub fn drag_position(pointer: Point, offset: Point) -> Point {
    Point::new((pointer.x - offset.x).max(0.0), (pointer.y - offset.y).max(0.0))
}

/// Apply a resize gesture to `start`.
///
/// `delta` is the pointer displacement since the gesture began, in logical
/// units. East/south handles grow the dimension directly; west/north handles
/// move the origin so the opposite edge stays fixed. Neither dimension drops
/// below `min_size`.
#[must_use]
pub fn resize(start: Rect, anchor: ResizeAnchor, delta: Point, min_size: f64) -> Rect {
    let mut out = start;

    if anchor.moves_east() {
        out.width = (start.width + delta.x).max(min_size);
    } else if anchor.moves_west() {
        let (x, width) = shrink_from_origin(start.x, start.width, delta.x, min_size);
        out.x = x;
        out.width = width;
    }

    if anchor.moves_south() {
        out.height = (start.height + delta.y).max(min_size);
    } else if anchor.moves_north() {
        let (y, height) = shrink_from_origin(start.y, start.height, delta.y, min_size);
        out.y = y;
        out.height = height;
    }

    out
}

/// Move the leading edge by `delta` while the trailing edge stays put.
fn shrink_from_origin(start: f64, size: f64, delta: f64, min_size: f64) -> (f64, f64) {
    let d = delta.min(size - min_size);
    (start + d, size - d)
}

/// Translate a point list so its bounding-box origin is `(0, 0)`.
///
/// Returns the original origin, the translated points, and the bounding size
/// (as a point: `x` = width, `y` = height).
#[must_use]
pub fn normalize_points(points: &[Point]) -> (Point, Vec<Point>, Point) {
    let Some(first) = points.first() else {
        return (Point::default(), Vec::new(), Point::default());
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let normalized = points
        .iter()
        .map(|p| Point::new(p.x - min_x, p.y - min_y))
        .collect();
    (Point::new(min_x, min_y), normalized, Point::new(max_x - min_x, max_y - min_y))
}

/// SVG path data through `points` scaled by `scale`: `M x y L x y ...`.
#[must_use]
pub fn freehand_path(points: &[Point], scale: f64) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push(' ');
        d.push_str(&fmt_num(p.x * scale));
        d.push(' ');
        d.push_str(&fmt_num(p.y * scale));
    }
    d
}

/// Format a coordinate with at most two decimals and no trailing zeros.
#[must_use]
pub fn fmt_num(v: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0.
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_owned()
    }
}
