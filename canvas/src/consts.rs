//! Shared numeric constants for the canvas crate.

// ── Element sizing ──────────────────────────────────────────────

/// Minimum width/height for product and shape elements, in logical units.
pub const MIN_BLOCK_SIZE: f64 = 40.0;

/// Minimum width/height for every other element kind, in logical units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

// ── Camera ──────────────────────────────────────────────────────

/// The editor draws the page at half size.
pub const EDITOR_DISPLAY_SCALE: f64 = 0.5;

/// Fixed scale of the public view page.
pub const VIEW_SCALE: f64 = 0.5;

pub const DEFAULT_ZOOM_PERCENT: f64 = 100.0;
pub const MIN_ZOOM_PERCENT: f64 = 10.0;
pub const MAX_ZOOM_PERCENT: f64 = 400.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for handles and edges.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Rendered handle square size in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;

// ── Auto-layout ─────────────────────────────────────────────────

pub const LAYOUT_MARGIN: f64 = 30.0;
pub const LAYOUT_GAP: f64 = 20.0;

/// Share of a grid cell an item may occupy.
pub const LAYOUT_FILL: f64 = 0.9;

/// Product tile width:height ratio (4:5).
pub const PRODUCT_ASPECT: f64 = 4.0 / 5.0;

pub const MIN_PRODUCT_WIDTH: f64 = 120.0;
pub const MIN_PRODUCT_HEIGHT: f64 = 150.0;

pub const MAX_PRODUCTS_PER_PAGE: usize = 8;

// ── Rendering ───────────────────────────────────────────────────

/// Price badge edge length as a fraction of the product box.
pub const PRICE_LABEL_FRACTION: f64 = 1.0 / 6.0;

pub const THUMBNAIL_WIDTH: f64 = 200.0;
pub const THUMBNAIL_HEIGHT: f64 = 160.0;

/// SVG polygon for triangles in a 100×100 viewBox.
pub const TRIANGLE_POINTS: &str = "50,5 95,95 5,95";

// ── Editor history ──────────────────────────────────────────────

pub const HISTORY_LIMIT: usize = 50;
