//! Rendering: turns document elements into a surface-independent scene.
//!
//! There is exactly one per-kind switch ([`render_element`]) shared by the
//! three surfaces that show a document:
//!
//! - the editor, interactive, at `zoom / 100 * 0.5`, with selection handles
//! - thumbnails, static, page 1 only, scaled to fit a small container
//! - the public view, static, at a fixed 0.5, with pagination
//!
//! A [`Scene`] is plain data in surface pixels relative to the page's top-left
//! corner. The browser host maps it onto DOM nodes; [`crate::svg`] turns it
//! into a standalone SVG. Nothing in this module fails: missing data degrades
//! to placeholders or omitted decorations, unknown kinds render nothing.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::{HANDLE_SIZE_PX, PRICE_LABEL_FRACTION, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH, TRIANGLE_POINTS, VIEW_SCALE};
use crate::date;
use crate::doc::CanvasDocument;
use crate::element::{CanvasElement, ElementData, ElementId, ElementKind, PriceInfo, ShapeType};
use crate::geometry::{ResizeAnchor, freehand_path};

/// Badge width as a share of the product width. The height share follows
/// from [`PRICE_LABEL_FRACTION`] so the badge covers that share of the box.
const BADGE_WIDTH_RATIO: f64 = 0.5;

/// Which surface is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode<'a> {
    /// Interactive editor; `selected` gets a selection ring and handles.
    Editor { selected: Option<&'a str> },
    /// Static, scaled-down preview.
    Thumbnail,
    /// Static public page.
    View,
}

impl RenderMode<'_> {
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Editor { .. })
    }
}

/// Template and campaign data the renderer needs besides the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Campaign date used by `date` elements, as stored (`YYYY-MM-DD`).
    #[serde(default)]
    pub campaign_date: Option<String>,
    /// Template background applied to pages without their own image.
    #[serde(default)]
    pub background_image_url: Option<String>,
    /// Per-page background overrides keyed by page number.
    #[serde(default)]
    pub page_backgrounds: BTreeMap<u32, String>,
    /// Prefix for price labels, e.g. `"$"`.
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

impl RenderContext {
    #[must_use]
    pub fn background_for(&self, page: u32) -> Option<String> {
        self.page_backgrounds
            .get(&page)
            .or(self.background_image_url.as_ref())
            .filter(|url| !url.trim().is_empty())
            .cloned()
    }

    fn price_label(&self, value: f64) -> String {
        format!("{}{value:.2}", self.currency_symbol.as_deref().unwrap_or(""))
    }
}

/// Image reference or the placeholder icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImageSource {
    Url { src: String },
    Placeholder,
}

impl ImageSource {
    fn from_url(url: Option<&str>) -> Self {
        match url {
            Some(src) if !src.trim().is_empty() => Self::Url { src: src.to_owned() },
            _ => Self::Placeholder,
        }
    }
}

/// Styled text run, already scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub text_align: String,
    pub color: String,
    pub background: Option<String>,
}

impl TextSpan {
    fn from_data(text: String, data: &ElementData<'_>, scale: f64) -> Self {
        Self {
            text,
            font_family: data.font_family().to_owned(),
            font_size: data.font_size() * scale,
            font_weight: data.font_weight().to_owned(),
            font_style: data.font_style().to_owned(),
            text_decoration: data.text_decoration().to_owned(),
            text_align: data.text_align().to_owned(),
            color: data.color().to_owned(),
            background: data.background_color().map(str::to_owned),
        }
    }
}

/// Price overlay on a product, positioned relative to the product box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBadge {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Struck-through original price; present only when discounted.
    pub original: Option<String>,
    pub current: String,
    pub font_size: f64,
}

/// Shape geometry relative to the node box, already scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum ShapeNode {
    #[serde(rename_all = "camelCase")]
    Rectangle { fill: String, stroke: String, stroke_width: f64 },
    #[serde(rename_all = "camelCase")]
    Circle { fill: String, stroke: String, stroke_width: f64 },
    /// Polygon in a 100×100 viewBox stretched over the box.
    #[serde(rename_all = "camelCase")]
    Triangle { points: String, fill: String, stroke: String, stroke_width: f64 },
    /// Horizontal bar `thickness` tall, vertically centered at `y`.
    #[serde(rename_all = "camelCase")]
    Line { color: String, thickness: f64, y: f64 },
    /// Stroke-only path.
    #[serde(rename_all = "camelCase")]
    Freehand { d: String, stroke: String, stroke_width: f64 },
}

/// What to draw inside a node box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeContent {
    /// Product image (object-fit: contain) with an optional price badge.
    Product { image: ImageSource, name: String, badge: Option<PriceBadge> },
    Text { span: TextSpan },
    Date { span: TextSpan },
    Shape { shape: ShapeNode },
    Image { image: ImageSource },
    /// Header or footer band.
    Zone { fill: String, image: Option<String> },
}

/// A selection handle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub anchor: ResizeAnchor,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// One rendered element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees clockwise about the box center.
    pub rotation: f64,
    /// `0.0..=1.0`.
    pub opacity: f64,
    pub interactive: bool,
    pub selected: bool,
    pub handles: Vec<Handle>,
    pub content: NodeContent,
}

/// Reserved header/footer band outline shown in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneGuide {
    pub header: bool,
    pub y: f64,
    pub height: f64,
}

/// View page navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages, has_prev: page > 1, has_next: page < total_pages }
    }
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub page: u32,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub background: Option<String>,
    pub nodes: Vec<RenderNode>,
    pub guides: Vec<ZoneGuide>,
    pub pagination: Option<Pagination>,
}

// =============================================================
// Per-element rendering
// =============================================================

/// Render one element at `scale`. Unknown kinds yield `None`.
#[must_use]
pub fn render_element(el: &CanvasElement, scale: f64, mode: RenderMode<'_>, ctx: &RenderContext) -> Option<RenderNode> {
    let data = el.data();
    let width = el.width * scale;
    let height = el.height * scale;

    let content = match el.kind {
        ElementKind::Product => product_content(&data, width, height, ctx),
        ElementKind::Text => NodeContent::Text { span: TextSpan::from_data(data.text().to_owned(), &data, scale) },
        ElementKind::Date => {
            let when = data
                .date_override()
                .or(ctx.campaign_date.as_deref());
            let text = date::format_stored_date(when, data.date_format());
            NodeContent::Date { span: TextSpan::from_data(text, &data, scale) }
        }
        ElementKind::Shape => NodeContent::Shape { shape: shape_node(&data, height, scale) },
        ElementKind::Image => NodeContent::Image { image: ImageSource::from_url(data.image_url()) },
        ElementKind::Header | ElementKind::Footer => {
            NodeContent::Zone { fill: data.zone_fill().to_owned(), image: data.image_url().map(str::to_owned) }
        }
        ElementKind::Other(_) => return None,
    };

    let selected = matches!(mode, RenderMode::Editor { selected: Some(id) } if id == el.id);
    let handles = if selected { corner_handles(width, height) } else { Vec::new() };

    Some(RenderNode {
        id: el.id.clone(),
        x: el.x * scale,
        y: el.y * scale,
        width,
        height,
        rotation: el.rotation,
        opacity: f64::from(el.opacity.min(100)) / 100.0,
        interactive: mode.is_interactive(),
        selected,
        handles,
        content,
    })
}

fn product_content(data: &ElementData<'_>, width: f64, height: f64, ctx: &RenderContext) -> NodeContent {
    let image = ImageSource::from_url(data.product_image_url().as_deref());
    let badge = data.price_info().map(|price| price_badge(price, width, height, ctx));
    NodeContent::Product { image, name: data.product_name().to_owned(), badge }
}

/// Badge anchored bottom-right covering [`PRICE_LABEL_FRACTION`] of the box.
fn price_badge(price: PriceInfo, width: f64, height: f64, ctx: &RenderContext) -> PriceBadge {
    let badge_w = width * BADGE_WIDTH_RATIO;
    let badge_h = height * (PRICE_LABEL_FRACTION / BADGE_WIDTH_RATIO);
    let lines = if price.original.is_some() { 2.0 } else { 1.0 };
    let font_size = (badge_h / (lines + 1.0)).min(badge_w / 5.0);
    PriceBadge {
        x: width - badge_w,
        y: height - badge_h,
        width: badge_w,
        height: badge_h,
        original: price.original.map(|p| ctx.price_label(p)),
        current: ctx.price_label(price.current),
        font_size,
    }
}

fn shape_node(data: &ElementData<'_>, height: f64, scale: f64) -> ShapeNode {
    let fill = data.fill().to_owned();
    let stroke = data.stroke().to_owned();
    let stroke_width = data.stroke_width() * scale;
    match data.shape_type() {
        ShapeType::Rectangle => ShapeNode::Rectangle { fill, stroke, stroke_width },
        ShapeType::Circle => ShapeNode::Circle { fill, stroke, stroke_width },
        ShapeType::Triangle => ShapeNode::Triangle { points: TRIANGLE_POINTS.to_owned(), fill, stroke, stroke_width },
        ShapeType::Line => {
            let thickness = stroke_width.max(1.0).min(height.max(1.0));
            ShapeNode::Line { color: stroke, thickness, y: (height - thickness) / 2.0 }
        }
        ShapeType::Freehand => ShapeNode::Freehand { d: freehand_path(&data.points(), scale), stroke, stroke_width },
    }
}

fn corner_handles(width: f64, height: f64) -> Vec<Handle> {
    let half = HANDLE_SIZE_PX / 2.0;
    ResizeAnchor::CORNERS
        .into_iter()
        .map(|anchor| {
            let (x, y) = match anchor {
                ResizeAnchor::Ne => (width, 0.0),
                ResizeAnchor::Se => (width, height),
                ResizeAnchor::Sw => (0.0, height),
                _ => (0.0, 0.0),
            };
            Handle { anchor, x: x - half, y: y - half, size: HANDLE_SIZE_PX }
        })
        .collect()
}

// =============================================================
// Scenes
// =============================================================

fn render_page(doc: &CanvasDocument, page: u32, scale: f64, mode: RenderMode<'_>, ctx: &RenderContext) -> Scene {
    let dims = doc.dimensions();
    let nodes = doc
        .elements_on_page(page)
        .filter_map(|el| render_element(el, scale, mode, ctx))
        .collect();
    Scene {
        page,
        width: dims.width * scale,
        height: dims.height * scale,
        scale,
        background: ctx.background_for(page),
        nodes,
        guides: Vec::new(),
        pagination: None,
    }
}

/// Interactive editor page at the camera's scale.
#[must_use]
pub fn editor_scene(
    doc: &CanvasDocument,
    camera: &Camera,
    page: u32,
    selected: Option<&str>,
    ctx: &RenderContext,
) -> Scene {
    let page = page.clamp(1, doc.total_pages.max(1));
    let scale = camera.scale();
    let mut scene = render_page(doc, page, scale, RenderMode::Editor { selected }, ctx);

    let dims = doc.dimensions();
    if doc.show_header_zone {
        scene.guides.push(ZoneGuide { header: true, y: 0.0, height: doc.header_height * scale });
    }
    if doc.show_footer_zone {
        scene.guides.push(ZoneGuide {
            header: false,
            y: (dims.height - doc.footer_height) * scale,
            height: doc.footer_height * scale,
        });
    }
    scene
}

/// Page-1 preview scaled to fit within `container_w × container_h`.
#[must_use]
pub fn thumbnail_scene(doc: &CanvasDocument, container_w: f64, container_h: f64, ctx: &RenderContext) -> Scene {
    let dims = doc.dimensions();
    let scale = fit_scale(dims.width, dims.height, container_w, container_h);
    render_page(doc, 1, scale, RenderMode::Thumbnail, ctx)
}

/// Page-1 preview in the default 200×160 container.
#[must_use]
pub fn default_thumbnail_scene(doc: &CanvasDocument, ctx: &RenderContext) -> Scene {
    thumbnail_scene(doc, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, ctx)
}

/// Public read-only page. `page` is clamped into range.
#[must_use]
pub fn view_scene(doc: &CanvasDocument, page: u32, ctx: &RenderContext) -> Scene {
    let total = doc.total_pages.max(1);
    let page = page.clamp(1, total);
    let mut scene = render_page(doc, page, VIEW_SCALE, RenderMode::View, ctx);
    scene.pagination = Some(Pagination::new(page, total));
    scene
}

/// Largest scale at which `w × h` fits inside the container.
#[must_use]
pub fn fit_scale(w: f64, h: f64, container_w: f64, container_h: f64) -> f64 {
    if w <= 0.0 || h <= 0.0 {
        return 1.0;
    }
    (container_w / w).min(container_h / h).max(0.0)
}
