//! Element model: the positionable, stylable things placed on a page.
//!
//! A [`CanvasElement`] carries its geometry as plain fields and everything
//! kind-specific in an open-ended `data` JSON bag. [`ElementData`] gives typed,
//! defaulted read access to that bag so renderers never see a missing field.
//!
//! Elements persist as camelCase JSON inside the document blob. Reads are
//! lenient: absent fields take defaults and unknown `type` tags are kept as
//! [`ElementKind::Other`] so they survive a load/save round trip.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{MIN_BLOCK_SIZE, MIN_ELEMENT_SIZE};
use crate::geometry::{self, Rect};

/// Unique identifier for an element, global across all pages of a document.
pub type ElementId = String;

/// Generate a fresh element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The kind of a canvas element, persisted as the `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// Catalog product with image and optional price badge.
    Product,
    /// Free text span.
    Text,
    /// Rectangle, circle, triangle, line, or freehand stroke.
    Shape,
    /// Standalone image.
    Image,
    /// Header band.
    Header,
    /// Footer band.
    Footer,
    /// Formatted campaign date.
    Date,
    /// Any tag this crate does not know. Rendered as nothing.
    Other(String),
}

impl ElementKind {
    /// The persisted tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Product => "product",
            Self::Text => "text",
            Self::Shape => "shape",
            Self::Image => "image",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Date => "date",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "product" => Self::Product,
            "text" => Self::Text,
            "shape" => Self::Shape,
            "image" => Self::Image,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "date" => Self::Date,
            _ => Self::Other(tag),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

/// Shape variants stored in `data.shapeType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
    Line,
    Freehand,
}

impl ShapeType {
    /// Parse a stored shape tag. Unknown tags fall back to a rectangle.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "circle" => Self::Circle,
            "triangle" => Self::Triangle,
            "line" => Self::Line,
            "freehand" => Self::Freehand,
            _ => Self::Rectangle,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Line => "line",
            Self::Freehand => "freehand",
        }
    }
}

/// A catalog or connector product as supplied by the product collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// A resolved price for the badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceInfo {
    /// Struck-through original price, present only when a discount applies.
    pub original: Option<f64>,
    /// The price the customer pays.
    pub current: f64,
}

/// A positionable element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: f64,
    /// Clockwise rotation in degrees around the element center.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rotation: f64,
    /// Opacity percentage, `0..=100`.
    #[serde(default = "default_opacity", deserialize_with = "lenient_opacity")]
    pub opacity: u8,
    /// 1-based page number.
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: u32,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn default_opacity() -> u8 {
    100
}

fn default_page() -> u32 {
    1
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

// Browser hosts serialize NaN as null and may send floats for integer
// fields; neither should fail a document load.

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number(&value).filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn lenient_opacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(number(&value).map_or(100, clamp_opacity))
}

fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let page = number(&value).filter(|v| v.is_finite()).unwrap_or(1.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let page = page.clamp(1.0, f64::from(u32::MAX)) as u32;
    Ok(page)
}

impl CanvasElement {
    /// Create an element with a fresh id, no rotation, full opacity, and empty data.
    #[must_use]
    pub fn new(kind: ElementKind, rect: Rect, page: u32) -> Self {
        Self {
            id: new_element_id(),
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0.0,
            opacity: 100,
            page: page.max(1),
            data: empty_object(),
        }
    }

    /// Builder-style replacement of the data bag.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// A product element referencing `product` at `rect`.
    #[must_use]
    pub fn product(product: &ProductRef, rect: Rect, page: u32) -> Self {
        let product_json = serde_json::to_value(product).unwrap_or_else(|_| empty_object());
        Self::new(ElementKind::Product, rect, page).with_data(serde_json::json!({
            "product": product_json,
            "showPrice": true,
        }))
    }

    /// Commit a freehand stroke captured in logical coordinates.
    ///
    /// Returns `None` for runs of one point or fewer. The element is placed at
    /// the stroke's bounding-box origin and its points are stored relative to
    /// that origin. A box thinner than the shape minimum on either axis is
    /// grown to it, with the path centered on that axis.
    #[must_use]
    pub fn freehand(points: &[Point], stroke: &str, stroke_width: f64, page: u32) -> Option<Self> {
        if points.len() <= 1 {
            return None;
        }
        let (origin, normalized, size) = geometry::normalize_points(points);
        let min = MIN_BLOCK_SIZE.max(stroke_width);
        let (width, height) = (size.x.max(min), size.y.max(min));
        let pad = Point::new((width - size.x) / 2.0, (height - size.y) / 2.0);
        let rect = Rect::new(origin.x - pad.x, origin.y - pad.y, width, height);
        let points_json: Vec<serde_json::Value> = normalized
            .iter()
            .map(|p| serde_json::json!({ "x": p.x + pad.x, "y": p.y + pad.y }))
            .collect();
        Some(Self::new(ElementKind::Shape, rect, page).with_data(serde_json::json!({
            "shapeType": ShapeType::Freehand.as_str(),
            "stroke": stroke,
            "strokeWidth": stroke_width,
            "fill": "none",
            "points": points_json,
        })))
    }

    /// Smallest width/height a resize may produce for this element.
    #[must_use]
    pub fn min_size(&self) -> f64 {
        match self.kind {
            ElementKind::Product | ElementKind::Shape => MIN_BLOCK_SIZE,
            _ => MIN_ELEMENT_SIZE,
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Typed accessor for the data bag.
    #[must_use]
    pub fn data(&self) -> ElementData<'_> {
        ElementData::new(&self.data)
    }

    /// Merge `patch` into the data bag. Null values delete keys.
    pub fn merge_data(&mut self, patch: &serde_json::Value) {
        let Some(incoming) = patch.as_object() else {
            return;
        };
        if !self.data.is_object() {
            self.data = empty_object();
        }
        if let Some(existing) = self.data.as_object_mut() {
            for (k, v) in incoming {
                if v.is_null() {
                    existing.remove(k);
                } else {
                    existing.insert(k.clone(), v.clone());
                }
            }
        }
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Clamp an opacity percentage into `0..=100`.
#[must_use]
pub fn clamp_opacity(value: f64) -> u8 {
    if !value.is_finite() {
        return 100;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.round().clamp(0.0, 100.0) as u8;
    clamped
}

/// Typed access to common fields of a `CanvasElement.data` JSON value.
pub struct ElementData<'a> {
    value: &'a serde_json::Value,
}

impl<'a> ElementData<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    fn str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(default)
    }

    fn opt_str(&self, key: &str) -> Option<&'a str> {
        self.value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    // --- text ---

    /// Text content. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.str_or("text", "")
    }

    #[must_use]
    pub fn font_family(&self) -> &'a str {
        self.str_or("fontFamily", "Arial")
    }

    /// Font size in logical units. Defaults to 16; non-positive values fall back too.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.value
            .get("fontSize")
            .and_then(number)
            .filter(|v| *v > 0.0)
            .unwrap_or(16.0)
    }

    #[must_use]
    pub fn font_weight(&self) -> &'a str {
        self.str_or("fontWeight", "normal")
    }

    #[must_use]
    pub fn font_style(&self) -> &'a str {
        self.str_or("fontStyle", "normal")
    }

    #[must_use]
    pub fn text_decoration(&self) -> &'a str {
        self.str_or("textDecoration", "none")
    }

    #[must_use]
    pub fn text_align(&self) -> &'a str {
        self.str_or("textAlign", "left")
    }

    #[must_use]
    pub fn color(&self) -> &'a str {
        self.str_or("color", "#000000")
    }

    /// Background color; `None` means transparent.
    #[must_use]
    pub fn background_color(&self) -> Option<&'a str> {
        self.opt_str("backgroundColor")
    }

    // --- shape ---

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        ShapeType::parse(self.str_or("shapeType", "rectangle"))
    }

    #[must_use]
    pub fn fill(&self) -> &'a str {
        self.str_or("fill", "#3b82f6")
    }

    #[must_use]
    pub fn stroke(&self) -> &'a str {
        self.str_or("stroke", "#1e40af")
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.value
            .get("strokeWidth")
            .and_then(number)
            .filter(|v| *v >= 0.0)
            .unwrap_or(2.0)
    }

    /// Freehand points relative to the element origin. Malformed entries are skipped.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.value
            .get("points")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|p| {
                        let x = p.get("x").and_then(number)?;
                        let y = p.get("y").and_then(number)?;
                        Some(Point::new(x, y))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // --- image / zones ---

    /// Image URL from `src` or `imageUrl`.
    #[must_use]
    pub fn image_url(&self) -> Option<&'a str> {
        self.opt_str("src").or_else(|| self.opt_str("imageUrl"))
    }

    /// Band fill for header/footer elements.
    #[must_use]
    pub fn zone_fill(&self) -> &'a str {
        self.str_or("fill", "#f3f4f6")
    }

    // --- date ---

    #[must_use]
    pub fn date_format(&self) -> &'a str {
        self.str_or("dateFormat", "DD/MM/YYYY")
    }

    /// Per-element date override, as stored.
    #[must_use]
    pub fn date_override(&self) -> Option<&'a str> {
        self.opt_str("date")
    }

    // --- product ---

    /// Product image URL: element override first, then the product's own.
    #[must_use]
    pub fn product_image_url(&self) -> Option<String> {
        if let Some(url) = self.image_url() {
            return Some(url.to_owned());
        }
        self.value
            .get("product")
            .and_then(|p| p.get("imageUrl"))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
    }

    #[must_use]
    pub fn product_name(&self) -> &'a str {
        self.value
            .get("product")
            .and_then(|p| p.get("name"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
    }

    /// Whether the price badge is enabled for this element. Defaults to true.
    #[must_use]
    pub fn show_price(&self) -> bool {
        self.value
            .get("showPrice")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true)
    }

    /// Resolve the price badge contents.
    ///
    /// Campaign overrides take precedence over catalog prices. A discount only
    /// exists when its price is present and strictly below the original.
    /// Returns `None` when no usable price exists or the badge is disabled.
    #[must_use]
    pub fn price_info(&self) -> Option<PriceInfo> {
        if !self.show_price() {
            return None;
        }
        let product = self.value.get("product");
        let field = |override_key: &str, product_key: &str| {
            self.value
                .get(override_key)
                .and_then(number)
                .or_else(|| product.and_then(|p| p.get(product_key)).and_then(number))
                .filter(|v| v.is_finite() && *v >= 0.0)
        };

        let price = field("campaignPrice", "price")?;
        match field("campaignDiscountPrice", "discountPrice") {
            Some(discount) if discount < price => Some(PriceInfo { original: Some(price), current: discount }),
            _ => Some(PriceInfo { original: None, current: price }),
        }
    }
}

/// Read a JSON number, also accepting numeric strings.
fn number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(raw = %s, error = %e, "non-numeric string in number field");
                None
            }
        },
        _ => None,
    }
}
