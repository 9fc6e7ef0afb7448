//! Document model: the page set, canvas preset, zones, and element list.
//!
//! A [`CanvasDocument`] is what templates store as their cover page config and
//! campaigns store as their canvas data. It is read leniently (there is no
//! schema validation on load) and then [`CanvasDocument::normalize`]d so the
//! rest of the crate can rely on its invariants:
//!
//! - `total_pages >= 1` and every element's `page` lies in `1..=total_pages`
//! - element ids are unique across all pages
//! - element sizes are positive
//!
//! The backing `elements` list is the paint order: later entries draw on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{CanvasElement, ElementId, clamp_opacity, new_element_id, normalize_rotation};

/// Page dimensions in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Named canvas presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CanvasSize {
    #[default]
    A4Portrait,
    A4Landscape,
    Letter,
    Square,
    Story,
    Banner,
}

impl CanvasSize {
    pub const ALL: [CanvasSize; 6] =
        [Self::A4Portrait, Self::A4Landscape, Self::Letter, Self::Square, Self::Story, Self::Banner];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::A4Portrait => "a4portrait",
            Self::A4Landscape => "a4landscape",
            Self::Letter => "letter",
            Self::Square => "square",
            Self::Story => "story",
            Self::Banner => "banner",
        }
    }

    /// Resolve a preset key. Unknown keys fall back to A4 portrait.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|size| size.key() == key)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn dimensions(self) -> PageSize {
        let (width, height) = match self {
            Self::A4Portrait => (794.0, 1123.0),
            Self::A4Landscape => (1123.0, 794.0),
            Self::Letter => (816.0, 1056.0),
            Self::Square => (1080.0, 1080.0),
            Self::Story => (1080.0, 1920.0),
            Self::Banner => (1200.0, 630.0),
        };
        PageSize { width, height }
    }
}

impl From<String> for CanvasSize {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<CanvasSize> for String {
    fn from(size: CanvasSize) -> Self {
        size.key().to_owned()
    }
}

/// The persisted canvas document for a template or campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    #[serde(default)]
    pub elements: Vec<CanvasElement>,
    #[serde(default)]
    pub canvas_size: CanvasSize,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_footer_height")]
    pub footer_height: f64,
    #[serde(default)]
    pub show_header_zone: bool,
    #[serde(default)]
    pub show_footer_zone: bool,
}

fn default_total_pages() -> u32 {
    1
}

fn default_header_height() -> f64 {
    100.0
}

fn default_footer_height() -> f64 {
    80.0
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

/// Where to move an element in the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZMove {
    Forward,
    Backward,
    Front,
    Back,
}

impl CanvasDocument {
    /// An empty single-page document.
    #[must_use]
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            elements: Vec::new(),
            canvas_size,
            total_pages: 1,
            header_height: default_header_height(),
            footer_height: default_footer_height(),
            show_header_zone: false,
            show_footer_zone: false,
        }
    }

    /// Read a stored document without schema validation, then normalize it.
    ///
    /// Anything that is not an object (including `null`) yields an empty document.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut doc = if value.is_object() {
            match serde_json::from_value::<CanvasDocument>(value.clone()) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::debug!(error = %e, "canvas document unreadable; salvaging elements");
                    Self::salvage(value)
                }
            }
        } else {
            Self::default()
        };
        doc.normalize();
        doc
    }

    /// Best-effort recovery: keep the elements that parse and the document
    /// fields that parse, default the rest.
    fn salvage(value: &serde_json::Value) -> Self {
        let mut doc = Self::default();
        if let Some(items) = value.get("elements").and_then(serde_json::Value::as_array) {
            doc.elements = items
                .iter()
                .filter_map(|item| match serde_json::from_value::<CanvasElement>(item.clone()) {
                    Ok(el) => Some(el),
                    Err(e) => {
                        tracing::debug!(error = %e, "dropping unreadable element");
                        None
                    }
                })
                .collect();
        }
        if let Some(key) = value.get("canvasSize").and_then(serde_json::Value::as_str) {
            doc.canvas_size = CanvasSize::from_key(key);
        }
        if let Some(pages) = value.get("totalPages").and_then(serde_json::Value::as_f64) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pages = pages.clamp(1.0, f64::from(u32::MAX)) as u32;
            doc.total_pages = pages;
        }
        if let Some(h) = value.get("headerHeight").and_then(serde_json::Value::as_f64) {
            doc.header_height = h;
        }
        if let Some(h) = value.get("footerHeight").and_then(serde_json::Value::as_f64) {
            doc.footer_height = h;
        }
        if let Some(show) = value.get("showHeaderZone").and_then(serde_json::Value::as_bool) {
            doc.show_header_zone = show;
        }
        if let Some(show) = value.get("showFooterZone").and_then(serde_json::Value::as_bool) {
            doc.show_footer_zone = show;
        }
        doc
    }

    /// Serialize to the persisted JSON shape.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Enforce document invariants in place.
    pub fn normalize(&mut self) {
        self.total_pages = self.total_pages.max(1);
        if !self.header_height.is_finite() || self.header_height < 0.0 {
            self.header_height = 0.0;
        }
        if !self.footer_height.is_finite() || self.footer_height < 0.0 {
            self.footer_height = 0.0;
        }

        let mut seen: HashSet<ElementId> = HashSet::with_capacity(self.elements.len());
        for el in &mut self.elements {
            if el.id.is_empty() || !seen.insert(el.id.clone()) {
                el.id = new_element_id();
                seen.insert(el.id.clone());
            }
            el.page = el.page.clamp(1, self.total_pages);
            let min = el.min_size();
            if !el.width.is_finite() || el.width <= 0.0 {
                el.width = min;
            }
            if !el.height.is_finite() || el.height <= 0.0 {
                el.height = min;
            }
            el.rotation = normalize_rotation(el.rotation);
            el.opacity = clamp_opacity(f64::from(el.opacity));
            if !el.data.is_object() {
                el.data = serde_json::json!({});
            }
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> PageSize {
        self.canvas_size.dimensions()
    }

    /// Header band height actually reserved on each page.
    #[must_use]
    pub fn reserved_header(&self) -> f64 {
        if self.show_header_zone { self.header_height } else { 0.0 }
    }

    /// Footer band height actually reserved on each page.
    #[must_use]
    pub fn reserved_footer(&self) -> f64 {
        if self.show_footer_zone { self.footer_height } else { 0.0 }
    }

    /// Elements on `page` in paint order.
    pub fn elements_on_page(&self, page: u32) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter().filter(move |el| el.page == page)
    }

    // --- Elements ---

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CanvasElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Append an element on top of the paint order.
    ///
    /// A colliding id is replaced with a fresh one; the page is clamped into
    /// range. Returns the id the element was stored under.
    pub fn insert(&mut self, mut element: CanvasElement) -> ElementId {
        if element.id.is_empty() || self.contains(&element.id) {
            element.id = new_element_id();
        }
        element.page = element.page.clamp(1, self.total_pages);
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<CanvasElement> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    /// Move an element within the paint order. Returns false if nothing moved.
    pub fn reorder(&mut self, id: &str, to: ZMove) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let last = self.elements.len() - 1;
        let target = match to {
            ZMove::Forward => (idx + 1).min(last),
            ZMove::Backward => idx.saturating_sub(1),
            ZMove::Front => last,
            ZMove::Back => 0,
        };
        if target == idx {
            return false;
        }
        let el = self.elements.remove(idx);
        self.elements.insert(target, el);
        true
    }

    // --- Pages ---

    /// Append an empty page and return its number.
    pub fn add_page(&mut self) -> u32 {
        self.total_pages = self.total_pages.saturating_add(1);
        self.total_pages
    }

    /// Delete `page`, its elements, and shift later pages down by one.
    ///
    /// Refuses (returns false) when only one page remains or `page` is out of range.
    pub fn delete_page(&mut self, page: u32) -> bool {
        if self.total_pages <= 1 || page == 0 || page > self.total_pages {
            tracing::debug!(page, total_pages = self.total_pages, "page deletion refused");
            return false;
        }
        self.elements.retain(|el| el.page != page);
        for el in &mut self.elements {
            if el.page > page {
                el.page -= 1;
            }
        }
        self.total_pages -= 1;
        true
    }
}
