use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::camera::{Camera, Point};
use crate::consts::HISTORY_LIMIT;
use crate::doc::{CanvasDocument, CanvasSize, ZMove};
use crate::element::{CanvasElement, ElementId, ElementKind, ProductRef, clamp_opacity, new_element_id, normalize_rotation};
use crate::geometry::{self, Rect, ResizeAnchor};
use crate::hit::{self, HitPart};
use crate::input::{BrushStyle, Button, InputState, Tool, UiState};
use crate::layout;
use crate::render::{self, RenderContext, Scene};
use crate::svg;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Offset applied to duplicated elements, in logical units.
const DUPLICATE_OFFSET: f64 = 20.0;

/// Actions returned from input handlers and commands for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    None,
    ElementCreated { element: CanvasElement },
    ElementUpdated { id: ElementId },
    ElementDeleted { id: ElementId },
    PageAdded { page: u32 },
    PageDeleted { page: u32 },
    PageChanged { page: u32 },
    SelectionChanged { id: Option<ElementId> },
    /// The whole document was swapped (load, undo, redo).
    DocumentReplaced,
    SetCursor { cursor: String },
    RenderNeeded,
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Data keys to merge or remove (null values delete keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Template style defaults used when instantiating new elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDefaults {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
}

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn default_color() -> String {
    "#000000".to_owned()
}

fn default_accent() -> String {
    "#3b82f6".to_owned()
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self { font_family: default_font_family(), color: default_color(), accent_color: default_accent() }
    }
}

/// Explicit user edits. Every document mutation outside pointer gestures goes
/// through [`EngineCore::apply`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Append a fully specified element on top.
    AddElement { element: CanvasElement },
    /// Create an element of `kind` with template defaults on the current page.
    CreateElement {
        kind: String,
        #[serde(default)]
        at: Option<Point>,
    },
    /// Create a product element on the current page.
    AddProduct {
        product: ProductRef,
        #[serde(default)]
        at: Option<Point>,
    },
    UpdateElement { id: ElementId, patch: ElementPatch },
    MoveElement { id: ElementId, x: f64, y: f64 },
    ResizeElement { id: ElementId, anchor: ResizeAnchor, dx: f64, dy: f64 },
    RotateElement { id: ElementId, degrees: f64 },
    SetOpacity { id: ElementId, opacity: f64 },
    DeleteElement { id: ElementId },
    DuplicateElement { id: ElementId },
    Reorder { id: ElementId, to: ZMove },
    AddPage,
    DeletePage { page: u32 },
    SetPage { page: u32 },
    SetZoom { percent: f64 },
    SetTool { tool: Tool },
    SetBrush { brush: BrushStyle },
    Select { id: Option<ElementId> },
    SetCanvasSize { size: CanvasSize },
    SetZones {
        show_header: bool,
        show_footer: bool,
        #[serde(default)]
        header_height: Option<f64>,
        #[serde(default)]
        footer_height: Option<f64>,
    },
    /// Auto-layout `products` into the document.
    PlaceProducts { products: Vec<ProductRef>, per_page: usize },
    Undo,
    Redo,
}

/// Bounded snapshot history for undo/redo.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<CanvasDocument>,
    redo: Vec<CanvasDocument>,
}

impl History {
    /// Remember `previous` as the state before a new edit. Clears redo.
    pub fn record(&mut self, previous: CanvasDocument) {
        self.undo.push(previous);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn undo(&mut self, current: CanvasDocument) -> Option<CanvasDocument> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    fn redo(&mut self, current: CanvasDocument) -> Option<CanvasDocument> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

/// Core editor state: all logic that doesn't depend on the browser.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub doc: CanvasDocument,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub history: History,
    pub style: StyleDefaults,
    /// Document as it was when the current drag/resize started.
    gesture_start: Option<CanvasDocument>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `doc` on page 1 with a fresh history.
    #[must_use]
    pub fn with_document(doc: CanvasDocument) -> Self {
        let mut core = Self::new();
        core.doc = doc;
        core
    }

    // --- Data inputs ---

    /// Replace the document from its stored JSON. Clears history and selection.
    pub fn load_document(&mut self, value: &serde_json::Value) -> Vec<Action> {
        self.doc = CanvasDocument::from_json(value);
        self.history.clear();
        self.input = InputState::Idle;
        self.gesture_start = None;
        self.ui.selected_id = None;
        self.ui.current_page = 1;
        vec![Action::DocumentReplaced, Action::RenderNeeded]
    }

    /// The persisted JSON for an explicit save.
    #[must_use]
    pub fn document_json(&self) -> serde_json::Value {
        self.doc.to_json()
    }

    // --- Queries ---

    /// The currently selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&CanvasElement> {
        self.doc.get(id)
    }

    /// Editor scene for the current page.
    #[must_use]
    pub fn scene(&self, ctx: &RenderContext) -> Scene {
        render::editor_scene(&self.doc, &self.camera, self.ui.current_page, self.selection(), ctx)
    }

    // --- Commands ---

    /// Apply one explicit edit and report what changed.
    ///
    /// Commands naming a missing element are no-ops. Document changes are
    /// recorded for undo. A gesture still in progress is committed first, so
    /// its history entry lands before the command's.
    pub fn apply(&mut self, command: Command) -> Vec<Action> {
        let mut actions = if self.input.is_idle() { Vec::new() } else { self.finish_gesture() };
        actions.extend(self.apply_command(command));
        actions
    }

    fn apply_command(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetZoom { percent } => {
                self.camera.set_zoom(percent);
                vec![Action::RenderNeeded]
            }
            Command::SetTool { tool } => {
                self.ui.tool = tool;
                let cursor = if tool == Tool::Draw { "crosshair" } else { "default" };
                vec![Action::SetCursor { cursor: cursor.to_owned() }]
            }
            Command::SetBrush { brush } => {
                self.ui.brush = brush;
                vec![Action::None]
            }
            Command::Select { id } => self.select(id),
            Command::SetPage { page } => self.set_page(page),
            other => self.mutate(|core| core.apply_edit(other)),
        }
    }

    /// Run a document edit, recording the previous document when it changed.
    fn mutate<F>(&mut self, edit: F) -> Vec<Action>
    where
        F: FnOnce(&mut Self) -> Vec<Action>,
    {
        let before = self.doc.clone();
        let actions = edit(self);
        if self.doc != before {
            self.history.record(before);
        }
        actions
    }

    fn apply_edit(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::AddElement { element } => self.add_element(element),
            Command::CreateElement { kind, at } => {
                let element = self.default_element(ElementKind::from(kind), at);
                self.add_element(element)
            }
            Command::AddProduct { product, at } => {
                let origin = at.unwrap_or(Point::new(50.0, 50.0));
                let rect = Rect::new(origin.x.max(0.0), origin.y.max(0.0), 200.0, 250.0);
                self.add_element(CanvasElement::product(&product, rect, self.ui.current_page))
            }
            Command::UpdateElement { id, patch } => self.update_element(&id, &patch),
            Command::MoveElement { id, x, y } => self.update_element(
                &id,
                &ElementPatch { x: Some(x.max(0.0)), y: Some(y.max(0.0)), ..Default::default() },
            ),
            Command::ResizeElement { id, anchor, dx, dy } => {
                let Some(el) = self.doc.get(&id) else {
                    return vec![Action::None];
                };
                let rect = geometry::resize(el.rect(), anchor, Point::new(dx, dy), el.min_size());
                self.set_rect(&id, rect)
            }
            Command::RotateElement { id, degrees } => {
                self.update_element(&id, &ElementPatch { rotation: Some(degrees), ..Default::default() })
            }
            Command::SetOpacity { id, opacity } => {
                self.update_element(&id, &ElementPatch { opacity: Some(opacity), ..Default::default() })
            }
            Command::DeleteElement { id } => self.delete_element(&id),
            Command::DuplicateElement { id } => self.duplicate_element(&id),
            Command::Reorder { id, to } => {
                if self.doc.reorder(&id, to) {
                    vec![Action::ElementUpdated { id }, Action::RenderNeeded]
                } else {
                    vec![Action::None]
                }
            }
            Command::AddPage => {
                let page = self.doc.add_page();
                self.ui.current_page = page;
                vec![Action::PageAdded { page }, Action::PageChanged { page }, Action::RenderNeeded]
            }
            Command::DeletePage { page } => self.delete_page(page),
            Command::SetCanvasSize { size } => {
                self.doc.canvas_size = size;
                vec![Action::RenderNeeded]
            }
            Command::SetZones { show_header, show_footer, header_height, footer_height } => {
                self.doc.show_header_zone = show_header;
                self.doc.show_footer_zone = show_footer;
                if let Some(h) = header_height.filter(|h| h.is_finite() && *h >= 0.0) {
                    self.doc.header_height = h;
                }
                if let Some(h) = footer_height.filter(|h| h.is_finite() && *h >= 0.0) {
                    self.doc.footer_height = h;
                }
                vec![Action::RenderNeeded]
            }
            Command::PlaceProducts { products, per_page } => {
                let ids = layout::place_products(&mut self.doc, &products, per_page);
                let mut actions: Vec<Action> = ids
                    .iter()
                    .filter_map(|id| self.doc.get(id))
                    .map(|el| Action::ElementCreated { element: el.clone() })
                    .collect();
                actions.push(Action::RenderNeeded);
                actions
            }
            // Handled in `apply` without touching the document.
            Command::Undo
            | Command::Redo
            | Command::SetZoom { .. }
            | Command::SetTool { .. }
            | Command::SetBrush { .. }
            | Command::Select { .. }
            | Command::SetPage { .. } => vec![Action::None],
        }
    }

    fn add_element(&mut self, element: CanvasElement) -> Vec<Action> {
        let id = self.doc.insert(element);
        self.ui.selected_id = Some(id.clone());
        let Some(stored) = self.doc.get(&id) else {
            return vec![Action::None];
        };
        vec![
            Action::ElementCreated { element: stored.clone() },
            Action::SelectionChanged { id: Some(id) },
            Action::RenderNeeded,
        ]
    }

    /// Template defaults for a new element of `kind`.
    fn default_element(&self, kind: ElementKind, at: Option<Point>) -> CanvasElement {
        let page = self.ui.current_page;
        let dims = self.doc.dimensions();
        let origin = at.unwrap_or(Point::new(50.0, 50.0));
        let (x, y) = (origin.x.max(0.0), origin.y.max(0.0));
        let style = &self.style;

        match kind {
            ElementKind::Text => CanvasElement::new(kind, Rect::new(x, y, 300.0, 60.0), page).with_data(serde_json::json!({
                "text": "New text",
                "fontFamily": style.font_family,
                "fontSize": 24,
                "color": style.color,
            })),
            ElementKind::Shape => CanvasElement::new(kind, Rect::new(x, y, 120.0, 120.0), page).with_data(serde_json::json!({
                "shapeType": "rectangle",
                "fill": style.accent_color,
                "stroke": style.color,
                "strokeWidth": 2,
            })),
            ElementKind::Image => CanvasElement::new(kind, Rect::new(x, y, 200.0, 200.0), page),
            ElementKind::Date => CanvasElement::new(kind, Rect::new(x, y, 240.0, 40.0), page).with_data(serde_json::json!({
                "dateFormat": "DD/MM/YYYY",
                "fontFamily": style.font_family,
                "fontSize": 18,
                "color": style.color,
            })),
            ElementKind::Header => {
                let h = self.doc.header_height.max(crate::consts::MIN_ELEMENT_SIZE);
                CanvasElement::new(kind, Rect::new(0.0, 0.0, dims.width, h), page)
                    .with_data(serde_json::json!({ "fill": style.accent_color }))
            }
            ElementKind::Footer => {
                let h = self.doc.footer_height.max(crate::consts::MIN_ELEMENT_SIZE);
                CanvasElement::new(kind, Rect::new(0.0, dims.height - h, dims.width, h), page)
                    .with_data(serde_json::json!({ "fill": style.accent_color }))
            }
            ElementKind::Product | ElementKind::Other(_) => {
                CanvasElement::new(kind, Rect::new(x, y, 200.0, 250.0), page)
            }
        }
    }

    fn update_element(&mut self, id: &str, patch: &ElementPatch) -> Vec<Action> {
        let total_pages = self.doc.total_pages;
        let Some(el) = self.doc.get_mut(id) else {
            return vec![Action::None];
        };
        let min = el.min_size();
        if let Some(x) = patch.x.filter(|v| v.is_finite()) {
            el.x = x;
        }
        if let Some(y) = patch.y.filter(|v| v.is_finite()) {
            el.y = y;
        }
        if let Some(w) = patch.width.filter(|v| v.is_finite()) {
            el.width = w.max(min);
        }
        if let Some(h) = patch.height.filter(|v| v.is_finite()) {
            el.height = h.max(min);
        }
        if let Some(r) = patch.rotation {
            el.rotation = normalize_rotation(r);
        }
        if let Some(o) = patch.opacity {
            el.opacity = clamp_opacity(o);
        }
        if let Some(page) = patch.page {
            el.page = page.clamp(1, total_pages);
        }
        if let Some(data) = &patch.data {
            el.merge_data(data);
        }
        vec![Action::ElementUpdated { id: id.to_owned() }, Action::RenderNeeded]
    }

    fn set_rect(&mut self, id: &str, rect: Rect) -> Vec<Action> {
        let Some(el) = self.doc.get_mut(id) else {
            return vec![Action::None];
        };
        if el.rect() == rect {
            return vec![Action::None];
        }
        el.set_rect(rect);
        vec![Action::ElementUpdated { id: id.to_owned() }, Action::RenderNeeded]
    }

    fn delete_element(&mut self, id: &str) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return vec![Action::None];
        }
        let mut actions = vec![Action::ElementDeleted { id: id.to_owned() }];
        if self.ui.selected_id.as_deref() == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged { id: None });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn duplicate_element(&mut self, id: &str) -> Vec<Action> {
        let Some(original) = self.doc.get(id) else {
            return vec![Action::None];
        };
        let mut copy = original.clone();
        copy.id = new_element_id();
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        self.add_element(copy)
    }

    fn delete_page(&mut self, page: u32) -> Vec<Action> {
        let selected_page = self.selection().and_then(|id| self.doc.get(id)).map(|el| el.page);
        if !self.doc.delete_page(page) {
            return vec![Action::None];
        }
        let mut actions = vec![Action::PageDeleted { page }];
        if selected_page == Some(page) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged { id: None });
        }
        let clamped = self.ui.current_page.min(self.doc.total_pages);
        if clamped != self.ui.current_page {
            self.ui.current_page = clamped;
            actions.push(Action::PageChanged { page: clamped });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        let id = id.filter(|id| self.doc.contains(id));
        if self.ui.selected_id == id {
            return vec![Action::None];
        }
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged { id }, Action::RenderNeeded]
    }

    fn set_page(&mut self, page: u32) -> Vec<Action> {
        let page = page.clamp(1, self.doc.total_pages);
        if page == self.ui.current_page {
            return vec![Action::None];
        }
        self.ui.current_page = page;
        let mut actions = vec![Action::PageChanged { page }];
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged { id: None });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn undo(&mut self) -> Vec<Action> {
        let current = self.doc.clone();
        match self.history.undo(current) {
            Some(previous) => self.replace_document(previous),
            None => vec![Action::None],
        }
    }

    fn redo(&mut self) -> Vec<Action> {
        let current = self.doc.clone();
        match self.history.redo(current) {
            Some(next) => self.replace_document(next),
            None => vec![Action::None],
        }
    }

    fn replace_document(&mut self, doc: CanvasDocument) -> Vec<Action> {
        self.doc = doc;
        self.ui.current_page = self.ui.current_page.clamp(1, self.doc.total_pages);
        if let Some(id) = self.ui.selected_id.clone() {
            if !self.doc.contains(&id) {
                self.ui.selected_id = None;
            }
        }
        vec![Action::DocumentReplaced, Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Begin a gesture at `screen_pt` (CSS pixels).
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let mut actions = if self.input.is_idle() { Vec::new() } else { self.finish_gesture() };
        if button != Button::Primary {
            return actions;
        }
        let p = self.camera.screen_to_logical(screen_pt);

        if self.ui.tool == Tool::Draw {
            self.input = InputState::Drawing { points: vec![p] };
            actions.push(Action::RenderNeeded);
            return actions;
        }

        let hit = hit::hit_test(p, &self.doc, self.ui.current_page, &self.camera, self.selection());
        let Some(hit) = hit else {
            if self.ui.selected_id.take().is_some() {
                actions.push(Action::SelectionChanged { id: None });
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };
        let Some(el) = self.doc.get(&hit.element_id) else {
            return actions;
        };

        match hit.part {
            HitPart::ResizeHandle(anchor) => {
                self.input = InputState::Resizing {
                    id: el.id.clone(),
                    anchor,
                    start_pointer: p,
                    start_rect: el.rect(),
                    min_size: el.min_size(),
                };
                actions.push(Action::SetCursor { cursor: anchor.cursor().to_owned() });
            }
            HitPart::Body => {
                let id = el.id.clone();
                self.input = InputState::Dragging { id: id.clone(), offset: p.sub(Point::new(el.x, el.y)) };
                if self.ui.selected_id.as_deref() != Some(id.as_str()) {
                    self.ui.selected_id = Some(id.clone());
                    actions.push(Action::SelectionChanged { id: Some(id) });
                }
                actions.push(Action::SetCursor { cursor: "move".to_owned() });
            }
        }
        self.gesture_start = Some(self.doc.clone());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Advance the active gesture, or report the hover cursor when idle.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let p = self.camera.screen_to_logical(screen_pt);
        match &mut self.input {
            InputState::Idle => vec![Action::SetCursor { cursor: self.hover_cursor(p).to_owned() }],
            InputState::Drawing { points } => {
                points.push(p);
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { id, offset } => {
                let id = id.clone();
                let pos = geometry::drag_position(p, *offset);
                let Some(el) = self.doc.get(&id) else {
                    return vec![Action::None];
                };
                let rect = Rect::new(pos.x, pos.y, el.width, el.height);
                self.set_rect(&id, rect)
            }
            InputState::Resizing { id, anchor, start_pointer, start_rect, min_size } => {
                let id = id.clone();
                let rect = geometry::resize(*start_rect, *anchor, p.sub(*start_pointer), *min_size);
                self.set_rect(&id, rect)
            }
        }
    }

    /// End the active gesture.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button) -> Vec<Action> {
        self.finish_gesture()
    }

    /// The pointer left the canvas: end the active gesture.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Points of the stroke being drawn, for live preview.
    #[must_use]
    pub fn pending_stroke(&self) -> &[Point] {
        match &self.input {
            InputState::Drawing { points } => points,
            _ => &[],
        }
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let start = self.gesture_start.take();
        if !state.is_idle() {
            tracing::trace!(gesture = state.name(), "gesture finished");
        }
        match state {
            InputState::Idle => Vec::new(),
            InputState::Drawing { points } => {
                let brush = &self.ui.brush;
                let Some(element) = CanvasElement::freehand(&points, &brush.color, brush.width, self.ui.current_page)
                else {
                    tracing::debug!(points = points.len(), "freehand stroke discarded");
                    return vec![Action::RenderNeeded];
                };
                let before = self.doc.clone();
                let id = self.doc.insert(element);
                self.history.record(before);
                match self.doc.get(&id) {
                    Some(stored) => vec![Action::ElementCreated { element: stored.clone() }, Action::RenderNeeded],
                    None => vec![Action::RenderNeeded],
                }
            }
            InputState::Dragging { .. } | InputState::Resizing { .. } => {
                if let Some(before) = start {
                    if before != self.doc {
                        self.history.record(before);
                    }
                }
                vec![Action::SetCursor { cursor: "default".to_owned() }, Action::RenderNeeded]
            }
        }
    }

    fn hover_cursor(&self, p: Point) -> &'static str {
        if self.ui.tool == Tool::Draw {
            return "crosshair";
        }
        match hit::hit_test(p, &self.doc, self.ui.current_page, &self.camera, self.selection()) {
            Some(hit) => match hit.part {
                HitPart::ResizeHandle(anchor) => anchor.cursor(),
                HitPart::Body => "move",
            },
            None => "default",
        }
    }
}

// =============================================================
// Browser facade
// =============================================================

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from(js_sys::Error::new(&message.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// The editor as exposed to the browser host. Inputs and outputs are JSON strings.
#[wasm_bindgen]
#[derive(Default)]
pub struct Engine {
    core: EngineCore,
    ctx: RenderContext,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored document (`coverPageConfig` / `canvasData`).
    ///
    /// # Errors
    ///
    /// Returns a JS error if `json` is not valid JSON.
    pub fn load_document(&mut self, json: &str) -> Result<String, JsValue> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(js_error)?;
        to_json(&self.core.load_document(&value))
    }

    /// The document to persist on save.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn document_json(&self) -> Result<String, JsValue> {
        to_json(&self.core.document_json())
    }

    /// Template/campaign data used for backgrounds, dates, and prices.
    ///
    /// # Errors
    ///
    /// Returns a JS error if `json` is not a valid render context.
    pub fn set_render_context(&mut self, json: &str) -> Result<(), JsValue> {
        self.ctx = serde_json::from_str(json).map_err(js_error)?;
        Ok(())
    }

    /// Template style defaults for new elements.
    ///
    /// # Errors
    ///
    /// Returns a JS error if `json` is not a valid style config.
    pub fn set_style_defaults(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.style = serde_json::from_str(json).map_err(js_error)?;
        Ok(())
    }

    /// Screen position of the page's top-left corner.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.core.camera.origin = Point::new(x, y);
    }

    /// Apply a JSON-encoded [`Command`].
    ///
    /// # Errors
    ///
    /// Returns a JS error if the command does not parse.
    pub fn apply(&mut self, command_json: &str) -> Result<String, JsValue> {
        let command: Command = serde_json::from_str(command_json).map_err(js_error)?;
        to_json(&self.core.apply(command))
    }

    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_down(Point::new(x, y), Button::from_dom(button)))
    }

    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_move(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn on_pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_up(Point::new(x, y), Button::from_dom(button)))
    }

    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn on_pointer_leave(&mut self) -> Result<String, JsValue> {
        to_json(&self.core.on_pointer_leave())
    }

    /// Editor scene for the current page.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn scene_json(&self) -> Result<String, JsValue> {
        to_json(&self.core.scene(&self.ctx))
    }

    /// Live freehand preview path in surface pixels.
    #[must_use]
    pub fn pending_stroke_path(&self) -> String {
        geometry::freehand_path(self.core.pending_stroke(), self.core.camera.scale())
    }

    /// Page-1 thumbnail as SVG.
    #[must_use]
    pub fn thumbnail_svg(&self) -> String {
        svg::scene_to_svg(&render::default_thumbnail_scene(&self.core.doc, &self.ctx))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.history.can_redo()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.core.ui.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.core.doc.total_pages
    }
}

impl Engine {
    /// Borrow the testable core.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}
