//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Gestures are mutually exclusive:
//!
//! ```text
//! Idle → Dragging → Idle
//! Idle → Resizing → Idle
//! Idle → Drawing  → Idle
//! ```
//!
//! Pointer-up and pointer-leave both return to `Idle` from any state, so no
//! gesture can be left half finished.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::element::ElementId;
use crate::geometry::{Rect, ResizeAnchor};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Freehand drawing.
    Draw,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Freehand stroke style applied when a drawing is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushStyle {
    pub color: String,
    pub width: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self { color: "#000000".to_owned(), width: 3.0 }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// The 1-based page being edited.
    pub current_page: u32,
    pub brush: BrushStyle,
}

impl Default for UiState {
    fn default() -> Self {
        Self { tool: Tool::default(), selected_id: None, current_page: 1, brush: BrushStyle::default() }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the context needed to compute the element's
/// geometry from the current pointer position.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving an element.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Pointer position minus element origin at pointer-down, in logical units.
        offset: Point,
    },
    /// Resizing an element by one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Logical pointer position at the start of the resize.
        start_pointer: Point,
        /// Element geometry at the start of the resize.
        start_rect: Rect,
        /// Floor for width and height.
        min_size: f64,
    },
    /// Collecting freehand points in logical units.
    Drawing {
        points: Vec<Point>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short name for logging and host display.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Drawing { .. } => "drawing",
        }
    }
}
