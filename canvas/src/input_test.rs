use super::*;

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Tool::Draw).unwrap(), "draw");
    let tool: Tool = serde_json::from_value(serde_json::json!("select")).unwrap();
    assert_eq!(tool, Tool::Select);
}

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(7), Button::Primary);
}

#[test]
fn brush_default() {
    let brush = BrushStyle::default();
    assert_eq!(brush.color, "#000000");
    assert!((brush.width - 3.0).abs() < f64::EPSILON);
}

#[test]
fn ui_state_starts_on_page_one_without_selection() {
    let ui = UiState::default();
    assert_eq!(ui.current_page, 1);
    assert_eq!(ui.selected_id, None);
    assert_eq!(ui.tool, Tool::Select);
}

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert_eq!(state.name(), "idle");
}

#[test]
fn input_state_names() {
    let drawing = InputState::Drawing { points: vec![Point::new(1.0, 2.0)] };
    assert!(!drawing.is_idle());
    assert_eq!(drawing.name(), "drawing");

    let dragging = InputState::Dragging { id: "a".to_owned(), offset: Point::default() };
    assert_eq!(dragging.name(), "dragging");

    let resizing = InputState::Resizing {
        id: "a".to_owned(),
        anchor: ResizeAnchor::Se,
        start_pointer: Point::default(),
        start_rect: Rect::default(),
        min_size: 20.0,
    };
    assert_eq!(resizing.name(), "resizing");
}
